//! Option keywords.
//!
//! Each option family decodes a whitespace-separated keyword string through a
//! small keyword table. Keywords are case-insensitive, later keywords override
//! earlier ones in the same group, and unknown keywords are ignored.

type Keywords<T> = &'static [(&'static str, fn(&mut T))];

fn decode<T: Default>(text: &str, keywords: Keywords<T>) -> T {
    let mut options = T::default();
    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if let Some((_, set)) = keywords.iter().find(|(name, _)| *name == word) {
            set(&mut options);
        }
    }
    options
}

/// How values are compared when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub numeric: bool,
    pub case_sensitive: bool,
    pub descending: bool,
}

impl SortOptions {
    const KEYWORDS: Keywords<Self> = &[
        ("numeric", |o| o.numeric = true),
        ("alpha", |o| o.numeric = false),
        ("cs", |o| o.case_sensitive = true),
        ("ncs", |o| o.case_sensitive = false),
        ("desc", |o| o.descending = true),
        ("asc", |o| o.descending = false),
    ];

    /// Decode `numeric`/`alpha`, `cs`/`ncs` and `asc`/`desc`.
    pub fn parse(text: &str) -> Self {
        decode(text, Self::KEYWORDS)
    }
}

/// How `lstind` searches and reports a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Report the position counted from the end, as a negative number.
    pub negative: bool,
    pub case_sensitive: bool,
    /// Search from the last value backwards.
    pub reverse: bool,
}

impl IndexOptions {
    const KEYWORDS: Keywords<Self> = &[
        ("neg", |o| o.negative = true),
        ("pos", |o| o.negative = false),
        ("cs", |o| o.case_sensitive = true),
        ("ncs", |o| o.case_sensitive = false),
        ("desc", |o| o.reverse = true),
        ("asc", |o| o.reverse = false),
    ];

    /// Decode `pos`/`neg`, `cs`/`ncs` and `asc`/`desc`.
    pub fn parse(text: &str) -> Self {
        decode(text, Self::KEYWORDS)
    }
}

/// Where a mapping function sorts relative to applying its operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortMode {
    pub pre: bool,
    pub post: bool,
    /// Legacy `sort` keyword; see [`SortMode::resolve`].
    pub compat: bool,
}

impl SortMode {
    const KEYWORDS: Keywords<Self> = &[
        ("nosort", |o| *o = SortMode::default()),
        ("sort", |o| o.compat = true),
        ("presort", |o| o.pre = true),
        ("postsort", |o| o.post = true),
    ];

    /// Decode `nosort`, `sort`, `presort` and `postsort`.
    pub fn parse(text: &str) -> Self {
        decode(text, Self::KEYWORDS)
    }

    /// Returns whether to sort before and after mapping.
    ///
    /// The legacy `sort` mode sorts the input when an index token is in use,
    /// so indices follow the sorted order, and sorts the output otherwise.
    pub fn resolve(self, index_token_used: bool) -> (bool, bool) {
        let pre = self.pre || (self.compat && index_token_used);
        let post = self.post || (self.compat && !index_token_used);
        (pre, post)
    }
}

/// When duplicate values are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Duplicates {
    pub pre_strip: bool,
    pub post_strip: bool,
}

impl Duplicates {
    const KEYWORDS: Keywords<Self> = &[
        ("keep", |o| *o = Duplicates::default()),
        (
            "strip",
            |o| {
                o.pre_strip = true;
                o.post_strip = true;
            },
        ),
        ("prestrip", |o| o.pre_strip = true),
        ("poststrip", |o| o.post_strip = true),
    ];

    /// Decode `keep`, `strip`, `prestrip` and `poststrip`.
    pub fn parse(text: &str) -> Self {
        decode(text, Self::KEYWORDS)
    }
}

/// Decode a lone `cs`/`ncs` option. Case-insensitive unless `cs` is given.
pub fn case_sensitive(text: &str) -> bool {
    #[derive(Default)]
    struct Case(bool);

    const KEYWORDS: Keywords<Case> = &[("cs", |o| o.0 = true), ("ncs", |o| o.0 = false)];
    decode(text, KEYWORDS).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_options_defaults() {
        assert_eq!(SortOptions::parse(""), SortOptions::default());
        assert_eq!(SortOptions::parse("bogus words"), SortOptions::default());
    }

    #[test]
    fn sort_options_keywords() {
        let options = SortOptions::parse("numeric desc cs");
        assert!(options.numeric);
        assert!(options.descending);
        assert!(options.case_sensitive);
    }

    #[test]
    fn later_keyword_wins() {
        let options = SortOptions::parse("desc numeric asc alpha");
        assert!(!options.descending);
        assert!(!options.numeric);
    }

    #[test]
    fn keywords_ignore_case() {
        assert!(SortOptions::parse("DESC").descending);
    }

    #[test]
    fn index_options() {
        let options = IndexOptions::parse("neg desc");
        assert!(options.negative);
        assert!(options.reverse);
        assert!(!options.case_sensitive);
    }

    #[test]
    fn sort_mode_compat_depends_on_index_token() {
        let mode = SortMode::parse("sort");
        assert_eq!(mode.resolve(true), (true, false));
        assert_eq!(mode.resolve(false), (false, true));
    }

    #[test]
    fn sort_mode_explicit_flags_combine() {
        let mode = SortMode::parse("presort postsort");
        assert_eq!(mode.resolve(false), (true, true));
        assert_eq!(SortMode::parse("presort nosort").resolve(false), (false, false));
    }

    #[test]
    fn duplicates() {
        assert_eq!(Duplicates::parse(""), Duplicates::default());
        let strip = Duplicates::parse("strip");
        assert!(strip.pre_strip && strip.post_strip);
        let post = Duplicates::parse("poststrip");
        assert!(!post.pre_strip && post.post_strip);
        assert_eq!(Duplicates::parse("strip keep"), Duplicates::default());
    }

    #[test]
    fn case_sensitivity() {
        assert!(!case_sensitive(""));
        assert!(case_sensitive("cs"));
        assert!(!case_sensitive("cs ncs"));
    }
}
