//! Parameter arrangement.
//!
//! A function declares its parameters once as a static [`ParamSpec`]. Raw
//! arguments are sorted into named and positional slots against that spec,
//! and each value is expanded, trimmed and unescaped only when the function
//! asks for it.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::escape::unescape;
use crate::expander::Expander;

/// One declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDef {
    pub name: &'static str,
    /// Alternative name accepted as a named argument.
    pub alias: Option<&'static str>,
    /// Used when the argument is absent. An argument given as empty stays empty.
    pub default: &'static str,
    pub unescape: bool,
    /// Patterns are kept as raw markup and expanded after substitution.
    pub expand: bool,
}

impl ParamDef {
    /// A parameter that is expanded and unescaped, defaulting to empty.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            default: "",
            unescape: true,
            expand: true,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Expanded but not unescaped; used for lists, which unescape per value.
    pub const fn escaped(mut self) -> Self {
        self.unescape = false;
        self
    }

    /// Neither expanded nor unescaped.
    pub const fn raw(mut self) -> Self {
        self.unescape = false;
        self.expand = false;
        self
    }
}

/// How bare arguments are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Every argument is positional, even if it contains `=`.
    Positional,
    /// `key=value` arguments with a declared key are named. The first other
    /// argument fills the first declared parameter; any more are ignored.
    Named,
}

/// The declared parameters of one function.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub style: Style,
    pub params: &'static [ParamDef],
}

impl ParamSpec {
    fn find(&self, key: &str) -> Option<&'static ParamDef> {
        self.params.iter().find(|p| p.name == key)
    }

    fn find_named(&self, key: &str) -> Option<&'static ParamDef> {
        self.params
            .iter()
            .find(|p| p.name == key || p.alias == Some(key))
    }
}

/// Arguments arranged against a [`ParamSpec`].
pub struct Parameters<'a> {
    spec: ParamSpec,
    raw: HashMap<&'static str, String>,
    expander: &'a dyn Expander,
}

impl<'a> Parameters<'a> {
    /// Sort raw argument text into the declared parameters.
    ///
    /// Repeated named arguments are reported and the last one wins; a named
    /// argument also overrides a positional one for the same parameter.
    pub fn arrange(spec: ParamSpec, args: &[String], expander: &'a dyn Expander) -> Self {
        let mut raw = HashMap::new();
        let mut named_seen = HashSet::new();
        let mut position = 0;

        for arg in args {
            let named = match spec.style {
                Style::Positional => None,
                Style::Named => arg
                    .split_once('=')
                    .and_then(|(key, value)| spec.find_named(key.trim()).map(|def| (def, value))),
            };

            match named {
                Some((def, value)) => {
                    raw.insert(def.name, value.to_string());
                    if !named_seen.insert(def.name) {
                        warn!(parameter = def.name, "duplicate argument; using the last value");
                    }
                }
                None => {
                    let slot = match spec.style {
                        Style::Positional => spec.params.get(position),
                        Style::Named if position == 0 => spec.params.first(),
                        Style::Named => {
                            warn!(argument = arg.as_str(), "ignoring extra unnamed argument");
                            None
                        }
                    };
                    if let Some(def) = slot {
                        raw.entry(def.name).or_insert_with(|| arg.clone());
                    }
                    position += 1;
                }
            }
        }

        Self {
            spec,
            raw,
            expander,
        }
    }

    /// Get a parameter's value: expanded, trimmed and unescaped as declared,
    /// or its default when absent. Undeclared keys read as empty.
    pub fn get(&self, key: &str) -> String {
        let Some(def) = self.spec.find(key) else {
            return String::new();
        };
        let Some(raw) = self.raw.get(def.name) else {
            return def.default.to_string();
        };

        let expanded = if def.expand {
            self.expander.expand(raw)
        } else {
            raw.clone()
        };
        let trimmed = expanded.trim();
        if def.unescape {
            unescape(trimmed)
        } else {
            trimmed.to_string()
        }
    }

    /// Get an integer parameter, falling back to `default` if it does not parse.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).trim().parse().unwrap_or(default)
    }

    /// Get an optional integer parameter; absent or unparsable reads as `None`.
    pub fn get_opt_int(&self, key: &str) -> Option<i64> {
        self.get(key).trim().parse().ok()
    }

    /// Returns true if the argument was given, even as empty text.
    pub fn is_defined(&self, key: &str) -> bool {
        self.spec
            .find(key)
            .is_some_and(|def| self.raw.contains_key(def.name))
    }

    /// The expander arguments are expanded with.
    pub fn expander(&self) -> &'a dyn Expander {
        self.expander
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::Verbatim;

    const POSITIONAL: ParamSpec = ParamSpec {
        style: Style::Positional,
        params: &[
            ParamDef::new("list").escaped(),
            ParamDef::new("insep").with_default(","),
            ParamDef::new("index").with_default("1"),
        ],
    };

    const NAMED: ParamSpec = ParamSpec {
        style: Style::Named,
        params: &[
            ParamDef::new("list").escaped(),
            ParamDef::new("insep").with_default(",").with_alias("sep"),
            ParamDef::new("pattern").raw(),
        ],
    };

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    /// Uppercases everything, to show when expansion happened.
    struct Upper;

    impl Expander for Upper {
        fn expand(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn positional_arguments() {
        let params = Parameters::arrange(POSITIONAL, &args(&["a,b", " ; ", "x=2"]), &Verbatim);
        assert_eq!(params.get("list"), "a,b");
        assert_eq!(params.get("insep"), ";");
        assert_eq!(params.get("index"), "x=2");
        assert_eq!(params.get_int("index", 1), 1);
    }

    #[test]
    fn absent_arguments_use_defaults() {
        let params = Parameters::arrange(POSITIONAL, &args(&["a"]), &Verbatim);
        assert_eq!(params.get("insep"), ",");
        assert!(!params.is_defined("insep"));
        assert_eq!(params.get_int("index", 0), 1);
    }

    #[test]
    fn empty_argument_is_not_absent() {
        let params = Parameters::arrange(POSITIONAL, &args(&["a", ""]), &Verbatim);
        assert!(params.is_defined("insep"));
        assert_eq!(params.get("insep"), "");
    }

    #[test]
    fn unescapes_declared_parameters_only() {
        let params = Parameters::arrange(POSITIONAL, &args(&["a\\_b", "\\_"]), &Verbatim);
        assert_eq!(params.get("list"), "a\\_b");
        assert_eq!(params.get("insep"), " ");
    }

    #[test]
    fn named_arguments() {
        let params = Parameters::arrange(
            NAMED,
            &args(&["a;b", "sep=;", "pattern= <x> ", "other=1"]),
            &Verbatim,
        );
        assert_eq!(params.get("list"), "a;b");
        assert_eq!(params.get("insep"), ";");
        assert_eq!(params.get("pattern"), "<x>");
        assert_eq!(params.get("other"), "");
    }

    #[test]
    fn named_style_binds_only_the_first_bare_argument() {
        let params = Parameters::arrange(NAMED, &args(&["a;b", ";", "x"]), &Verbatim);
        assert_eq!(params.get("list"), "a;b");
        assert!(!params.is_defined("insep"));
        assert_eq!(params.get("insep"), ",");
        assert!(!params.is_defined("pattern"));
    }

    #[test]
    fn undeclared_key_is_positional() {
        let params = Parameters::arrange(NAMED, &args(&["k=v"]), &Verbatim);
        assert_eq!(params.get("list"), "k=v");
    }

    #[test]
    fn duplicate_named_argument_last_wins() {
        let params =
            Parameters::arrange(NAMED, &args(&["list=a", "insep=;", "insep=:"]), &Verbatim);
        assert_eq!(params.get("insep"), ":");
    }

    #[test]
    fn named_overrides_positional() {
        let params = Parameters::arrange(NAMED, &args(&["a", "list=b"]), &Verbatim);
        assert_eq!(params.get("list"), "b");
    }

    #[test]
    fn raw_parameters_are_not_expanded() {
        let params = Parameters::arrange(NAMED, &args(&["abc", "pattern=xyz"]), &Upper);
        assert_eq!(params.get("list"), "ABC");
        assert_eq!(params.get("pattern"), "xyz");
    }

    #[test]
    fn integer_parsing() {
        let params = Parameters::arrange(POSITIONAL, &args(&["a", ",", " -2 "]), &Verbatim);
        assert_eq!(params.get_int("index", 1), -2);
        assert_eq!(params.get_opt_int("index"), Some(-2));
        assert_eq!(params.get_opt_int("list"), None);
    }
}
