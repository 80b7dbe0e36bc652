//! Data model for delimited lists.
//!
//! The core types are:
//! - `ValueList`: the ordered values of one list, already trimmed and unescaped
//! - `FieldSet`: the sub-fields of a single value, capped by a field limit
//!
//! Positions on the public surface are 1-based. Negative positions count from
//! the end, and position 0 never selects anything.

use std::fmt;

use crate::escape::unescape;

/// The fields of one value after splitting on a field separator.
pub type FieldSet = Vec<String>;

/// An ordered list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueList {
    pub values: Vec<String>,
}

impl ValueList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Split `list` into values.
    ///
    /// An empty separator yields one value per character. Otherwise the list
    /// is split on every literal occurrence of `sep`. Each piece is trimmed;
    /// pieces that trim to nothing are dropped, the rest are unescaped. A
    /// piece like `\0` survives as an empty value because it was non-empty
    /// before unescaping.
    pub fn explode(sep: &str, list: &str) -> Self {
        if list.is_empty() {
            return Self::new();
        }

        let values = if sep.is_empty() {
            list.chars()
                .map(|c| c.to_string())
                .filter(|s| !s.trim().is_empty())
                .map(|s| unescape(&s))
                .collect()
        } else {
            list.split(sep)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(unescape)
                .collect()
        };
        Self { values }
    }

    /// Join the values with `sep`, using `conj` between the last two when given.
    pub fn implode(&self, sep: &str, conj: Option<&str>) -> String {
        implode(&self.values, sep, conj)
    }

    /// Get a value by 1-based position. Negative positions count from the end.
    pub fn get(&self, index: i64) -> Option<&str> {
        resolve_index(index, self.values.len()).map(|i| self.values[i].as_str())
    }

    /// Take a window of values.
    ///
    /// `offset` is 1-based (negative counts from the end, 0 selects nothing).
    /// `length` of `None` runs to the end; a negative length stops that many
    /// values before the end. The window is clamped to the list, so a
    /// negative offset reaching before the start shortens the window instead
    /// of shifting it.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> ValueList {
        let count = self.values.len() as i64;
        if offset == 0 {
            return ValueList::new();
        }

        let start = if offset > 0 { offset - 1 } else { count + offset };
        let end = match length {
            None => count,
            Some(len) if len >= 0 => start.saturating_add(len),
            Some(len) => count + len,
        };
        let start = start.clamp(0, count) as usize;
        let end = end.clamp(0, count) as usize;
        if end <= start {
            return ValueList::new();
        }
        ValueList::from(self.values[start..end].to_vec())
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the list has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.values.iter()
    }
}

impl From<Vec<String>> for ValueList {
    fn from(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl FromIterator<String> for ValueList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValueList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl fmt::Display for ValueList {
    /// Displays the values comma-separated, the default list separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.implode(", ", None))
    }
}

/// Join `values` with `sep`; the last pair uses `conj` instead when given.
pub fn implode(values: &[String], sep: &str, conj: Option<&str>) -> String {
    match (values, conj) {
        ([], _) => String::new(),
        ([only], _) => only.clone(),
        ([init @ .., last], Some(conj)) => {
            let mut out = init.join(sep);
            out.push_str(conj);
            out.push_str(last);
            out
        }
        (all, None) => all.join(sep),
    }
}

/// Split one value into at most `limit` fields.
///
/// The last field keeps whatever text remains once the limit is reached. An
/// empty separator returns the value whole; `None` means no limit.
pub fn explode_value(field_sep: &str, value: &str, limit: Option<usize>) -> FieldSet {
    if field_sep.is_empty() {
        return vec![value.to_string()];
    }
    match limit {
        Some(n) => value
            .splitn(n.max(1), field_sep)
            .map(str::to_string)
            .collect(),
        None => value.split(field_sep).map(str::to_string).collect(),
    }
}

/// Convert a 1-based, possibly negative position into a 0-based index.
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let actual = match index {
        0 => return None,
        i if i > 0 => i - 1,
        i => len + i,
    };
    if actual < 0 || actual >= len {
        None
    } else {
        Some(actual as usize)
    }
}
