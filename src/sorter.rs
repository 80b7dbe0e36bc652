//! Comparators and the list sorter.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::options::SortOptions;

/// A comparator over two values.
pub type Comparator = fn(&str, &str) -> Ordering;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Numeric reading of a value: its leading decimal number, or 0 without one.
pub fn numeric_value(text: &str) -> f64 {
    NUMERIC_PREFIX
        .find(text)
        .and_then(|m| m.as_str().trim_start().parse().ok())
        .unwrap_or(0.0)
}

fn numeric_asc(a: &str, b: &str) -> Ordering {
    numeric_value(a)
        .partial_cmp(&numeric_value(b))
        .unwrap_or(Ordering::Equal)
}

fn numeric_desc(a: &str, b: &str) -> Ordering {
    numeric_asc(a, b).reverse()
}

fn alpha_cs_asc(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

fn alpha_cs_desc(a: &str, b: &str) -> Ordering {
    alpha_cs_asc(a, b).reverse()
}

fn alpha_ncs_asc(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn alpha_ncs_desc(a: &str, b: &str) -> Ordering {
    alpha_ncs_asc(a, b).reverse()
}

/// Select the comparator for a set of sort options.
///
/// Numeric comparison ignores case sensitivity.
pub fn comparator(options: SortOptions) -> Comparator {
    match (options.numeric, options.case_sensitive, options.descending) {
        (true, _, false) => numeric_asc,
        (true, _, true) => numeric_desc,
        (false, true, false) => alpha_cs_asc,
        (false, true, true) => alpha_cs_desc,
        (false, false, false) => alpha_ncs_asc,
        (false, false, true) => alpha_ncs_desc,
    }
}

/// Sorts values, or key/value pairs, with a primary and an optional
/// secondary comparator.
///
/// Without a secondary comparator the relative order of values that compare
/// equal is unspecified.
#[derive(Debug, Clone, Copy)]
pub struct ListSorter {
    primary: Comparator,
    secondary: Option<Comparator>,
}

impl ListSorter {
    pub fn new(options: SortOptions, sub_options: Option<SortOptions>) -> Self {
        Self {
            primary: comparator(options),
            secondary: sub_options.map(comparator),
        }
    }

    /// Sort values with the primary comparator.
    pub fn sort(&self, values: &mut [String]) {
        values.sort_by(|a, b| (self.primary)(a, b));
    }

    /// Sort `(key, value)` pairs by key, breaking ties with the secondary
    /// comparator on the value.
    pub fn sort_pairs(&self, pairs: &mut [(String, String)]) {
        pairs.sort_by(|(key_a, value_a), (key_b, value_b)| {
            let ordering = (self.primary)(key_a, key_b);
            match (ordering, self.secondary) {
                (Ordering::Equal, Some(secondary)) => secondary(value_a, value_b),
                _ => ordering,
            }
        });
    }
}
