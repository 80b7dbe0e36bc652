//! Conditionals, case conversion and the escape codec.
//!
//! Arguments are expanded only when read, so the branch of `#if` or `#ifeq`
//! that is not taken is never expanded.

use crate::escape::{escape, unescape};
use crate::params::{ParamDef, ParamSpec, Parameters};

pub const IF: ParamSpec = positional_spec![
    ParamDef::new("test").escaped(),
    ParamDef::new("then").escaped(),
    ParamDef::new("else").escaped(),
];

/// `{{#if:test|then|else}}`: `then` when the test is non-empty after
/// trimming, else `else`.
pub fn if_(params: &Parameters<'_>) -> String {
    if params.get("test").is_empty() {
        params.get("else")
    } else {
        params.get("then")
    }
}

pub const IFEQ: ParamSpec = positional_spec![
    ParamDef::new("left").escaped(),
    ParamDef::new("right").escaped(),
    ParamDef::new("then").escaped(),
    ParamDef::new("else").escaped(),
];

/// `{{#ifeq:left|right|then|else}}`: `then` when both sides are equal after
/// trimming, else `else`.
pub fn ifeq(params: &Parameters<'_>) -> String {
    if params.get("left") == params.get("right") {
        params.get("then")
    } else {
        params.get("else")
    }
}

pub const CASE: ParamSpec = positional_spec![ParamDef::new("text").escaped()];

/// `{{#uc:text}}`
pub fn uc(params: &Parameters<'_>) -> String {
    params.get("text").to_uppercase()
}

/// `{{#lc:text}}`
pub fn lc(params: &Parameters<'_>) -> String {
    params.get("text").to_lowercase()
}

pub const CODEC: ParamSpec = positional_spec![ParamDef::new("text").escaped()];

/// `{{#esc:text}}`: escape the characters that would split a list.
pub fn esc(params: &Parameters<'_>) -> String {
    escape(&params.get("text"))
}

/// `{{#uesc:text}}`: undo [`esc`].
pub fn uesc(params: &Parameters<'_>) -> String {
    unescape(&params.get("text"))
}
