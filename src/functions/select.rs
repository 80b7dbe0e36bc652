use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::list_param;

pub const LSTELEM: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("index").with_default("1"),
];

/// `{{#lstelem:list|insep|index}}`: the value at a 1-based position.
///
/// Negative positions count from the end. Position 0, a position outside the
/// list, or an index that is not a number all give empty text.
pub fn lstelem(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    element_at(&values, params.get_int("index", 0)).to_string()
}

/// The value at a 1-based position, or empty text.
pub fn element_at(values: &ValueList, index: i64) -> &str {
    values.get(index).unwrap_or("")
}

pub const LSTSUB: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("offset").with_default("1"),
    ParamDef::new("length"),
];

/// `{{#lstsub:list|insep|outsep|offset|length}}`: a run of values.
///
/// An empty or non-numeric length runs to the end of the list.
pub fn lstsub(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    let offset = params.get_int("offset", 1);
    let length = params.get_opt_int("length");
    values.slice(offset, length).implode(&params.get("outsep"), None)
}
