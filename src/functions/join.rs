use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::list_param;

pub const LSTSEP: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
];

/// `{{#lstsep:list|insep|outsep}}`: the same values with a new separator.
pub fn lstsep(params: &Parameters<'_>) -> String {
    list_param(params, "list", "insep").implode(&params.get("outsep"), None)
}

pub const LSTAPP: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("value"),
];

/// `{{#lstapp:list|insep|value}}`: add a value at the end.
///
/// The list is rejoined with its own separator.
pub fn lstapp(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    append(values, params.get("value")).implode(&params.get("insep"), None)
}

/// Add `value` at the end unless it is empty.
pub fn append(mut values: ValueList, value: String) -> ValueList {
    if !value.is_empty() {
        values.values.push(value);
    }
    values
}

pub const LSTPREP: ParamSpec = positional_spec![
    ParamDef::new("value"),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("list").escaped(),
];

/// `{{#lstprep:value|insep|list}}`: add a value at the start.
pub fn lstprep(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    prepend(values, params.get("value")).implode(&params.get("insep"), None)
}

/// Add `value` at the start unless it is empty.
pub fn prepend(mut values: ValueList, value: String) -> ValueList {
    if !value.is_empty() {
        values.values.insert(0, value);
    }
    values
}

pub const LSTJOIN: ParamSpec = positional_spec![
    ParamDef::new("list1").escaped(),
    ParamDef::new("insep1").with_default(","),
    ParamDef::new("list2").escaped(),
    ParamDef::new("insep2").with_default(","),
    ParamDef::new("outsep").with_default(", "),
];

/// `{{#lstjoin:list1|insep1|list2|insep2|outsep}}`: both lists, one after
/// the other.
pub fn lstjoin(params: &Parameters<'_>) -> String {
    let first = list_param(params, "list1", "insep1");
    let second = list_param(params, "list2", "insep2");
    concat(first, second).implode(&params.get("outsep"), None)
}

/// The values of `first` followed by those of `second`.
pub fn concat(mut first: ValueList, second: ValueList) -> ValueList {
    first.values.extend(second);
    first
}
