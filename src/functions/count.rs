use crate::options::case_sensitive;
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::dedupe::dedupe;
use super::list_param;

pub const LSTCNT: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
];

/// `{{#lstcnt:list|insep}}`: the number of values.
pub fn lstcnt(params: &Parameters<'_>) -> String {
    count(&list_param(params, "list", "insep"))
}

pub const LSTCNTUNIQ: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("csoption"),
];

/// `{{#lstcntuniq:list|insep|csoption}}`: the number of distinct values.
pub fn lstcntuniq(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    count(&dedupe(values, case_sensitive(&params.get("csoption"))))
}

/// Count values as decimal text.
pub fn count(values: &ValueList) -> String {
    values.len().to_string()
}
