use std::collections::HashSet;

use crate::expander::Expander;
use crate::operation::{Operation, Operator};
use crate::options::case_sensitive;
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::{Output, key_operator, list_param};

/// Remove values that repeat an earlier one, keeping first occurrences in
/// their original order.
///
/// Without case sensitivity the first spelling seen is the one kept.
pub fn dedupe(values: ValueList, case_sensitive: bool) -> ValueList {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| {
            let key = if case_sensitive {
                v.clone()
            } else {
                v.to_lowercase()
            };
            seen.insert(key)
        })
        .collect()
}

/// Remove values whose generated key repeats an earlier value's key.
pub fn dedupe_by_key(
    values: ValueList,
    op: &Operator,
    field_sep: &str,
    expander: &dyn Expander,
) -> ValueList {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .enumerate()
        .filter(|(i, v)| seen.insert(op.apply_value(v, field_sep, Some(i + 1), expander)))
        .map(|(_, v)| v)
        .collect()
}

pub const LSTUNIQ: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("csoption"),
];

/// `{{#lstuniq:list|insep|outsep|csoption}}`: the list without repeats.
pub fn lstuniq(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    dedupe(values, case_sensitive(&params.get("csoption"))).implode(&params.get("outsep"), None)
}

pub const LISTUNIQUE: ParamSpec = named_spec![
    ParamDef::new("uniquecs"),
    ParamDef::new("template"),
    ParamDef::new("fieldsep"),
    ParamDef::new("indextoken"),
    ParamDef::new("token"),
    ParamDef::new("tokensep").with_default(","),
    ParamDef::new("pattern").raw(),
];

/// `{{#listunique:...}}`: the list without repeats, compared directly or by
/// a key generated with a template or pattern.
pub fn listunique(params: &Parameters<'_>) -> String {
    let output = Output::from_params(params);
    let values = list_param(params, "list", "insep");
    if values.is_empty() {
        return output.default;
    }

    let unique = match key_operator(params) {
        Some(op) => dedupe_by_key(values, &op, &params.get("fieldsep"), params.expander()),
        None => dedupe(values, case_sensitive(&params.get("uniquecs"))),
    };
    output.render(&unique)
}
