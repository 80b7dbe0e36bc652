use tracing::debug;

use crate::escape::unescape;
use crate::expander::Expander;
use crate::operation::{ListInclusionOperation, Operation, Operator};
use crate::options::case_sensitive;
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::{Output, key_operator, list_param};

/// The result text that removes a value.
const REMOVE: &str = "remove";

/// Keep the values for which `op` does not answer `remove`.
///
/// The sentinel is matched ignoring case but otherwise exactly. Kept values
/// are the originals, whatever else the operation returned.
pub fn filter(
    values: ValueList,
    op: &Operator,
    field_sep: &str,
    expander: &dyn Expander,
) -> ValueList {
    values
        .into_iter()
        .enumerate()
        .filter(|(i, v)| {
            op.apply_value(v, field_sep, Some(i + 1), expander)
                .to_lowercase()
                != REMOVE
        })
        .map(|(_, v)| v)
        .collect()
}

/// Split a set of comparison values. An empty separator means a single value.
fn value_set(text: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        vec![unescape(text)]
    } else {
        ValueList::explode(sep, text).into_iter().collect()
    }
}

pub const LSTFLTR: ParamSpec = positional_spec![
    ParamDef::new("values").escaped(),
    ParamDef::new("valuesep").with_default(","),
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("csoption"),
];

/// `{{#lstfltr:values|valuesep|list|insep|outsep|csoption}}`: the list values
/// that are also in `values`.
pub fn lstfltr(params: &Parameters<'_>) -> String {
    let keep = value_set(&params.get("values"), &params.get("valuesep"));
    let op = ListInclusionOperation::new(keep, case_sensitive(&params.get("csoption")), "", REMOVE);
    let values = list_param(params, "list", "insep");
    filter(values, &op.into(), "", params.expander()).implode(&params.get("outsep"), None)
}

pub const LSTRM: ParamSpec = positional_spec![
    ParamDef::new("value"),
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("csoption"),
];

/// `{{#lstrm:value|list|insep|outsep|csoption}}`: the list without `value`.
pub fn lstrm(params: &Parameters<'_>) -> String {
    let op = ListInclusionOperation::new(
        [params.get("value")],
        case_sensitive(&params.get("csoption")),
        REMOVE,
        "",
    );
    let values = list_param(params, "list", "insep");
    filter(values, &op.into(), "", params.expander()).implode(&params.get("outsep"), None)
}

pub const LISTFILTER: ParamSpec = named_spec![
    ParamDef::new("keep").escaped(),
    ParamDef::new("keepsep").with_default(","),
    ParamDef::new("keepcs"),
    ParamDef::new("remove").escaped(),
    ParamDef::new("removesep").with_default(","),
    ParamDef::new("removecs"),
    ParamDef::new("template"),
    ParamDef::new("fieldsep"),
    ParamDef::new("indextoken"),
    ParamDef::new("token"),
    ParamDef::new("tokensep").with_default(","),
    ParamDef::new("pattern").raw(),
];

/// Pick the filtering operation: keep set, then remove set, then template,
/// then pattern.
fn filter_operator(params: &Parameters<'_>) -> Option<Operator> {
    let keep = params.get("keep");
    if !keep.is_empty() {
        let set = value_set(&keep, &params.get("keepsep"));
        let cs = case_sensitive(&params.get("keepcs"));
        return Some(ListInclusionOperation::new(set, cs, "", REMOVE).into());
    }

    let remove = params.get("remove");
    if !remove.is_empty() {
        let set = value_set(&remove, &params.get("removesep"));
        let cs = case_sensitive(&params.get("removecs"));
        return Some(ListInclusionOperation::new(set, cs, REMOVE, "").into());
    }

    key_operator(params)
}

/// `{{#listfilter:...}}`: the list with values removed by a keep set, a
/// remove set, or a template or pattern answering `remove`.
pub fn listfilter(params: &Parameters<'_>) -> String {
    let output = Output::from_params(params);
    let values = list_param(params, "list", "insep");
    if values.is_empty() {
        return output.default;
    }

    let filtered = match filter_operator(params) {
        Some(op) => filter(values, &op, &params.get("fieldsep"), params.expander()),
        None => {
            debug!("listfilter without keep, remove, template or pattern");
            values
        }
    };
    output.render(&filtered)
}
