//! Iterative pairwise merging.
//!
//! Each pass walks the list once. The value at each position absorbs every
//! later value it matches, in order, and is compared in its merged form
//! against the values after that. Passes repeat while a pass shrinks the list
//! and more than one value remains.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::expander::{Expander, evaluate_unescaped};
use crate::operation::{Operation, TemplateOperation};
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::pattern::apply_two_field_sets;
use crate::value::{ValueList, explode_value};

use super::map::MapStages;
use super::{Output, list_param, split_tokens};

/// The result of [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub values: ValueList,
    /// Number of passes run. Lists of fewer than two values need none.
    pub passes: usize,
}

/// Merge values that match until no pass merges anything.
///
/// Match outcomes are cached by the content of the pair, so `matches` must
/// depend only on its arguments.
pub fn merge<M, F>(values: ValueList, mut matches: M, mut combine: F) -> Merged
where
    M: FnMut(&str, &str) -> bool,
    F: FnMut(&str, &str) -> String,
{
    let mut values = values.values;
    let mut checked: HashMap<(String, String), bool> = HashMap::new();
    let mut passes = 0;

    while values.len() > 1 {
        passes += 1;
        let before = values.len();

        let mut i1 = 0;
        while i1 < values.len() {
            let rest = values.split_off(i1 + 1);
            let mut value1 = std::mem::take(&mut values[i1]);
            for value2 in rest {
                let key = (value1.clone(), value2.clone());
                let do_merge = *checked
                    .entry(key)
                    .or_insert_with(|| matches(&value1, &value2));
                if do_merge {
                    value1 = combine(&value1, &value2);
                } else {
                    values.push(value2);
                }
            }
            values[i1] = value1;
            i1 += 1;
        }

        trace!(pass = passes, before, after = values.len(), "merge pass");
        if values.len() == before {
            break;
        }
    }

    Merged {
        values: ValueList::from(values),
        passes,
    }
}

/// Produces text from two values, for either matching or merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOperation {
    /// Substitutes the fields of both values into one pattern, each with its
    /// own tokens.
    Pattern {
        pattern: String,
        first_tokens: Vec<String>,
        second_tokens: Vec<String>,
    },
    /// Calls a template with the fields of both values in order.
    Template(TemplateOperation),
}

impl MergeOperation {
    /// Apply to a pair of values split on `field_sep`.
    pub fn apply(
        &self,
        value1: &str,
        value2: &str,
        field_sep: &str,
        expander: &dyn Expander,
    ) -> String {
        match self {
            MergeOperation::Pattern {
                pattern,
                first_tokens,
                second_tokens,
            } => {
                let first = explode_value(field_sep, value1, Some(first_tokens.len()));
                let second = explode_value(field_sep, value2, Some(second_tokens.len()));
                let text =
                    apply_two_field_sets(&first, first_tokens, &second, second_tokens, pattern);
                evaluate_unescaped(expander, &text)
            }
            MergeOperation::Template(op) => {
                let fields = if field_sep.is_empty() {
                    vec![value1.to_string(), value2.to_string()]
                } else {
                    explode_value(field_sep, &format!("{value1}{field_sep}{value2}"), None)
                };
                op.apply(&fields, None, expander)
            }
        }
    }
}

pub const LISTMERGE: ParamSpec = named_spec![
    ParamDef::new("fieldsep"),
    ParamDef::new("token1"),
    ParamDef::new("token2"),
    ParamDef::new("tokensep").with_default(","),
    ParamDef::new("matchpattern").raw(),
    ParamDef::new("mergepattern").raw(),
    ParamDef::new("matchtemplate"),
    ParamDef::new("mergetemplate"),
    ParamDef::new("sortmode"),
    ParamDef::new("sortoptions"),
    ParamDef::new("duplicates"),
];

/// Build the match or merge operation from `<kind>template`, or else
/// `<kind>pattern`.
fn merge_operation(params: &Parameters<'_>, kind: &str) -> Option<MergeOperation> {
    let template = params.get(&format!("{kind}template"));
    if !template.is_empty() {
        return Some(MergeOperation::Template(TemplateOperation::new(template)));
    }

    let pattern = params.get(&format!("{kind}pattern"));
    if pattern.is_empty() {
        return None;
    }
    let field_sep = params.get("fieldsep");
    let token_sep = params.get("tokensep");
    Some(MergeOperation::Pattern {
        pattern,
        first_tokens: split_tokens(&params.get("token1"), &token_sep, &field_sep),
        second_tokens: split_tokens(&params.get("token2"), &token_sep, &field_sep),
    })
}

/// `{{#listmerge:...}}`: combine values that match each other until no more
/// combinations are possible.
///
/// A pair matches when the match operation's result is non-empty after
/// trimming. Without both a match and a merge operation the list is only
/// deduplicated and sorted as requested.
pub fn listmerge(params: &Parameters<'_>) -> String {
    let output = Output::from_params(params);
    let values = list_param(params, "list", "insep");
    if values.is_empty() {
        return output.default;
    }

    let stages = MapStages::from_params(params, false);
    let field_sep = params.get("fieldsep");
    let expander = params.expander();

    let merged = match (
        merge_operation(params, "match"),
        merge_operation(params, "merge"),
    ) {
        (Some(match_op), Some(merge_op)) => stages.run(values, |values| {
            let merged = merge(
                values,
                |a, b| !match_op.apply(a, b, &field_sep, expander).trim().is_empty(),
                |a, b| merge_op.apply(a, b, &field_sep, expander).trim().to_string(),
            );
            debug!(passes = merged.passes, remaining = merged.values.len(), "listmerge");
            merged.values
        }),
        _ => {
            debug!("listmerge without both a match and a merge operation");
            stages.run(values, |values| values)
        }
    };
    output.render(&merged)
}
