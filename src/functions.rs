//! List function implementations.
//!
//! Each submodule holds a family of functions. Every function comes in two
//! layers: a pure function over a [`ValueList`] that carries the semantics,
//! and a handler that reads [`Parameters`] and renders text. Handlers never
//! fail; bad input degrades to an empty or default result.

/// Declare a positional parameter spec.
macro_rules! positional_spec {
    ($($param:expr),* $(,)?) => {
        $crate::params::ParamSpec {
            style: $crate::params::Style::Positional,
            params: &[$($param),*],
        }
    };
}

/// Declare a named parameter spec, starting with the parameters every
/// named-style list function shares.
macro_rules! named_spec {
    ($($param:expr),* $(,)?) => {
        $crate::params::ParamSpec {
            style: $crate::params::Style::Named,
            params: &[
                $crate::params::ParamDef::new("list").escaped(),
                $crate::params::ParamDef::new("default"),
                $crate::params::ParamDef::new("insep").with_default(",").with_alias("sep"),
                $crate::params::ParamDef::new("outsep").with_default(", "),
                $crate::params::ParamDef::new("outconj"),
                $crate::params::ParamDef::new("counttoken"),
                $crate::params::ParamDef::new("intro"),
                $crate::params::ParamDef::new("outro"),
                $($param),*
            ],
        }
    };
}

pub mod count;
pub mod dedupe;
pub mod filter;
pub mod find;
pub mod join;
pub mod map;
pub mod merge;
pub mod select;
pub mod sort;
pub mod text;

use crate::operation::{Operator, PatternOperation, TemplateOperation};
use crate::params::Parameters;
use crate::value::ValueList;

/// Read and split the list held in `list_key` with the separator in `sep_key`.
pub(crate) fn list_param(params: &Parameters<'_>, list_key: &str, sep_key: &str) -> ValueList {
    let list = params.get(list_key);
    if list.is_empty() {
        return ValueList::new();
    }
    ValueList::explode(&params.get(sep_key), &list)
}

/// Split a token list. Multiple tokens are only used together with a field
/// separator; otherwise the whole text is a single token.
pub(crate) fn split_tokens(token: &str, token_sep: &str, field_sep: &str) -> Vec<String> {
    if field_sep.is_empty() || token_sep.is_empty() {
        return vec![token.to_string()];
    }
    token
        .split(token_sep)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the per-value operator from `template`, or else `pattern`.
///
/// Returns `None` when neither is given.
pub(crate) fn key_operator(params: &Parameters<'_>) -> Option<Operator> {
    let template = params.get("template");
    if !template.is_empty() {
        return Some(TemplateOperation::new(template).into());
    }

    let pattern = params.get("pattern");
    if pattern.is_empty() {
        return None;
    }
    let tokens = split_tokens(
        &params.get("token"),
        &params.get("tokensep"),
        &params.get("fieldsep"),
    );
    Some(PatternOperation::new(pattern, params.get("indextoken"), tokens).into())
}

/// Read a yes/no parameter. Empty, `no`, `false`, `off` and `0` are false.
pub(crate) fn flag_param(params: &Parameters<'_>, key: &str) -> bool {
    let value = params.get(key).to_lowercase();
    !matches!(value.as_str(), "" | "no" | "false" | "off" | "0")
}

/// How a named-style function renders its result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub separator: String,
    pub conjunction: Option<String>,
    pub count_token: String,
    pub intro: String,
    pub outro: String,
    pub default: String,
}

impl Output {
    pub(crate) fn from_params(params: &Parameters<'_>) -> Self {
        let conjunction = params.get("outconj");
        Self {
            separator: params.get("outsep"),
            conjunction: params.is_defined("outconj").then_some(conjunction),
            count_token: params.get("counttoken"),
            intro: params.get("intro"),
            outro: params.get("outro"),
            default: params.get("default"),
        }
    }

    /// Join the values and wrap them in intro and outro, or return the
    /// default when there is nothing to show.
    pub fn render(&self, values: &ValueList) -> String {
        if values.is_empty() {
            return self.default.clone();
        }

        let joined = values.implode(&self.separator, self.conjunction.as_deref());
        let count = values.len().to_string();
        let with_count = |text: &str| {
            if self.count_token.is_empty() {
                text.to_string()
            } else {
                text.replace(&self.count_token, &count)
            }
        };
        format!("{}{}{}", with_count(&self.intro), joined, with_count(&self.outro))
    }
}

/// Run a handler on literal arguments without any markup expansion.
#[cfg(test)]
pub(crate) fn call(
    spec: crate::params::ParamSpec,
    handler: fn(&Parameters<'_>) -> String,
    args: &[&str],
) -> String {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    handler(&Parameters::arrange(spec, &args, &crate::expander::Verbatim))
}
