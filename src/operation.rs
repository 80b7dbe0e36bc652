//! Per-value operations shared by the filtering, mapping, sorting, dedupe and
//! merge functions.
//!
//! An operation receives the fields of one value, plus its 1-based position
//! when the caller tracks one, and returns text. Each operation also says how
//! many fields it can use, which caps how far a value is split.

use std::collections::HashSet;

use crate::expander::{Expander, TemplateCall, evaluate_unescaped};
use crate::pattern::{apply_field_pattern_with_index, apply_fields, apply_pattern_with_index};
use crate::value::explode_value;

/// A transformation applied to one value's fields.
pub trait Operation {
    /// Apply the operation, expanding through `expander` where needed.
    fn apply(&self, fields: &[String], index: Option<usize>, expander: &dyn Expander) -> String;

    /// Maximum number of fields the operation uses, or `None` for no limit.
    fn field_limit(&self) -> Option<usize>;

    /// Split `value` on `field_sep` up to the field limit and apply.
    fn apply_value(
        &self,
        value: &str,
        field_sep: &str,
        index: Option<usize>,
        expander: &dyn Expander,
    ) -> String {
        let fields = explode_value(field_sep, value, self.field_limit());
        self.apply(&fields, index, expander)
    }
}

/// Substitutes fields into a pattern, then expands the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOperation {
    pattern: String,
    index_token: String,
    tokens: Vec<String>,
}

impl PatternOperation {
    pub fn new(
        pattern: impl Into<String>,
        index_token: impl Into<String>,
        tokens: Vec<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            index_token: index_token.into(),
            tokens,
        }
    }
}

impl Operation for PatternOperation {
    fn apply(&self, fields: &[String], index: Option<usize>, expander: &dyn Expander) -> String {
        if self.pattern.is_empty() {
            return fields.first().cloned().unwrap_or_default();
        }
        let text = apply_fields(fields, &self.index_token, index, &self.tokens, &self.pattern);
        evaluate_unescaped(expander, &text)
    }

    fn field_limit(&self) -> Option<usize> {
        Some(self.tokens.len().max(1))
    }

    fn apply_value(
        &self,
        value: &str,
        field_sep: &str,
        index: Option<usize>,
        expander: &dyn Expander,
    ) -> String {
        if self.pattern.is_empty() {
            return value.to_string();
        }
        let text = match self.tokens.as_slice() {
            [token] => {
                apply_pattern_with_index(value, &self.index_token, index, token, &self.pattern)
            }
            tokens => apply_field_pattern_with_index(
                value,
                field_sep,
                &self.index_token,
                index,
                tokens,
                &self.pattern,
            ),
        };
        evaluate_unescaped(expander, &text)
    }
}

/// Calls a template with the fields as positional arguments.
///
/// The position, when given, is passed as the named argument `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOperation {
    template: String,
}

impl TemplateOperation {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Operation for TemplateOperation {
    fn apply(&self, fields: &[String], index: Option<usize>, expander: &dyn Expander) -> String {
        let mut call =
            TemplateCall::new(self.template.as_str()).with_positional(fields.iter().cloned());
        if let Some(index) = index {
            call = call.with_named("index", index.to_string());
        }
        expander.call_template(&call)
    }

    fn field_limit(&self) -> Option<usize> {
        None
    }
}

/// Tests whether a value belongs to a fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInclusionOperation {
    values: HashSet<String>,
    case_sensitive: bool,
    when_in: String,
    when_out: String,
}

impl ListInclusionOperation {
    pub fn new<I>(
        values: I,
        case_sensitive: bool,
        when_in: impl Into<String>,
        when_out: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let values = values
            .into_iter()
            .map(|v| fold(v, case_sensitive))
            .collect();
        Self {
            values,
            case_sensitive,
            when_in: when_in.into(),
            when_out: when_out.into(),
        }
    }

    /// Returns true if `value` is in the set.
    pub fn contains(&self, value: &str) -> bool {
        if self.case_sensitive {
            self.values.contains(value)
        } else {
            self.values.contains(&value.to_lowercase())
        }
    }
}

impl Operation for ListInclusionOperation {
    fn apply(&self, fields: &[String], _index: Option<usize>, _expander: &dyn Expander) -> String {
        let value = fields.first().map(String::as_str).unwrap_or("");
        if self.contains(value) {
            self.when_in.clone()
        } else {
            self.when_out.clone()
        }
    }

    fn field_limit(&self) -> Option<usize> {
        Some(1)
    }
}

fn fold(value: String, case_sensitive: bool) -> String {
    if case_sensitive {
        value
    } else {
        value.to_lowercase()
    }
}

/// The closed set of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Pattern(PatternOperation),
    Template(TemplateOperation),
    ListInclusion(ListInclusionOperation),
}

impl Operation for Operator {
    fn apply(&self, fields: &[String], index: Option<usize>, expander: &dyn Expander) -> String {
        match self {
            Operator::Pattern(op) => op.apply(fields, index, expander),
            Operator::Template(op) => op.apply(fields, index, expander),
            Operator::ListInclusion(op) => op.apply(fields, index, expander),
        }
    }

    fn field_limit(&self) -> Option<usize> {
        match self {
            Operator::Pattern(op) => op.field_limit(),
            Operator::Template(op) => op.field_limit(),
            Operator::ListInclusion(op) => op.field_limit(),
        }
    }

    fn apply_value(
        &self,
        value: &str,
        field_sep: &str,
        index: Option<usize>,
        expander: &dyn Expander,
    ) -> String {
        match self {
            Operator::Pattern(op) => op.apply_value(value, field_sep, index, expander),
            Operator::Template(op) => op.apply_value(value, field_sep, index, expander),
            Operator::ListInclusion(op) => op.apply_value(value, field_sep, index, expander),
        }
    }
}

impl From<PatternOperation> for Operator {
    fn from(op: PatternOperation) -> Self {
        Operator::Pattern(op)
    }
}

impl From<TemplateOperation> for Operator {
    fn from(op: TemplateOperation) -> Self {
        Operator::Template(op)
    }
}

impl From<ListInclusionOperation> for Operator {
    fn from(op: ListInclusionOperation) -> Self {
        Operator::ListInclusion(op)
    }
}
