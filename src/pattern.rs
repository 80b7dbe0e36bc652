//! Token substitution inside patterns.
//!
//! All replacements are literal and non-overlapping. The index token is
//! replaced first, so a value substituted later is never rescanned, but an
//! index token whose replacement happens to spell a value token will be
//! picked up by the value substitution.

use crate::value::explode_value;

/// Substitute `value` for `token` and `index` for `index_token` in `pattern`.
///
/// An empty pattern leaves the value unchanged. Empty tokens are skipped.
pub fn apply_pattern_with_index(
    value: &str,
    index_token: &str,
    index: Option<usize>,
    token: &str,
    pattern: &str,
) -> String {
    if pattern.is_empty() {
        return value.to_string();
    }

    let mut result = substitute_index(pattern, index_token, index);
    if !token.is_empty() {
        result = result.replace(token, value);
    }
    result
}

/// Split `value` on `field_sep` and substitute each field for its token.
///
/// The value is split into at most as many fields as there are tokens, so the
/// last token receives any remaining text. Tokens without a field become empty.
pub fn apply_field_pattern_with_index(
    value: &str,
    field_sep: &str,
    index_token: &str,
    index: Option<usize>,
    tokens: &[String],
    pattern: &str,
) -> String {
    if pattern.is_empty() {
        return value.to_string();
    }

    let fields = explode_value(field_sep, value, Some(tokens.len()));
    apply_fields(&fields, index_token, index, tokens, pattern)
}

/// Substitute already-split fields for their tokens.
pub fn apply_fields(
    fields: &[String],
    index_token: &str,
    index: Option<usize>,
    tokens: &[String],
    pattern: &str,
) -> String {
    let mut result = substitute_index(pattern, index_token, index);
    for (i, token) in tokens.iter().enumerate() {
        if token.is_empty() {
            continue;
        }
        let field = fields.get(i).map(String::as_str).unwrap_or("");
        result = result.replace(token.as_str(), field);
    }
    result
}

/// Substitute two operands' fields into one pattern, each with its own tokens.
pub fn apply_two_field_sets(
    first: &[String],
    first_tokens: &[String],
    second: &[String],
    second_tokens: &[String],
    pattern: &str,
) -> String {
    let result = apply_fields(first, "", None, first_tokens, pattern);
    apply_fields(second, "", None, second_tokens, &result)
}

fn substitute_index(pattern: &str, index_token: &str, index: Option<usize>) -> String {
    match index {
        Some(index) if !index_token.is_empty() => pattern.replace(index_token, &index.to_string()),
        _ => pattern.to_string(),
    }
}
