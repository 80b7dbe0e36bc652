//! Backslash escapes for characters that would otherwise be read as list
//! delimiters or markup syntax.
//!
//! | Literal   | Escape |
//! |-----------|--------|
//! | newline   | `\n`   |
//! | space     | `\_`   |
//! | `{` `}`   | `\{` `\}` |
//! | `[` `]`   | `\(` `\)` |
//! | `<` `>`   | `\l` `\g` |
//! | `=`       | `\e`   |
//! | `\|`      | `\!`   |
//! | `\`       | `\\`   |
//!
//! `\0` unescapes to nothing, which lets a value be written that trims to
//! something but unescapes to the empty string.

/// Escape code for a literal character, if it has one.
fn code_for(c: char) -> Option<char> {
    match c {
        '\n' => Some('n'),
        ' ' => Some('_'),
        '{' => Some('{'),
        '}' => Some('}'),
        '[' => Some('('),
        ']' => Some(')'),
        '<' => Some('l'),
        '>' => Some('g'),
        '=' => Some('e'),
        '|' => Some('!'),
        _ => None,
    }
}

/// Literal text for an escape code. `Some("")` is the delete code.
fn literal_for(code: char) -> Option<&'static str> {
    match code {
        '\\' => Some("\\"),
        'n' => Some("\n"),
        '_' => Some(" "),
        '{' => Some("{"),
        '}' => Some("}"),
        '(' => Some("["),
        ')' => Some("]"),
        'l' => Some("<"),
        'g' => Some(">"),
        'e' => Some("="),
        '!' => Some("|"),
        '0' => Some(""),
        _ => None,
    }
}

/// Escape every list-unsafe character in `text`.
///
/// A backslash that already starts a valid escape sequence is copied through
/// with its code so escaped text is not escaped twice; any other backslash is
/// doubled.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek().copied() {
                Some(next) if literal_for(next).is_some() => {
                    out.push('\\');
                    out.push(next);
                    chars.next();
                }
                _ => out.push_str("\\\\"),
            }
        } else if let Some(code) = code_for(c) {
            out.push('\\');
            out.push(code);
        } else {
            out.push(c);
        }
    }
    out
}

/// Replace escape sequences with the characters they stand for.
///
/// Unknown sequences are kept as written, including a trailing lone
/// backslash.
pub fn unescape(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut pending = false;
    for c in text.chars() {
        if pending {
            match literal_for(c) {
                Some(literal) => out.push_str(literal),
                None => {
                    out.push('\\');
                    out.push(c);
                }
            }
            pending = false;
        } else if c == '\\' {
            pending = true;
        } else {
            out.push(c);
        }
    }
    if pending {
        out.push('\\');
    }
    out
}
