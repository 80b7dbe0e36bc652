use crate::options::{IndexOptions, case_sensitive};
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::value::ValueList;

use super::list_param;

pub const LSTFND: ParamSpec = positional_spec![
    ParamDef::new("item"),
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("csoption"),
];

/// `{{#lstfnd:item|list|insep|csoption}}`: the first value equal to the item.
///
/// Returns the value as it appears in the list, which may differ in case from
/// the item when matching case-insensitively.
pub fn lstfnd(params: &Parameters<'_>) -> String {
    let item = params.get("item");
    let values = list_param(params, "list", "insep");
    find(&values, &item, case_sensitive(&params.get("csoption")))
        .unwrap_or("")
        .to_string()
}

/// The first value equal to `item`.
pub fn find<'v>(values: &'v ValueList, item: &str, case_sensitive: bool) -> Option<&'v str> {
    if case_sensitive {
        values.iter().find(|v| *v == item).map(String::as_str)
    } else {
        let item = item.to_lowercase();
        values
            .iter()
            .find(|v| v.to_lowercase() == item)
            .map(String::as_str)
    }
}

pub const LSTIND: ParamSpec = positional_spec![
    ParamDef::new("item"),
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("options"),
];

/// `{{#lstind:item|list|insep|options}}`: the 1-based position of the item.
///
/// With `neg` the position counts back from the end (`-1` is the last value);
/// with `desc` the search starts from the end. Empty when not found.
pub fn lstind(params: &Parameters<'_>) -> String {
    let item = params.get("item");
    let values = list_param(params, "list", "insep");
    index_of(&values, &item, IndexOptions::parse(&params.get("options")))
        .map(|i| i.to_string())
        .unwrap_or_default()
}

/// The position of `item`, 1-based or counted from the end per `options`.
pub fn index_of(values: &ValueList, item: &str, options: IndexOptions) -> Option<i64> {
    let folded = item.to_lowercase();
    let matches = |value: &String| {
        if options.case_sensitive {
            value == item
        } else {
            value.to_lowercase() == folded
        }
    };

    let found = if options.reverse {
        values.iter().rposition(matches)
    } else {
        values.iter().position(matches)
    }?;

    let count = values.len() as i64;
    let index = found as i64;
    Some(if options.negative {
        index - count
    } else {
        index + 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::call;

    #[test]
    fn find_returns_list_casing() {
        assert_eq!(call(LSTFND, lstfnd, &["apple", "Pear,APPLE,apple"]), "APPLE");
    }

    #[test]
    fn find_case_sensitive() {
        assert_eq!(
            call(LSTFND, lstfnd, &["apple", "Pear,APPLE,apple", ",", "cs"]),
            "apple"
        );
        assert_eq!(call(LSTFND, lstfnd, &["APPLE", "apple", ",", "cs"]), "");
    }

    #[test]
    fn find_missing() {
        assert_eq!(call(LSTFND, lstfnd, &["plum", "pear,apple"]), "");
        assert_eq!(call(LSTFND, lstfnd, &["plum", ""]), "");
    }

    #[test]
    fn index_forward() {
        assert_eq!(call(LSTIND, lstind, &["b", "a,b,c,b"]), "2");
    }

    #[test]
    fn index_reverse() {
        assert_eq!(call(LSTIND, lstind, &["b", "a,b,c,b", ",", "desc"]), "4");
    }

    #[test]
    fn index_negative() {
        assert_eq!(call(LSTIND, lstind, &["b", "a,b,c,b", ",", "neg"]), "-3");
        assert_eq!(call(LSTIND, lstind, &["b", "a,b,c,b", ",", "neg desc"]), "-1");
    }

    #[test]
    fn index_case_sensitivity() {
        assert_eq!(call(LSTIND, lstind, &["B", "a,b"]), "2");
        assert_eq!(call(LSTIND, lstind, &["B", "a,b", ",", "cs"]), "");
    }

    #[test]
    fn index_not_found() {
        assert_eq!(call(LSTIND, lstind, &["z", "a,b"]), "");
    }
}
