use crate::expander::Expander;
use crate::operation::{Operation, Operator};
use crate::options::{Duplicates, SortOptions};
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::sorter::ListSorter;
use crate::value::ValueList;

use super::dedupe::dedupe;
use super::{Output, flag_param, key_operator, list_param};

/// Sort values directly.
pub fn sort(mut values: ValueList, sorter: &ListSorter) -> ValueList {
    sorter.sort(&mut values.values);
    values
}

/// Sort values by a key generated for each one.
///
/// Keys are generated once, with each value's original 1-based position.
/// Ties on the key fall back to the sorter's secondary comparator on the
/// values themselves.
pub fn sort_by_key(
    values: ValueList,
    op: &Operator,
    field_sep: &str,
    sorter: &ListSorter,
    expander: &dyn Expander,
) -> ValueList {
    let mut pairs: Vec<(String, String)> = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (op.apply_value(&v, field_sep, Some(i + 1), expander), v))
        .collect();
    sorter.sort_pairs(&mut pairs);
    pairs.into_iter().map(|(_, v)| v).collect()
}

pub const LSTSRT: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("sortoptions"),
];

/// `{{#lstsrt:list|insep|outsep|sortoptions}}`: the list in sorted order.
pub fn lstsrt(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    let sorter = ListSorter::new(SortOptions::parse(&params.get("sortoptions")), None);
    sort(values, &sorter).implode(&params.get("outsep"), None)
}

pub const LISTSORT: ParamSpec = named_spec![
    ParamDef::new("template"),
    ParamDef::new("fieldsep"),
    ParamDef::new("indextoken"),
    ParamDef::new("token"),
    ParamDef::new("tokensep").with_default(","),
    ParamDef::new("pattern").raw(),
    ParamDef::new("sortoptions"),
    ParamDef::new("subsort"),
    ParamDef::new("subsortoptions"),
    ParamDef::new("duplicates"),
];

/// `{{#listsort:...}}`: the list sorted by value, or by a key generated with
/// a template or pattern.
pub fn listsort(params: &Parameters<'_>) -> String {
    let output = Output::from_params(params);
    let mut values = list_param(params, "list", "insep");
    if values.is_empty() {
        return output.default;
    }

    let duplicates = Duplicates::parse(&params.get("duplicates"));
    let options = SortOptions::parse(&params.get("sortoptions"));
    if duplicates.pre_strip {
        values = dedupe(values, true);
    }

    values = match key_operator(params) {
        Some(op) => {
            let sub_options = flag_param(params, "subsort")
                .then(|| SortOptions::parse(&params.get("subsortoptions")));
            let sorter = ListSorter::new(options, sub_options);
            sort_by_key(values, &op, &params.get("fieldsep"), &sorter, params.expander())
        }
        None => sort(values, &ListSorter::new(options, None)),
    };

    if duplicates.post_strip {
        values = dedupe(values, true);
    }
    output.render(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::Verbatim;
    use crate::functions::call;
    use crate::operation::PatternOperation;

    fn list(values: &[&str]) -> ValueList {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sort_by_second_field() {
        let op = Operator::from(PatternOperation::new(
            "b",
            "",
            vec!["a".to_string(), "b".to_string()],
        ));
        let sorter = ListSorter::new(SortOptions::default(), None);
        let sorted = sort_by_key(list(&["x-3", "y-1", "z-2"]), &op, "-", &sorter, &Verbatim);
        assert_eq!(sorted, list(&["y-1", "z-2", "x-3"]));
    }

    #[test]
    fn key_ties_broken_by_value() {
        let op = Operator::from(PatternOperation::new("same", "", vec!["x".to_string()]));
        let sorter = ListSorter::new(
            SortOptions::default(),
            Some(SortOptions::parse("desc")),
        );
        let sorted = sort_by_key(list(&["1a", "1c", "1b"]), &op, "", &sorter, &Verbatim);
        assert_eq!(sorted, list(&["1c", "1b", "1a"]));
    }

    #[test]
    fn lstsrt_alpha_and_numeric() {
        assert_eq!(call(LSTSRT, lstsrt, &["b,C,a"]), "a, b, C");
        assert_eq!(call(LSTSRT, lstsrt, &["b,C,a", ",", ",", "cs"]), "C,a,b");
        assert_eq!(
            call(LSTSRT, lstsrt, &["10,9,x,2.5", ",", "\\_", "numeric"]),
            "x 2.5 9 10"
        );
        assert_eq!(call(LSTSRT, lstsrt, &["a,c,b", ",", ",", "desc"]), "c,b,a");
    }

    #[test]
    fn listsort_named() {
        assert_eq!(
            call(LISTSORT, listsort, &["3;1;2", "insep=;", "sortoptions=numeric desc"]),
            "3, 2, 1"
        );
    }

    #[test]
    fn listsort_by_pattern_with_subsort() {
        assert_eq!(
            call(
                LISTSORT,
                listsort,
                &[
                    "b:2,a:1,c:1",
                    "fieldsep=:",
                    "token=name,num",
                    "pattern=num",
                    "sortoptions=numeric",
                    "subsort=yes",
                    "subsortoptions=desc",
                ]
            ),
            "c:1, a:1, b:2"
        );
    }

    #[test]
    fn listsort_strips_duplicates() {
        assert_eq!(
            call(LISTSORT, listsort, &["b,a,b,A", "duplicates=strip"]),
            "a, A, b"
        );
        assert_eq!(call(LISTSORT, listsort, &["b,a,b"]), "a, b, b");
    }

    #[test]
    fn listsort_empty_list() {
        assert_eq!(call(LISTSORT, listsort, &["", "default=-"]), "-");
    }
}
