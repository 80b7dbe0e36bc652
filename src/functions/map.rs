use crate::expander::Expander;
use crate::operation::{Operation, Operator, PatternOperation, TemplateOperation};
use crate::options::{Duplicates, SortMode, SortOptions};
use crate::params::{ParamDef, ParamSpec, Parameters};
use crate::sorter::ListSorter;
use crate::value::ValueList;

use super::dedupe::dedupe;
use super::sort::sort;
use super::{Output, key_operator, list_param};

/// Apply `op` to every value, passing its 1-based position.
///
/// Empty results are dropped unless `keep_empty` is set.
pub fn map(
    values: ValueList,
    op: &Operator,
    field_sep: &str,
    keep_empty: bool,
    expander: &dyn Expander,
) -> ValueList {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| op.apply_value(v, field_sep, Some(i + 1), expander))
        .filter(|result| keep_empty || !result.is_empty())
        .collect()
}

/// The stages around a mapping: duplicate stripping and sorting, each
/// before and after.
#[derive(Debug, Clone, Copy)]
pub struct MapStages {
    pub duplicates: Duplicates,
    pub presort: bool,
    pub postsort: bool,
    pub sorter: ListSorter,
}

impl MapStages {
    /// Read `duplicates`, `sortmode` and `sortoptions`.
    ///
    /// `index_token_used` decides where the legacy `sort` mode sorts.
    pub(crate) fn from_params(params: &Parameters<'_>, index_token_used: bool) -> Self {
        let (presort, postsort) =
            SortMode::parse(&params.get("sortmode")).resolve(index_token_used);
        Self {
            duplicates: Duplicates::parse(&params.get("duplicates")),
            presort,
            postsort,
            sorter: ListSorter::new(SortOptions::parse(&params.get("sortoptions")), None),
        }
    }

    /// Run `transform` between the pre and post stages.
    pub fn run(
        &self,
        mut values: ValueList,
        transform: impl FnOnce(ValueList) -> ValueList,
    ) -> ValueList {
        if self.duplicates.pre_strip {
            values = dedupe(values, true);
        }
        if self.presort {
            values = sort(values, &self.sorter);
        }
        values = transform(values);
        if self.duplicates.post_strip {
            values = dedupe(values, true);
        }
        if self.postsort {
            values = sort(values, &self.sorter);
        }
        values
    }
}

pub const LSTMAP: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("token").with_default("x"),
    ParamDef::new("pattern").raw().with_default("x"),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("sortmode"),
    ParamDef::new("sortoptions"),
];

/// `{{#lstmap:list|insep|token|pattern|outsep|sortmode|sortoptions}}`: the
/// pattern applied to every value.
pub fn lstmap(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    let op = Operator::from(PatternOperation::new(
        params.get("pattern"),
        "",
        vec![params.get("token")],
    ));
    MapStages::from_params(params, false)
        .run(values, |values| map(values, &op, "", false, params.expander()))
        .implode(&params.get("outsep"), None)
}

pub const LSTMAPTEMP: ParamSpec = positional_spec![
    ParamDef::new("list").escaped(),
    ParamDef::new("template"),
    ParamDef::new("insep").with_default(","),
    ParamDef::new("outsep").with_default(", "),
    ParamDef::new("sortmode"),
    ParamDef::new("sortoptions"),
];

/// `{{#lstmaptemp:list|template|insep|outsep|sortmode|sortoptions}}`: the
/// template called on every value.
pub fn lstmaptemp(params: &Parameters<'_>) -> String {
    let values = list_param(params, "list", "insep");
    let template = params.get("template");
    if template.is_empty() {
        return values.implode(&params.get("outsep"), None);
    }
    let op = Operator::from(TemplateOperation::new(template));
    MapStages::from_params(params, false)
        .run(values, |values| map(values, &op, "", true, params.expander()))
        .implode(&params.get("outsep"), None)
}

pub const LISTMAP: ParamSpec = named_spec![
    ParamDef::new("template"),
    ParamDef::new("fieldsep"),
    ParamDef::new("indextoken"),
    ParamDef::new("token"),
    ParamDef::new("tokensep").with_default(","),
    ParamDef::new("pattern").raw(),
    ParamDef::new("sortmode"),
    ParamDef::new("sortoptions"),
    ParamDef::new("duplicates"),
];

/// `{{#listmap:...}}`: a template or pattern applied to every value, with
/// optional duplicate stripping and sorting around it.
pub fn listmap(params: &Parameters<'_>) -> String {
    let output = Output::from_params(params);
    let values = list_param(params, "list", "insep");
    if values.is_empty() {
        return output.default;
    }

    let stages = MapStages::from_params(params, !params.get("indextoken").is_empty());
    let mapped = match key_operator(params) {
        Some(op) => {
            let keep_empty = matches!(op, Operator::Template(_));
            let field_sep = params.get("fieldsep");
            stages.run(values, |values| {
                map(values, &op, &field_sep, keep_empty, params.expander())
            })
        }
        None => stages.run(values, |values| values),
    };
    output.render(&mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::Verbatim;
    use crate::functions::call;

    fn list(values: &[&str]) -> ValueList {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn map_drops_empty_results() {
        let op = Operator::from(PatternOperation::new(
            "b",
            "",
            vec!["a".to_string(), "b".to_string()],
        ));
        let mapped = map(list(&["1-x", "2", "3-z"]), &op, "-", false, &Verbatim);
        assert_eq!(mapped, list(&["x", "z"]));
        let mapped = map(list(&["1-x", "2", "3-z"]), &op, "-", true, &Verbatim);
        assert_eq!(mapped, list(&["x", "", "z"]));
    }

    #[test]
    fn lstmap_default_token() {
        assert_eq!(call(LSTMAP, lstmap, &["a,b", ",", "x", "[x]"]), "[a], [b]");
        assert_eq!(call(LSTMAP, lstmap, &["a,b"]), "a, b");
    }

    #[test]
    fn lstmap_custom_token_and_outsep() {
        assert_eq!(
            call(LSTMAP, lstmap, &["1;2", ";", "@", "(@)", "\\_"]),
            "(1) (2)"
        );
    }

    #[test]
    fn lstmap_legacy_sort_sorts_output() {
        assert_eq!(
            call(LSTMAP, lstmap, &["b,c,a", ",", "x", "z-x", "/", "sort", "desc"]),
            "z-c/z-b/z-a"
        );
    }

    #[test]
    fn lstmaptemp_formats_calls() {
        assert_eq!(
            call(LSTMAPTEMP, lstmaptemp, &["a,b", "T", ",", "\\_"]),
            "{{T|1=a|index=1}} {{T|1=b|index=2}}"
        );
    }

    #[test]
    fn lstmaptemp_without_template_is_identity() {
        assert_eq!(call(LSTMAPTEMP, lstmaptemp, &["a,b", ""]), "a, b");
    }

    #[test]
    fn listmap_with_index_token() {
        assert_eq!(
            call(
                LISTMAP,
                listmap,
                &["c,a,b", "token=v", "indextoken=#", "pattern=#.v", "sortmode=sort"]
            ),
            "1.a, 2.b, 3.c"
        );
    }

    #[test]
    fn listmap_postsort_without_index_token() {
        assert_eq!(
            call(
                LISTMAP,
                listmap,
                &["c,a,b", "token=v", "pattern=v!", "sortmode=sort", "sortoptions=desc"]
            ),
            "c!, b!, a!"
        );
    }

    #[test]
    fn listmap_strip_duplicates() {
        assert_eq!(
            call(
                LISTMAP,
                listmap,
                &["a,b,a", "token=v", "pattern=x", "duplicates=poststrip"]
            ),
            "x"
        );
        assert_eq!(
            call(LISTMAP, listmap, &["a,b,a", "token=v", "pattern=x"]),
            "x, x, x"
        );
    }

    #[test]
    fn listmap_without_operation_keeps_values() {
        assert_eq!(
            call(LISTMAP, listmap, &["b,a", "sortmode=postsort", "outconj=\\_and\\_"]),
            "a and b"
        );
    }

    #[test]
    fn listmap_intro_outro() {
        assert_eq!(
            call(
                LISTMAP,
                listmap,
                &["a,b", "token=v", "pattern=<v>", "intro=N items:\\_", "counttoken=N"]
            ),
            "2 items: <a>, <b>"
        );
    }
}
