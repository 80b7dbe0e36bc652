use std::path::Path;

use wikilist::config::Config;
use wikilist::host::{DEPTH_ERROR, Host};

fn host() -> Host {
    let config = Config::from_json(
        r#"{
            "templates": {
                "Row": "<{{{1}}}:{{{2|}}}>",
                "Initial": "{{#lstelem:{{{1}}}|}}",
                "Is_fruit": "{{#if:{{#lstfnd:{{{1}}}|apple,pear}}||remove}}",
                "Same_key": "{{#ifeq:{{{1}}}|{{{3}}}|yes}}",
                "Join_values": "{{{1}}}:{{{2}}}+{{{4}}}",
                "Numbered": "{{{index}}}.{{{1}}}"
            }
        }"#,
        Path::new("test.json"),
    )
    .unwrap();
    Host::from_config(config)
}

fn render(text: &str) -> String {
    host().render(text)
}

#[test]
fn counting_and_selection() {
    assert_eq!(render("{{#lstcnt:a, b, ,c}}"), "3");
    assert_eq!(render("{{#lstcnt:}}"), "0");
    assert_eq!(render("{{#lstelem:a,b,c|,|-1}}"), "c");
    assert_eq!(render("{{#lstelem:a,b,c|,|0}}"), "");
    assert_eq!(render("{{#lstsub:a,b,c,d|,|-|2|2}}"), "b-c");
}

#[test]
fn find_and_index() {
    assert_eq!(render("{{#lstfnd:APPLE|pear,Apple}}"), "Apple");
    assert_eq!(render("{{#lstind:b|a,b,c,b|,|neg desc}}"), "-1");
}

#[test]
fn append_prepend_join() {
    assert_eq!(render("{{#lstapp:a;b|;|c}}"), "a;b;c");
    assert_eq!(render("{{#lstprep:z|;|a;b}}"), "z;a;b");
    assert_eq!(render("{{#lstjoin:a,b|,|c d|\\_|/}}"), "a/b/c/d");
}

#[test]
fn escaped_separators() {
    assert_eq!(render("{{#lstsep:a b c|\\_|\\n}}"), "a\nb\nc");
    assert_eq!(render("{{#lstcnt:x\\_y z|\\_}}"), "2");
    assert_eq!(render("{{#lstelem:x\\_y z|\\_|1}}"), "x y");
}

#[test]
fn arguments_are_expanded_before_use() {
    assert_eq!(render("{{#lstcnt:{{#lstsep:a;b;c|;|,}}}}"), "3");
}

#[test]
fn positional_filters() {
    assert_eq!(render("{{#lstfltr:a,c|,|a,b,C,d}}"), "a, C");
    assert_eq!(render("{{#lstrm:b|a,b,c}}"), "a, c");
}

#[test]
fn listfilter_template_sentinel() {
    assert_eq!(
        render("{{#listfilter:apple,rock,PEAR,tree|template=Is fruit}}"),
        "apple, PEAR"
    );
}

#[test]
fn listunique_modes() {
    assert_eq!(render("{{#listunique:a,A,b}}"), "a, b");
    assert_eq!(render("{{#listunique:a,A,b|uniquecs=cs}}"), "a, A, b");
    assert_eq!(
        render("{{#listunique:apple,avocado,banana|template=Initial}}"),
        "apple, banana"
    );
}

#[test]
fn listsort_modes() {
    assert_eq!(render("{{#listsort:10,9,100|sortoptions=numeric}}"), "9, 10, 100");
    assert_eq!(
        render("{{#listsort:b-2,a-1,c-1|fieldsep=-|token=n,k|pattern=k|subsort=1}}"),
        "a-1, c-1, b-2"
    );
}

#[test]
fn listmap_pattern_and_template() {
    assert_eq!(
        render("{{#listmap:b,a|token=x|pattern=[x]|sortmode=presort|outsep=\\_}}"),
        "[a] [b]"
    );
    assert_eq!(
        render("{{#listmap:x;y|insep=;|template=Numbered}}"),
        "1.x, 2.y"
    );
    assert_eq!(
        render("{{#listmap:k=v,k2=v2|fieldsep=\\e|template=Row}}"),
        "<k:v>, <k2:v2>"
    );
}

#[test]
fn listmap_pattern_can_call_functions() {
    assert_eq!(
        render("{{#listmap:a,b|token=x|pattern=\\{\\{#uc:x\\}\\}|outsep=,}}"),
        "A,B"
    );
}

#[test]
fn legacy_map_functions() {
    assert_eq!(render("{{#lstmap:a,b|,|@|(@)}}"), "(a), (b)");
    assert_eq!(render("{{#lstmaptemp:c,d|Row|,|+}}"), "<c:>+<d:>");
}

#[test]
fn listmerge_with_templates() {
    assert_eq!(
        render(
            "{{#listmerge:a:1,b:2,a:3|fieldsep=:|matchtemplate=Same key|mergetemplate=Join values}}"
        ),
        "a:1+3, b:2"
    );
}

#[test]
fn listmerge_with_patterns() {
    assert_eq!(
        render(
            "{{#listmerge:x-1,y-2,x-3,y-4|fieldsep=-|token1=k1,v1|token2=k2,v2\
             |matchpattern=\\{\\{#ifeq:k1\\!k2\\!yes\\}\\}|mergepattern=k1-v1\\_v2}}"
        ),
        "x-1 3, y-2 4"
    );
}

#[test]
fn extra_unnamed_arguments_are_ignored() {
    assert_eq!(render("{{#listmap:c,b,a|;|x}}"), "c, b, a");
    assert_eq!(render("{{#listsort:|;}}"), "");
}

#[test]
fn output_assembly() {
    assert_eq!(
        render("{{#listsort:c,a,b|outconj=\\_and\\_|intro=#\\_items:\\_|counttoken=#}}"),
        "3 items: a, b and c"
    );
    assert_eq!(render("{{#listfilter:a|remove=a|default=nothing}}"), "nothing");
}

#[test]
fn conditionals_and_case() {
    assert_eq!(render("{{#if: |yes|no}}"), "no");
    assert_eq!(render("{{#ifeq:a|a|same|diff}}"), "same");
    assert_eq!(render("{{#uc:abc}}{{#lc:DEF}}"), "ABCdef");
}

#[test]
fn escape_functions_round_trip() {
    assert_eq!(render("{{#esc:a b}}"), "a\\_b");
    assert_eq!(render("{{#uesc:{{#esc:a b}}}}"), "a b");
}

#[test]
fn missing_template_and_depth() {
    assert_eq!(render("{{Nope}}"), "[[:Template:Nope]]");
    let host = Host::new().with_max_depth(2).with_template("Self", "{{Self}}");
    assert_eq!(host.render("{{Self}}"), DEPTH_ERROR);
}
