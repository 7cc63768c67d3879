use super::*;
use objj_ir::Span;
use proptest::prelude::*;

fn frags(names: &[&str]) -> Vec<Option<Ident>> {
    names
        .iter()
        .map(|n| {
            if n.is_empty() {
                None
            } else {
                Some(Ident::new(*n, Span::DUMMY))
            }
        })
        .collect()
}

#[test]
fn test_unary_selector() {
    assert_eq!(assemble(&frags(&["count"]), 0), "count");
}

#[test]
fn test_keyword_selector() {
    assert_eq!(assemble(&frags(&["insertObject", "atIndex"]), 2), "insertObject:atIndex:");
}

#[test]
fn test_missing_fragments() {
    assert_eq!(assemble(&frags(&["", ""]), 2), "::");
    assert_eq!(assemble(&frags(&["set", ""]), 2), "set::");
}

#[test]
fn test_mangle() {
    assert_eq!(mangle("initWithFrame:style:"), "initWithFrame_style_");
    assert_eq!(mangle("init"), "init");
}

proptest! {
    #[test]
    fn prop_colon_count_matches_argument_count(
        names in prop::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,8}", 1..6)
    ) {
        let fragments = frags(&names.iter().map(String::as_str).collect::<Vec<_>>());
        let selector = assemble(&fragments, names.len());
        prop_assert_eq!(selector.matches(':').count(), names.len());
        prop_assert!(selector.ends_with(':'));
    }

    #[test]
    fn prop_unary_selector_is_fragment_name(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        let fragments = frags(&[name.as_str()]);
        prop_assert_eq!(assemble(&fragments, 0), name);
    }
}
