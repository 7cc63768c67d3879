use super::*;

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("hello", "hello"), 0);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("", "ab"), 2);
}

#[test]
fn test_case_insensitive_match() {
    let classes = ["CPString", "CPArray"];
    assert_eq!(suggest_class("cpstring", classes.iter().copied()), Some("CPString"));
}

#[test]
fn test_typo_match() {
    let classes = ["CPString", "CPArray", "CPDictionary"];
    assert_eq!(suggest_class("CPStrng", classes.iter().copied()), Some("CPString"));
    assert_eq!(suggest_class("CPAray", classes.iter().copied()), Some("CPArray"));
}

#[test]
fn test_no_match_when_too_different() {
    let classes = ["CPString", "CPArray"];
    assert_eq!(suggest_class("window", classes.iter().copied()), None);
    assert_eq!(suggest_class("", classes.iter().copied()), None);
}

#[test]
fn test_ties_break_alphabetically() {
    let classes = ["Foz", "Fox"];
    assert_eq!(suggest_class("Foo", classes.iter().copied()), Some("Fox"));
}
