use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_len_of_ident_span() {
    let span = Span::new(10, 16);
    assert_eq!(span.len(), 6);
    assert!(!span.is_empty());
}

#[test]
fn test_dummy_is_empty() {
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::DUMMY.len(), 0);
}

#[test]
fn test_to_covers_both() {
    let receiver = Span::new(1, 4);
    let keyword = Span::new(12, 20);
    assert_eq!(receiver.to(keyword), Span::new(1, 20));
    assert_eq!(keyword.to(receiver), Span::new(1, 20));
}

#[test]
fn test_debug_matches_display() {
    let span = Span::new(3, 9);
    assert_eq!(format!("{span:?}"), "3..9");
    assert_eq!(span.to_string(), "3..9");
}

#[test]
fn test_ordering_by_start_then_end() {
    let mut spans = vec![Span::new(20, 21), Span::new(4, 30), Span::new(4, 5)];
    spans.sort();
    assert_eq!(spans, vec![Span::new(4, 5), Span::new(4, 30), Span::new(20, 21)]);
}
