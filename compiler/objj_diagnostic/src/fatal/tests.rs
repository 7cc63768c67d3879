use super::*;

#[test]
fn test_fatal_error_display() {
    let err = FatalError::new(ErrorCode::E4003, Span::new(12, 20), "superclass 'CPObjekt' not found");
    assert_eq!(err.to_string(), "E4003: superclass 'CPObjekt' not found");
}

#[test]
fn test_fatal_error_to_diagnostic() {
    let err = FatalError::new(ErrorCode::E4001, Span::new(3, 4), "duplicate protocol 'P'");
    let diag = err.to_diagnostic();
    assert!(diag.is_fatal());
    assert_eq!(diag.code, ErrorCode::E4001);
    assert_eq!(diag.primary_span(), Some(Span::new(3, 4)));
    assert_eq!(diag.message, "duplicate protocol 'P'");
}

#[test]
fn test_fatal_error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&FatalError::internal(Span::DUMMY, "broken invariant"));
}
