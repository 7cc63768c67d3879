use super::*;
use crate::build;
use crate::Span;
use pretty_assertions::assert_eq;

#[test]
fn test_binary_precedence_scale() {
    assert!(BinaryOp::Mul.precedence() < BinaryOp::Add.precedence());
    assert!(BinaryOp::Add.precedence() < BinaryOp::Shl.precedence());
    assert_eq!(BinaryOp::In.precedence(), BinaryOp::Lt.precedence());
    assert!(BinaryOp::BitOr.precedence() < LogicalOp::And.precedence());
    assert!(LogicalOp::And.precedence() < LogicalOp::Or.precedence());
}

#[test]
fn test_word_operators() {
    assert!(UnaryOp::TypeOf.is_word());
    assert!(UnaryOp::Delete.is_word());
    assert!(!UnaryOp::Not.is_word());
    assert!(BinaryOp::InstanceOf.is_word());
    assert!(!BinaryOp::Add.is_word());
}

#[test]
fn test_assign_symbol() {
    assert_eq!(AssignOp::Assign.as_symbol(), "=");
    assert_eq!(AssignOp::Compound(BinaryOp::UShr).as_symbol(), ">>>=");
}

#[test]
fn test_update_steps() {
    assert_eq!(UpdateOp::Increment.step_symbol(), "+");
    assert_eq!(UpdateOp::Increment.inverse_step_symbol(), "-");
    assert_eq!(UpdateOp::Decrement.as_symbol(), "--");
}

#[test]
fn test_send_builder_fragments() {
    let expr = build::send(build::ident("x"), "insert:atIndex:", vec![build::num(1), build::num(2)]);
    let ExprKind::MessageSend(send) = expr.kind else {
        panic!("expected message send");
    };
    let names: Vec<_> = send
        .selectors
        .iter()
        .map(|s| s.as_ref().map(|id| id.name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("insert"), Some("atIndex")]);
}

#[test]
fn test_send_builder_missing_fragment() {
    let expr = build::send(build::ident("x"), "a::", vec![build::num(1), build::num(2)]);
    let ExprKind::MessageSend(send) = expr.kind else {
        panic!("expected message send");
    };
    assert_eq!(send.selectors.len(), 2);
    assert!(send.selectors[1].is_none());
}

#[test]
fn test_return_type_span_falls_back_to_selector() {
    let mut decl = build::MethodBuilder::instance("foo").span(0, 40).decl();
    decl.selectors[0] = Some(build::id_at("foo", 3, 6));
    assert_eq!(decl.return_type_span(), Span::new(3, 6));
}

#[test]
fn test_expr_as_ident() {
    assert_eq!(build::ident("self").as_ident(), Some("self"));
    assert!(build::this().as_ident().is_none());
    assert!(build::ident("a").is_ident("a"));
}
