//! Parenthesization.
//!
//! Expressions are ranked by kind (how tightly the construct binds as a
//! whole), then binary and logical operators by their operator precedence.
//! Lower numbers bind tighter.

use objj_ir::{BinaryOp, ExprKind, UnaryOp, UpdateOp};

/// Binding level of an expression kind.
///
/// Sequences print their own parentheses and rank with primaries.
pub(crate) fn kind_level(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Ident(_)
        | ExprKind::This
        | ExprKind::Literal(_)
        | ExprKind::Array(_)
        | ExprKind::Object(_)
        | ExprKind::Sequence(_)
        | ExprKind::Call { .. }
        | ExprKind::Member { .. }
        | ExprKind::MessageSend(_)
        | ExprKind::ArrayLiteral(_)
        | ExprKind::DictionaryLiteral(_)
        | ExprKind::SelectorLiteral(_)
        | ExprKind::ProtocolLiteral(_)
        | ExprKind::Dereference(_) => 0,
        ExprKind::New { .. } => 1,
        ExprKind::Function(_) | ExprKind::Reference(_) => 3,
        ExprKind::Unary { .. } | ExprKind::Update { .. } => 4,
        ExprKind::Binary { .. } => 5,
        ExprKind::Logical { .. } => 6,
        ExprKind::Conditional { .. } => 7,
        ExprKind::Assign { .. } => 8,
    }
}

fn operator_precedence(kind: &ExprKind) -> Option<u8> {
    match kind {
        ExprKind::Binary { op, .. } => Some(op.precedence()),
        ExprKind::Logical { op, .. } => Some(op.precedence()),
        _ => None,
    }
}

/// Sign a prefix operator starts with, if doubling it would fuse tokens.
fn leading_sign(kind: &ExprKind) -> Option<char> {
    match kind {
        ExprKind::Unary {
            op: UnaryOp::Neg, ..
        }
        | ExprKind::Update {
            op: UpdateOp::Decrement,
            prefix: true,
            ..
        } => Some('-'),
        ExprKind::Unary {
            op: UnaryOp::Plus, ..
        }
        | ExprKind::Update {
            op: UpdateOp::Increment,
            prefix: true,
            ..
        } => Some('+'),
        _ => None,
    }
}

/// Whether `child` must be parenthesized as an operand of `parent`.
///
/// `right` is set for the right operand of a binary, logical or assignment
/// expression, where equal precedence still needs parentheses to keep
/// left associativity.
pub(crate) fn needs_parens(parent: &ExprKind, child: &ExprKind, right: bool) -> bool {
    // `new (f())()` and `new (f().g)()` must not lose their parentheses.
    if matches!(parent, ExprKind::New { .. }) && callee_chain_has_call(child) {
        return true;
    }

    // The test of a conditional is its only left-hand operand.
    if !right
        && matches!(parent, ExprKind::Conditional { .. })
        && matches!(child, ExprKind::Conditional { .. })
    {
        return true;
    }

    if let (Some(outer), Some(inner)) = (leading_sign(parent), leading_sign(child)) {
        if outer == inner {
            return true;
        }
    }

    let parent_level = kind_level(parent);
    let child_level = kind_level(child);
    if parent_level != child_level {
        return parent_level < child_level;
    }

    match (operator_precedence(parent), operator_precedence(child)) {
        (Some(outer), Some(inner)) => inner > outer || (right && inner == outer),
        _ => false,
    }
}

/// Whether a call appears anywhere along the member chain of a `new` callee.
fn callee_chain_has_call(mut kind: &ExprKind) -> bool {
    loop {
        match kind {
            ExprKind::Call { .. } => return true,
            ExprKind::Member { object, .. } => kind = &object.kind,
            _ => return false,
        }
    }
}

/// Whether `child` must be parenthesized as the right operand of `op`.
pub(crate) fn needs_parens_after(op: BinaryOp, child: &ExprKind) -> bool {
    match kind_level(child) {
        level if level < 5 => false,
        5 => operator_precedence(child).is_some_and(|inner| inner >= op.precedence()),
        _ => true,
    }
}
