//! Expression nodes.

use super::{AssignOp, BinaryOp, Function, Ident, LogicalOp, UnaryOp, UpdateOp};
use crate::{Span, Spanned};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The identifier name if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.as_ident() == Some(name)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Bare identifier reference.
    Ident(String),
    This,
    /// Literal token as written, e.g. `42`, `"text"`, `@"text"`, `/re/g`, `null`.
    Literal(String),
    /// `[a, , b]`; `None` marks an elision.
    Array(Vec<Option<Expr>>),
    /// `{ key: value }`.
    Object(Vec<Property>),
    Function(Box<Function>),
    /// `(a, b)`.
    Sequence(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: MemberProperty,
    },

    /// `[receiver sel:arg ...]`.
    MessageSend(Box<MessageSend>),
    /// `@[a, b]`.
    ArrayLiteral(Vec<Expr>),
    /// `@{ key: value }`.
    DictionaryLiteral(Vec<DictionaryEntry>),
    /// `@selector(a:b:)`, holding the selector text.
    SelectorLiteral(String),
    /// `@protocol(Name)`.
    ProtocolLiteral(Ident),
    /// `@ref(x)`.
    Reference(Ident),
    /// `@deref(r)`.
    Dereference(Box<Expr>),
}

/// Right-hand side of a member access.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberProperty {
    /// `object.name`
    Named(Ident),
    /// `object[expr]`
    Computed(Box<Expr>),
}

/// Object literal key.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKey {
    Ident(Ident),
    /// String or number literal, as written.
    Literal(String, Span),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Receiver of a message send.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Receiver {
    /// The `super` pseudo-reference.
    Super(Span),
    Expr(Expr),
}

/// A bracketed message send.
///
/// `selectors` holds one fragment per keyword argument; a send without
/// arguments has exactly one fragment. A fragment is `None` when the
/// keyword is omitted (`[x :a]`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageSend {
    pub receiver: Receiver,
    pub selectors: Vec<Option<Ident>>,
    pub args: Vec<Expr>,
    /// Trailing comma-separated arguments of a variadic send.
    pub varargs: Vec<Expr>,
}
