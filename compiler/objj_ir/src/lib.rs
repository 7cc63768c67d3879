//! Objective-J IR - syntax tree types
//!
//! This crate contains the data structures shared between the external
//! parser and the code generator:
//! - Spans for source locations
//! - AST nodes (statements, expressions, class/protocol/method declarations)
//! - Operators with their precedence table
//! - A `build` module of terse constructors for synthesized trees
//!
//! Nodes own their children (`Box`/`Vec`) and carry a [`Span`]; the
//! generator never mutates them.

pub mod ast;
pub mod build;
mod span;

pub use ast::{
    Accessors, AssignOp, BinaryOp, Block, CatchClause, ClassDecl, DictionaryEntry, Expr, ExprKind,
    ForInit, Function, Ident, Import, IvarDecl, LogicalOp, MemberProperty, MessageSend,
    MethodDecl, MethodKind, MethodParam, Program, Property, PropertyKey, ProtocolDecl, Receiver,
    Stmt, StmtKind, SwitchCase, TypeRef, UnaryOp, UpdateOp, VarDeclarator, DYNAMIC_TYPE,
};
pub use span::{Span, Spanned};
