//! Syntax tree.
//!
//! A closed set of node types: every statement is a [`Stmt`] carrying a
//! [`StmtKind`], every expression an [`Expr`] carrying an [`ExprKind`].
//! Nodes are produced by the parser and read-only to the generator.

mod decl;
mod expr;
mod operators;
mod stmt;

pub use decl::{
    Accessors, ClassDecl, Function, Ident, IvarDecl, MethodDecl, MethodKind, MethodParam,
    Program, ProtocolDecl, TypeRef, DYNAMIC_TYPE,
};
pub use expr::{
    DictionaryEntry, Expr, ExprKind, MemberProperty, MessageSend, Property, PropertyKey, Receiver,
};
pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};
pub use stmt::{Block, CatchClause, ForInit, Import, Stmt, StmtKind, SwitchCase, VarDeclarator};

#[cfg(test)]
mod tests;
