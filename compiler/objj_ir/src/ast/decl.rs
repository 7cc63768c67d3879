//! Declarations: functions, classes, protocols, methods and ivars.

use super::{Block, Stmt};
use crate::{Span, Spanned};

/// An identifier occurrence with its location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

/// Function declaration or expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub id: Option<Ident>,
    pub params: Vec<Ident>,
    pub body: Block,
    pub span: Span,
}

/// A declared type, e.g. `int`, `CPString`, `id<Observer>`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    pub name: String,
    /// Protocol qualifiers (`id<P, Q>`).
    pub protocols: Vec<Ident>,
    /// Set by the parser when the type names an object class rather than
    /// a primitive or the dynamic `id` type.
    pub is_class: bool,
    pub span: Span,
}

/// The universal dynamic object type.
pub const DYNAMIC_TYPE: &str = "id";

/// `@accessors(...)` attributes on an ivar.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accessors {
    /// `property=name`: base name for both accessors.
    pub property: Option<String>,
    /// `getter=name`
    pub getter: Option<String>,
    /// `setter=name:`
    pub setter: Option<String>,
    pub readonly: bool,
    /// Explicit `copy` attribute; `None` defers to the declared type.
    pub copy: Option<bool>,
    pub span: Span,
}

/// Instance variable declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IvarDecl {
    pub ty: TypeRef,
    pub name: Ident,
    pub accessors: Option<Accessors>,
    pub outlet: bool,
    pub span: Span,
}

/// `@implementation Name : Super <P> ... @end` or a category
/// `@implementation Name (Category) ... @end`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    pub name: Ident,
    pub superclass: Option<Ident>,
    pub category: Option<Ident>,
    pub protocols: Vec<Ident>,
    pub ivars: Vec<IvarDecl>,
    /// Method declarations interleaved with ordinary statements.
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `@protocol Name <Inherited> ... @end`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolDecl {
    pub name: Ident,
    pub protocols: Vec<Ident>,
    pub required: Vec<MethodDecl>,
    /// Methods after `@optional`.
    pub optional: Vec<MethodDecl>,
    pub span: Span,
}

/// `-` or `+`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodKind {
    Instance,
    Class,
}

impl MethodKind {
    pub const fn sigil(self) -> char {
        match self {
            Self::Instance => '-',
            Self::Class => '+',
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodParam {
    pub ty: Option<TypeRef>,
    pub name: Ident,
}

/// `- (ret)sel:(T)a with:(U)b { ... }`.
///
/// `selectors` follows the message-send convention: one fragment per
/// parameter, exactly one for a method without parameters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub kind: MethodKind,
    pub return_type: Option<TypeRef>,
    /// `@action` methods default to a `void` return type.
    pub action: bool,
    pub selectors: Vec<Option<Ident>>,
    pub params: Vec<MethodParam>,
    /// Trailing `, ...`.
    pub variadic: bool,
    /// Absent for protocol method declarations.
    pub body: Option<Block>,
    pub span: Span,
}

impl MethodDecl {
    /// Span used when reporting on the method's return type.
    pub fn return_type_span(&self) -> Span {
        self.return_type
            .as_ref()
            .map(|ty| ty.span)
            .or_else(|| self.selectors.iter().flatten().next().map(|id| id.span))
            .unwrap_or(self.span)
    }
}

/// A compilation unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}
