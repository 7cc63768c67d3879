//! Terse constructors for synthesizing syntax trees.
//!
//! Used by tests and by tools that generate code without a parser. Every
//! node gets [`Span::DUMMY`] unless an `_at` variant is used.

use crate::ast::{
    Accessors, AssignOp, BinaryOp, Block, ClassDecl, DictionaryEntry, Expr, ExprKind, ForInit,
    Function, Ident, Import, IvarDecl, LogicalOp, MemberProperty, MessageSend, MethodDecl,
    MethodKind, MethodParam, Program, Property, PropertyKey, ProtocolDecl, Receiver, Stmt,
    StmtKind, SwitchCase, TypeRef, UnaryOp, UpdateOp, VarDeclarator,
};
use crate::Span;

const D: Span = Span::DUMMY;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, D)
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, D)
}

pub fn program(body: Vec<Stmt>) -> Program {
    Program { body, span: D }
}

pub fn id(name: &str) -> Ident {
    Ident::new(name, D)
}

pub fn id_at(name: &str, start: u32, end: u32) -> Ident {
    Ident::new(name, Span::new(start, end))
}

// Expressions

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Ident(name.to_string()))
}

pub fn ident_at(name: &str, start: u32, end: u32) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()), Span::new(start, end))
}

pub fn num(value: i64) -> Expr {
    expr(ExprKind::Literal(value.to_string()))
}

/// A double-quoted string literal.
pub fn string(text: &str) -> Expr {
    expr(ExprKind::Literal(format!("\"{text}\"")))
}

pub fn lit(raw: &str) -> Expr {
    expr(ExprKind::Literal(raw.to_string()))
}

pub fn this() -> Expr {
    expr(ExprKind::This)
}

pub fn array(elements: Vec<Expr>) -> Expr {
    expr(ExprKind::Array(elements.into_iter().map(Some).collect()))
}

pub fn object(props: Vec<(&str, Expr)>) -> Expr {
    expr(ExprKind::Object(
        props
            .into_iter()
            .map(|(key, value)| Property {
                key: PropertyKey::Ident(id(key)),
                value,
            })
            .collect(),
    ))
}

pub fn member(object: Expr, name: &str) -> Expr {
    expr(ExprKind::Member {
        object: Box::new(object),
        property: MemberProperty::Named(id(name)),
    })
}

pub fn index(object: Expr, property: Expr) -> Expr {
    expr(ExprKind::Member {
        object: Box::new(object),
        property: MemberProperty::Computed(Box::new(property)),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

pub fn new_expr(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::New {
        callee: Box::new(callee),
        args,
    })
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Logical {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub fn update(op: UpdateOp, prefix: bool, operand: Expr) -> Expr {
    expr(ExprKind::Update {
        op,
        prefix,
        operand: Box::new(operand),
    })
}

pub fn assign(target: Expr, value: Expr) -> Expr {
    expr(ExprKind::Assign {
        op: AssignOp::Assign,
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn compound(op: BinaryOp, target: Expr, value: Expr) -> Expr {
    expr(ExprKind::Assign {
        op: AssignOp::Compound(op),
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    expr(ExprKind::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

pub fn sequence(exprs: Vec<Expr>) -> Expr {
    expr(ExprKind::Sequence(exprs))
}

pub fn func(name: Option<&str>, params: &[&str], body: Vec<Stmt>) -> Function {
    Function {
        id: name.map(id),
        params: params.iter().map(|p| id(p)).collect(),
        body: Block { body, span: D },
        span: D,
    }
}

pub fn func_expr(name: Option<&str>, params: &[&str], body: Vec<Stmt>) -> Expr {
    expr(ExprKind::Function(Box::new(func(name, params, body))))
}

/// Splits `"a:b:"` into keyword fragments; `"foo"` yields one fragment.
fn fragments(selector: &str) -> Vec<Option<Ident>> {
    if !selector.contains(':') {
        return vec![Some(id(selector))];
    }
    selector
        .split(':')
        .take(selector.matches(':').count())
        .map(|part| if part.is_empty() { None } else { Some(id(part)) })
        .collect()
}

/// `[receiver selector:args...]`; the selector is written with colons.
pub fn send(receiver: Expr, selector: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::MessageSend(Box::new(MessageSend {
        receiver: Receiver::Expr(receiver),
        selectors: fragments(selector),
        args,
        varargs: Vec::new(),
    })))
}

pub fn send_varargs(receiver: Expr, selector: &str, args: Vec<Expr>, varargs: Vec<Expr>) -> Expr {
    expr(ExprKind::MessageSend(Box::new(MessageSend {
        receiver: Receiver::Expr(receiver),
        selectors: fragments(selector),
        args,
        varargs,
    })))
}

pub fn super_send(selector: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::MessageSend(Box::new(MessageSend {
        receiver: Receiver::Super(D),
        selectors: fragments(selector),
        args,
        varargs: Vec::new(),
    })))
}

pub fn array_literal(elements: Vec<Expr>) -> Expr {
    expr(ExprKind::ArrayLiteral(elements))
}

pub fn dictionary_literal(entries: Vec<(Expr, Expr)>) -> Expr {
    expr(ExprKind::DictionaryLiteral(
        entries
            .into_iter()
            .map(|(key, value)| DictionaryEntry { key, value })
            .collect(),
    ))
}

pub fn selector_literal(selector: &str) -> Expr {
    expr(ExprKind::SelectorLiteral(selector.to_string()))
}

pub fn protocol_literal(name: &str) -> Expr {
    expr(ExprKind::ProtocolLiteral(id(name)))
}

pub fn reference(name: &str) -> Expr {
    expr(ExprKind::Reference(id(name)))
}

pub fn deref(inner: Expr) -> Expr {
    expr(ExprKind::Dereference(Box::new(inner)))
}

// Statements

pub fn expr_stmt(e: Expr) -> Stmt {
    stmt(StmtKind::Expr(e))
}

pub fn var(name: &str, init: Option<Expr>) -> Stmt {
    stmt(StmtKind::Var(vec![VarDeclarator { id: id(name), init }]))
}

pub fn var_at(name: &str, start: u32, end: u32, init: Option<Expr>) -> Stmt {
    Stmt::new(
        StmtKind::Var(vec![VarDeclarator {
            id: id_at(name, start, end),
            init,
        }]),
        Span::new(start, end),
    )
}

pub fn vars(decls: Vec<(&str, Option<Expr>)>) -> Stmt {
    stmt(StmtKind::Var(
        decls
            .into_iter()
            .map(|(name, init)| VarDeclarator { id: id(name), init })
            .collect(),
    ))
}

pub fn ret(value: Option<Expr>) -> Stmt {
    stmt(StmtKind::Return(value))
}

pub fn block(body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Block(Block { body, span: D }))
}

pub fn if_stmt(test: Expr, consequent: Stmt, alternate: Option<Stmt>) -> Stmt {
    stmt(StmtKind::If {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    })
}

pub fn while_stmt(test: Expr, body: Stmt) -> Stmt {
    stmt(StmtKind::While {
        test,
        body: Box::new(body),
    })
}

pub fn do_while(body: Stmt, test: Expr) -> Stmt {
    stmt(StmtKind::DoWhile {
        body: Box::new(body),
        test,
    })
}

pub fn for_stmt(init: Option<ForInit>, test: Option<Expr>, update: Option<Expr>, body: Stmt) -> Stmt {
    stmt(StmtKind::For {
        init,
        test,
        update,
        body: Box::new(body),
    })
}

pub fn for_var(name: &str, init: Expr) -> ForInit {
    ForInit::Var(
        vec![VarDeclarator {
            id: id(name),
            init: Some(init),
        }],
        D,
    )
}

pub fn for_in(left: ForInit, right: Expr, body: Stmt) -> Stmt {
    stmt(StmtKind::ForIn {
        left,
        right,
        body: Box::new(body),
    })
}

pub fn labeled(label: &str, body: Stmt) -> Stmt {
    stmt(StmtKind::Labeled {
        label: id(label),
        body: Box::new(body),
    })
}

pub fn break_stmt(label: Option<&str>) -> Stmt {
    stmt(StmtKind::Break(label.map(id)))
}

pub fn continue_stmt(label: Option<&str>) -> Stmt {
    stmt(StmtKind::Continue(label.map(id)))
}

pub fn switch(discriminant: Expr, cases: Vec<(Option<Expr>, Vec<Stmt>)>) -> Stmt {
    stmt(StmtKind::Switch {
        discriminant,
        cases: cases
            .into_iter()
            .map(|(test, consequent)| SwitchCase {
                test,
                consequent,
                span: D,
            })
            .collect(),
    })
}

pub fn throw(value: Expr) -> Stmt {
    stmt(StmtKind::Throw(value))
}

pub fn try_stmt(
    body: Vec<Stmt>,
    handler: Option<(&str, Vec<Stmt>)>,
    finalizer: Option<Vec<Stmt>>,
) -> Stmt {
    stmt(StmtKind::Try {
        block: Block { body, span: D },
        handler: handler.map(|(param, body)| crate::ast::CatchClause {
            param: id(param),
            body: Block { body, span: D },
        }),
        finalizer: finalizer.map(|body| Block { body, span: D }),
    })
}

pub fn debugger() -> Stmt {
    stmt(StmtKind::Debugger)
}

pub fn function_decl(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Function(Box::new(func(Some(name), params, body))))
}

pub fn import(path: &str, local: bool) -> Stmt {
    stmt(StmtKind::Import(Import {
        path: path.to_string(),
        local,
    }))
}

pub fn class_forward(name: &str) -> Stmt {
    stmt(StmtKind::ClassForward(id(name)))
}

pub fn global_forward(name: &str) -> Stmt {
    stmt(StmtKind::GlobalForward(id(name)))
}

// Types

/// An object class type such as `CPString`.
pub fn class_ty(name: &str) -> TypeRef {
    TypeRef {
        name: name.to_string(),
        protocols: Vec::new(),
        is_class: true,
        span: D,
    }
}

/// A primitive or otherwise non-class type such as `int`.
pub fn prim_ty(name: &str) -> TypeRef {
    TypeRef {
        name: name.to_string(),
        protocols: Vec::new(),
        is_class: false,
        span: D,
    }
}

pub fn id_ty() -> TypeRef {
    prim_ty(crate::ast::DYNAMIC_TYPE)
}

/// `id<P, ...>`
pub fn qualified_id_ty(protocols: &[&str]) -> TypeRef {
    TypeRef {
        protocols: protocols.iter().map(|p| id(p)).collect(),
        ..id_ty()
    }
}

pub fn ivar(ty: TypeRef, name: &str) -> IvarDecl {
    IvarDecl {
        ty,
        name: id(name),
        accessors: None,
        outlet: false,
        span: D,
    }
}

pub fn ivar_at(ty: TypeRef, name: &str, start: u32, end: u32) -> IvarDecl {
    IvarDecl {
        ty,
        name: id_at(name, start, end),
        accessors: None,
        outlet: false,
        span: Span::new(start, end),
    }
}

pub fn ivar_with_accessors(ty: TypeRef, name: &str, accessors: Accessors) -> IvarDecl {
    IvarDecl {
        accessors: Some(accessors),
        ..ivar(ty, name)
    }
}

/// Builder for [`MethodDecl`].
#[derive(Clone, Debug)]
pub struct MethodBuilder {
    decl: MethodDecl,
}

impl MethodBuilder {
    fn new(kind: MethodKind, selector: &str) -> Self {
        MethodBuilder {
            decl: MethodDecl {
                kind,
                return_type: None,
                action: false,
                selectors: fragments(selector),
                params: Vec::new(),
                variadic: false,
                body: Some(Block::default()),
                span: D,
            },
        }
    }

    pub fn instance(selector: &str) -> Self {
        Self::new(MethodKind::Instance, selector)
    }

    pub fn class(selector: &str) -> Self {
        Self::new(MethodKind::Class, selector)
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.decl.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn action(mut self) -> Self {
        self.decl.action = true;
        self
    }

    #[must_use]
    pub fn param(mut self, ty: Option<TypeRef>, name: &str) -> Self {
        self.decl.params.push(MethodParam { ty, name: id(name) });
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.decl.variadic = true;
        self
    }

    #[must_use]
    pub fn body(mut self, body: Vec<Stmt>) -> Self {
        self.decl.body = Some(Block { body, span: D });
        self
    }

    /// Protocol declarations carry no body.
    #[must_use]
    pub fn no_body(mut self) -> Self {
        self.decl.body = None;
        self
    }

    #[must_use]
    pub fn span(mut self, start: u32, end: u32) -> Self {
        self.decl.span = Span::new(start, end);
        self
    }

    pub fn decl(self) -> MethodDecl {
        self.decl
    }

    pub fn stmt(self) -> Stmt {
        let span = self.decl.span;
        Stmt::new(StmtKind::Method(Box::new(self.decl)), span)
    }
}

/// Builder for [`ClassDecl`].
#[derive(Clone, Debug)]
pub struct ClassBuilder {
    decl: ClassDecl,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        ClassBuilder {
            decl: ClassDecl {
                name: id(name),
                superclass: None,
                category: None,
                protocols: Vec::new(),
                ivars: Vec::new(),
                body: Vec::new(),
                span: D,
            },
        }
    }

    #[must_use]
    pub fn name_span(mut self, start: u32, end: u32) -> Self {
        self.decl.name.span = Span::new(start, end);
        self
    }

    #[must_use]
    pub fn superclass(mut self, name: &str) -> Self {
        self.decl.superclass = Some(id(name));
        self
    }

    #[must_use]
    pub fn category(mut self, name: &str) -> Self {
        self.decl.category = Some(id(name));
        self
    }

    #[must_use]
    pub fn protocol(mut self, name: &str) -> Self {
        self.decl.protocols.push(id(name));
        self
    }

    #[must_use]
    pub fn ivar(mut self, ivar: IvarDecl) -> Self {
        self.decl.ivars.push(ivar);
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.decl.body.push(method.stmt());
        self
    }

    #[must_use]
    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.decl.body.push(stmt);
        self
    }

    pub fn decl(self) -> ClassDecl {
        self.decl
    }

    pub fn build(self) -> Stmt {
        let span = self.decl.span;
        Stmt::new(StmtKind::Class(Box::new(self.decl)), span)
    }
}

/// Builder for [`ProtocolDecl`].
#[derive(Clone, Debug)]
pub struct ProtocolBuilder {
    decl: ProtocolDecl,
}

impl ProtocolBuilder {
    pub fn new(name: &str) -> Self {
        ProtocolBuilder {
            decl: ProtocolDecl {
                name: id(name),
                protocols: Vec::new(),
                required: Vec::new(),
                optional: Vec::new(),
                span: D,
            },
        }
    }

    #[must_use]
    pub fn name_span(mut self, start: u32, end: u32) -> Self {
        self.decl.name.span = Span::new(start, end);
        self
    }

    #[must_use]
    pub fn inherits(mut self, name: &str) -> Self {
        self.decl.protocols.push(id(name));
        self
    }

    #[must_use]
    pub fn required(mut self, method: MethodBuilder) -> Self {
        self.decl.required.push(method.no_body().decl());
        self
    }

    #[must_use]
    pub fn optional(mut self, method: MethodBuilder) -> Self {
        self.decl.optional.push(method.no_body().decl());
        self
    }

    pub fn build(self) -> Stmt {
        let span = self.decl.span;
        Stmt::new(StmtKind::Protocol(Box::new(self.decl)), span)
    }
}
