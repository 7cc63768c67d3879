//! Statement emission.

use objj_diagnostic::{Diagnostic, ErrorCode, FatalError};
use objj_ir::{
    Block, Expr, ExprKind, ForInit, Function, Ident, Import, Span, Stmt, StmtKind, SwitchCase,
    VarDeclarator,
};

use super::CodeGenerator;
use crate::options::WarningCategories;
use crate::registry::{ClassDef, ClassKind};
use crate::scope::{BindingKind, ScopeKind};
use crate::sink::{CodeSink, FormatRule};
use crate::stack::ensure_sufficient_stack;

impl CodeGenerator<'_> {
    pub(super) fn statement<S: CodeSink>(&mut self, out: &mut S, stmt: &Stmt) -> Result<(), FatalError> {
        ensure_sufficient_stack(|| self.statement_inner(out, stmt))
    }

    fn statement_inner<S: CodeSink>(&mut self, out: &mut S, stmt: &Stmt) -> Result<(), FatalError> {
        let span = stmt.span;
        match &stmt.kind {
            StmtKind::Empty => out.concat_node(";", span),
            StmtKind::Expr(expr) => {
                self.expression_statement(out, expr)?;
                out.concat(";");
            }
            StmtKind::Block(block) => self.block(out, block)?,
            StmtKind::Var(decls) => {
                self.var_declarations(out, decls, span)?;
                out.concat(";");
            }
            StmtKind::Function(func) => self.function(out, func, true)?,
            StmtKind::Return(value) => {
                out.concat_node("return", span);
                if let Some(value) = value {
                    out.concat(" ");
                    self.expr(out, value)?;
                }
                out.concat(";");
            }
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => self.if_statement(out, test, consequent, alternate.as_deref(), span)?,
            StmtKind::While { test, body } => {
                out.concat_node("while", span);
                self.parenthesized_head(out, test)?;
                self.dependent(out, body)?;
            }
            StmtKind::DoWhile { body, test } => {
                out.concat_node("do", span);
                self.dependent(out, body)?;
                if matches!(body.kind, StmtKind::Block(_)) {
                    out.concat(" ");
                } else {
                    out.concat_format(FormatRule::Newline);
                }
                out.concat("while");
                self.parenthesized_head(out, test)?;
                out.concat(";");
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => self.for_statement(out, init.as_ref(), test.as_ref(), update.as_ref(), body, span)?,
            StmtKind::ForIn { left, right, body } => {
                out.concat_node("for", span);
                out.concat_format(FormatRule::AfterKeyword);
                out.concat("(");
                self.for_init(out, left)?;
                out.concat(" in ");
                self.expr(out, right)?;
                out.concat(")");
                self.dependent(out, body)?;
            }
            StmtKind::Labeled { label, body } => {
                out.concat_node(&label.name, label.span);
                out.concat(":");
                out.concat_format(FormatRule::Colon);
                self.statement(out, body)?;
            }
            StmtKind::Break(label) => Self::jump(out, "break", label.as_ref(), span),
            StmtKind::Continue(label) => Self::jump(out, "continue", label.as_ref(), span),
            StmtKind::Switch {
                discriminant,
                cases,
            } => self.switch_statement(out, discriminant, cases, span)?,
            StmtKind::Throw(value) => {
                out.concat_node("throw ", span);
                self.expr(out, value)?;
                out.concat(";");
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                out.concat_node("try", span);
                out.concat_format(FormatRule::BeforeLeftBrace);
                self.block(out, block)?;
                if let Some(handler) = handler {
                    out.concat_format(FormatRule::BeforeCatch);
                    out.concat("catch");
                    out.concat_format(FormatRule::AfterKeyword);
                    out.concat("(");
                    out.concat_node(&handler.param.name, handler.param.span);
                    out.concat(")");
                    out.concat_format(FormatRule::BeforeLeftBrace);

                    self.scopes.open(ScopeKind::Catch);
                    self.scopes
                        .declare(&handler.param.name, BindingKind::LocalVar, handler.param.span);
                    self.block(out, &handler.body)?;
                    self.scopes.close_into_parent();
                }
                if let Some(finalizer) = finalizer {
                    out.concat_format(FormatRule::BeforeFinally);
                    out.concat("finally");
                    out.concat_format(FormatRule::BeforeLeftBrace);
                    self.block(out, finalizer)?;
                }
            }
            StmtKind::With { object, body } => {
                out.concat_node("with", span);
                self.parenthesized_head(out, object)?;
                self.dependent(out, body)?;
            }
            StmtKind::Debugger => {
                out.concat_node("debugger;", span);
                if self.warns_about(WarningCategories::DEBUGGER) {
                    self.report(
                        Diagnostic::warning(ErrorCode::W3001)
                            .with_message("debugger statement")
                            .with_label(span, "remove before shipping"),
                    );
                }
            }

            StmtKind::Class(decl) => self.class_declaration(out, decl)?,
            StmtKind::Protocol(decl) => self.protocol_declaration(out, decl)?,
            StmtKind::Method(_) => {
                return Err(FatalError::new(
                    ErrorCode::E4002,
                    span,
                    "method declaration outside of @implementation or @protocol",
                ));
            }
            StmtKind::Import(import) => Self::import(out, import, span),
            StmtKind::ClassForward(name) => self.class_forward(out, name),
            StmtKind::GlobalForward(name) => {
                self.scopes
                    .declare_file_level(&name.name, BindingKind::GlobalDecl, name.span);
                out.concat_node(&format!("// @global {}", name.name), name.span);
            }
        }
        Ok(())
    }

    /// `{`, one statement per line, `}`.
    pub(super) fn block<S: CodeSink>(&mut self, out: &mut S, block: &Block) -> Result<(), FatalError> {
        self.scopes.open(ScopeKind::Block);
        out.concat_node("{", block.span);
        out.indent();
        for stmt in &block.body {
            out.concat_format(FormatRule::Newline);
            self.statement(out, stmt)?;
        }
        out.dedent();
        out.concat_format(FormatRule::Newline);
        out.concat("}");
        self.scopes.close_into_parent();
        Ok(())
    }

    /// Body of `if`/`while`/`for`/`with`: a block on the same line, any
    /// other statement indented on the next.
    fn dependent<S: CodeSink>(&mut self, out: &mut S, body: &Stmt) -> Result<(), FatalError> {
        if let StmtKind::Block(block) = &body.kind {
            out.concat_format(FormatRule::BeforeLeftBrace);
            return self.block(out, block);
        }
        out.indent();
        out.concat_format(FormatRule::Newline);
        self.statement(out, body)?;
        out.dedent();
        Ok(())
    }

    fn parenthesized_head<S: CodeSink>(&mut self, out: &mut S, expr: &Expr) -> Result<(), FatalError> {
        out.concat_format(FormatRule::AfterKeyword);
        out.concat("(");
        self.expr(out, expr)?;
        out.concat(")");
        Ok(())
    }

    fn expression_statement<S: CodeSink>(&mut self, out: &mut S, expr: &Expr) -> Result<(), FatalError> {
        // A leading `function` or `{` would parse as a declaration or block.
        if matches!(expr.kind, ExprKind::Function(_) | ExprKind::Object(_)) {
            out.concat("(");
            self.expr(out, expr)?;
            out.concat(")");
            return Ok(());
        }
        self.expr(out, expr)
    }

    fn if_statement<S: CodeSink>(
        &mut self,
        out: &mut S,
        test: &Expr,
        consequent: &Stmt,
        alternate: Option<&Stmt>,
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node("if", span);
        self.parenthesized_head(out, test)?;
        self.dependent(out, consequent)?;

        let Some(alternate) = alternate else {
            return Ok(());
        };
        if matches!(consequent.kind, StmtKind::Block(_)) {
            out.concat_format(FormatRule::BeforeElse);
        } else {
            out.concat_format(FormatRule::Newline);
        }
        out.concat("else");
        if matches!(alternate.kind, StmtKind::If { .. }) {
            out.concat(" ");
            self.statement(out, alternate)
        } else {
            self.dependent(out, alternate)
        }
    }

    fn for_statement<S: CodeSink>(
        &mut self,
        out: &mut S,
        init: Option<&ForInit>,
        test: Option<&Expr>,
        update: Option<&Expr>,
        body: &Stmt,
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node("for", span);
        out.concat_format(FormatRule::AfterKeyword);
        out.concat("(");
        if let Some(init) = init {
            self.for_init(out, init)?;
        }
        out.concat(";");
        if let Some(test) = test {
            out.concat_format(FormatRule::ForSeparator);
            self.expr(out, test)?;
        }
        out.concat(";");
        if let Some(update) = update {
            out.concat_format(FormatRule::ForSeparator);
            self.expr(out, update)?;
        }
        out.concat(")");
        self.dependent(out, body)
    }

    fn for_init<S: CodeSink>(&mut self, out: &mut S, init: &ForInit) -> Result<(), FatalError> {
        match init {
            ForInit::Var(decls, span) => self.var_declarations(out, decls, *span),
            ForInit::Expr(expr) if expr.as_ident().is_some() => self.assignment_target(out, expr),
            ForInit::Expr(expr) => self.expr(out, expr),
        }
    }

    fn switch_statement<S: CodeSink>(
        &mut self,
        out: &mut S,
        discriminant: &Expr,
        cases: &[SwitchCase],
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node("switch", span);
        self.parenthesized_head(out, discriminant)?;
        out.concat_format(FormatRule::BeforeLeftBrace);
        out.concat("{");

        for (i, case) in cases.iter().enumerate() {
            out.concat_format(FormatRule::Newline);
            if let Some(test) = &case.test {
                out.concat_node("case ", case.span);
                self.expr(out, test)?;
                out.concat(":");
            } else {
                out.concat_node("default:", case.span);
            }

            if case.consequent.is_empty() {
                continue;
            }
            out.indent();
            for stmt in &case.consequent {
                out.concat_format(FormatRule::Newline);
                self.statement(out, stmt)?;
            }
            out.dedent();
            if i + 1 < cases.len() {
                out.concat_format(FormatRule::BetweenCaseBlocks);
            }
        }

        out.concat_format(FormatRule::Newline);
        out.concat("}");
        Ok(())
    }

    fn jump<S: CodeSink>(out: &mut S, keyword: &str, label: Option<&Ident>, span: Span) {
        out.concat_node(keyword, span);
        if let Some(label) = label {
            out.concat(" ");
            out.concat_node(&label.name, label.span);
        }
        out.concat(";");
    }

    /// `var a = 1, b` without the terminating semicolon.
    pub(super) fn var_declarations<S: CodeSink>(
        &mut self,
        out: &mut S,
        decls: &[VarDeclarator],
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node("var ", span);
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                out.concat_comma();
            }
            self.declare_variable(&decl.id);
            out.concat_node(&decl.id.name, decl.id.span);
            if let Some(init) = &decl.init {
                out.concat_operator("=");
                self.expr(out, init)?;
            }
        }
        Ok(())
    }

    /// Function declaration (`declaration`) or expression.
    pub(super) fn function<S: CodeSink>(
        &mut self,
        out: &mut S,
        func: &Function,
        declaration: bool,
    ) -> Result<(), FatalError> {
        let name = func.id.as_ref();
        if declaration {
            if let Some(id) = name {
                self.scopes
                    .declare_hoisted(&id.name, BindingKind::Function, id.span);
            }
        }

        match name {
            Some(id) if self.options.transform_named_function_to_assignment => {
                out.concat_node(&id.name, id.span);
                out.concat_operator("=");
                out.concat_node("function", func.span);
            }
            Some(id) => {
                out.concat_node("function ", func.span);
                out.concat_node(&id.name, id.span);
            }
            None => out.concat_node("function", func.span),
        }

        out.concat("(");
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                out.concat_comma();
            }
            out.concat_node(&param.name, param.span);
        }
        out.concat(")");
        out.concat_format(FormatRule::BeforeLeftBrace);

        self.scopes.open(ScopeKind::Function {
            name: name.map_or_else(|| "<anonymous>".to_string(), |id| id.name.clone()),
        });
        if !declaration {
            if let Some(id) = name {
                self.scopes.declare(&id.name, BindingKind::FunctionName, id.span);
            }
        }
        for param in &func.params {
            self.scopes.declare(&param.name, BindingKind::Argument, param.span);
        }
        self.function_body(out, &func.body)?;
        self.scopes.close_into_parent();
        Ok(())
    }

    fn import<S: CodeSink>(out: &mut S, import: &Import, span: Span) {
        let local = if import.local { "YES" } else { "NO" };
        out.concat_node(
            &format!("objj_executeFile(\"{}\", {local});", import.path),
            span,
        );
    }

    /// `@class Name`: a forward class usable as a superclass or receiver.
    fn class_forward<S: CodeSink>(&mut self, out: &mut S, name: &Ident) {
        if !self.registry.is_class(&name.name) {
            self.registry
                .add_class(ClassDef::new(&name.name, None, ClassKind::Forward, name.span));
        }
        self.scopes
            .declare_file_level(&name.name, BindingKind::ClassDecl, name.span);
        out.concat_node(&format!("// @class {}", name.name), name.span);
    }
}
