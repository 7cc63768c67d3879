//! Expression emission.

use objj_diagnostic::FatalError;
use objj_ir::{AssignOp, Expr, ExprKind, MemberProperty, PropertyKey};
use tracing::trace;

use super::precedence::needs_parens;
use super::CodeGenerator;
use crate::sink::{CodeSink, FormatRule};
use crate::stack::ensure_sufficient_stack;

impl CodeGenerator<'_> {
    pub(super) fn expr<S: CodeSink>(&mut self, out: &mut S, expr: &Expr) -> Result<(), FatalError> {
        ensure_sufficient_stack(|| self.expr_inner(out, expr))
    }

    /// Emit `child` as an operand of `parent`, parenthesized if needed.
    pub(super) fn operand<S: CodeSink>(
        &mut self,
        out: &mut S,
        parent: &ExprKind,
        child: &Expr,
        right: bool,
    ) -> Result<(), FatalError> {
        if needs_parens(parent, &child.kind, right) {
            out.concat("(");
            self.expr(out, child)?;
            out.concat(")");
            Ok(())
        } else {
            self.expr(out, child)
        }
    }

    fn expr_inner<S: CodeSink>(&mut self, out: &mut S, expr: &Expr) -> Result<(), FatalError> {
        let span = expr.span;
        let kind = &expr.kind;
        match kind {
            ExprKind::Ident(name) => self.identifier(out, name, span),
            ExprKind::This => out.concat_node("this", span),
            // `@"text"` is an ordinary string at run time.
            ExprKind::Literal(raw) => {
                out.concat_verbatim(raw.strip_prefix('@').unwrap_or(raw), span);
            }
            ExprKind::Array(elements) => {
                out.concat_node("[", span);
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.concat_comma();
                    }
                    if let Some(element) = element {
                        self.expr(out, element)?;
                    }
                }
                out.concat("]");
            }
            ExprKind::Object(properties) => {
                out.concat_node("{", span);
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        out.concat_comma();
                    }
                    match &property.key {
                        PropertyKey::Ident(id) => out.concat_node(&id.name, id.span),
                        PropertyKey::Literal(raw, key_span) => out.concat_verbatim(raw, *key_span),
                    }
                    out.concat(":");
                    out.concat_format(FormatRule::Colon);
                    self.expr(out, &property.value)?;
                }
                out.concat("}");
            }
            ExprKind::Function(func) => self.function(out, func, false)?,
            ExprKind::Sequence(exprs) => {
                out.concat_node("(", span);
                self.comma_list(out, exprs)?;
                out.concat(")");
            }
            ExprKind::Unary { op, operand } => {
                out.concat_node(op.as_symbol(), span);
                if op.is_word() {
                    out.concat(" ");
                }
                self.operand(out, kind, operand, false)?;
            }
            ExprKind::Update {
                op,
                prefix,
                operand,
            } => {
                if matches!(operand.kind, ExprKind::Dereference(_)) {
                    return self.dereference_update(out, *op, *prefix, operand);
                }
                if *prefix {
                    out.concat_node(op.as_symbol(), span);
                    self.operand(out, kind, operand, false)?;
                } else {
                    self.operand(out, kind, operand, false)?;
                    out.concat_node(op.as_symbol(), span);
                }
            }
            ExprKind::Binary { op, left, right } => {
                self.operand(out, kind, left, false)?;
                if op.is_word() {
                    out.concat(" ");
                    out.concat(op.as_symbol());
                    out.concat(" ");
                } else {
                    out.concat_operator(op.as_symbol());
                }
                self.operand(out, kind, right, true)?;
            }
            ExprKind::Logical { op, left, right } => {
                self.operand(out, kind, left, false)?;
                out.concat_operator(op.as_symbol());
                self.operand(out, kind, right, true)?;
            }
            ExprKind::Assign { op, target, value } => {
                self.assignment(out, kind, *op, target, value)?;
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.operand(out, kind, test, false)?;
                out.concat_operator("?");
                self.expr(out, consequent)?;
                out.concat_operator(":");
                self.expr(out, alternate)?;
            }
            ExprKind::New { callee, args } => {
                out.concat_node("new ", span);
                self.operand(out, kind, callee, false)?;
                out.concat("(");
                self.comma_list(out, args)?;
                out.concat(")");
            }
            ExprKind::Call { callee, args } => {
                // `eval` may rebind anything, including `self`.
                if callee.is_ident("eval") {
                    self.scopes.mark_self_reassigned();
                }
                self.operand(out, kind, callee, false)?;
                out.concat("(");
                self.comma_list(out, args)?;
                out.concat(")");
            }
            ExprKind::Member { object, property } => {
                self.operand(out, kind, object, false)?;
                match property {
                    MemberProperty::Named(id) => {
                        out.concat(".");
                        out.concat_node(&id.name, id.span);
                    }
                    MemberProperty::Computed(index) => {
                        out.concat("[");
                        self.expr(out, index)?;
                        out.concat("]");
                    }
                }
            }

            ExprKind::MessageSend(send) => {
                trace!(args = send.args.len(), "message send");
                self.message_send(out, send, span)?;
            }
            ExprKind::ArrayLiteral(elements) => self.array_literal(out, elements, span)?,
            ExprKind::DictionaryLiteral(entries) => self.dictionary_literal(out, entries, span)?,
            ExprKind::SelectorLiteral(selector) => {
                out.concat_node(&format!("sel_getUid(\"{selector}\")"), span);
            }
            ExprKind::ProtocolLiteral(name) => {
                out.concat_node(&format!("objj_getProtocol(\"{}\")", name.name), span);
            }
            ExprKind::Reference(name) => Self::reference(out, name, span),
            ExprKind::Dereference(reference) => {
                self.operand(out, kind, reference, false)?;
                out.concat("()");
            }
        }
        Ok(())
    }

    pub(super) fn comma_list<S: CodeSink>(&mut self, out: &mut S, exprs: &[Expr]) -> Result<(), FatalError> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                out.concat_comma();
            }
            self.expr(out, expr)?;
        }
        Ok(())
    }

    /// Emit a bare identifier in assignment position.
    pub(super) fn assignment_target<S: CodeSink>(&mut self, out: &mut S, target: &Expr) -> Result<(), FatalError> {
        self.assigning = true;
        let result = self.expr(out, target);
        self.assigning = false;
        result
    }

    fn assignment<S: CodeSink>(
        &mut self,
        out: &mut S,
        kind: &ExprKind,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
    ) -> Result<(), FatalError> {
        if matches!(target.kind, ExprKind::Dereference(_)) {
            return self.dereference_assignment(out, op, target, value);
        }
        if target.is_ident("self") {
            self.scopes.mark_self_reassigned();
        }

        match target.as_ident() {
            Some(_) => self.assignment_target(out, target)?,
            None => self.operand(out, kind, target, false)?,
        }
        out.concat_operator(&op.as_symbol());
        self.operand(out, kind, value, true)?;

        // File-level assignment to an undeclared name creates a global.
        if let Some(name) = target.as_ident() {
            if !self.scopes.is_local()
                && self.scopes.lookup(name).is_none()
                && !self.globals.contains(name)
            {
                self.registry.add_global(name, target.span);
            }
        }
        Ok(())
    }
}
