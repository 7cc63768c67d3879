//! Objective-J literal forms and `@ref` / `@deref`.

use objj_diagnostic::FatalError;
use objj_ir::{AssignOp, DictionaryEntry, Expr, ExprKind, Ident, Span, UpdateOp};

use super::precedence::needs_parens_after;
use super::CodeGenerator;
use crate::sink::{CodeSink, FormatRule};

/// `objj_msgSend(objj_msgSend(Class, "alloc"), ` prefix of a collection literal.
fn alloc_prefix(class: &str) -> String {
    format!("objj_msgSend(objj_msgSend({class}, \"alloc\"), ")
}

impl CodeGenerator<'_> {
    /// `@[a, b]` -> `initWithObjects:count:` on a fresh `CPArray`.
    pub(super) fn array_literal<S: CodeSink>(
        &mut self,
        out: &mut S,
        elements: &[Expr],
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node(&alloc_prefix("CPArray"), span);
        if elements.is_empty() {
            out.concat("\"init\")");
            return Ok(());
        }
        out.concat("\"initWithObjects:count:\", [");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                out.concat(", ");
            }
            self.expr(out, element)?;
        }
        out.concat(&format!("], {})", elements.len()));
        Ok(())
    }

    /// `@{k: v}` -> `initWithObjectsAndKeys:` with each value before its key.
    pub(super) fn dictionary_literal<S: CodeSink>(
        &mut self,
        out: &mut S,
        entries: &[DictionaryEntry],
        span: Span,
    ) -> Result<(), FatalError> {
        out.concat_node(&alloc_prefix("CPDictionary"), span);
        if entries.is_empty() {
            out.concat("\"init\")");
            return Ok(());
        }
        out.concat("\"initWithObjectsAndKeys:\"");
        for entry in entries {
            out.concat(", ");
            self.expr(out, &entry.value)?;
            out.concat(", ");
            self.expr(out, &entry.key)?;
        }
        out.concat(")");
        Ok(())
    }

    /// `@ref(x)`: a getter/setter closure over `x`.
    pub(super) fn reference<S: CodeSink>(out: &mut S, name: &Ident, span: Span) {
        out.concat_node("function(__input)", span);
        out.concat_format(FormatRule::BeforeLeftBrace);
        out.concat("{");
        out.indent();
        out.concat_format(FormatRule::Newline);
        out.concat("if (arguments.length)");
        out.indent();
        out.concat_format(FormatRule::Newline);
        out.concat_node(&format!("return {} = __input;", name.name), name.span);
        out.dedent();
        out.concat_format(FormatRule::Newline);
        out.concat_format(FormatRule::Newline);
        out.concat(&format!("return {};", name.name));
        out.dedent();
        out.concat_format(FormatRule::Newline);
        out.concat("}");
    }

    /// `(r)`: the reference function itself, always parenthesized.
    fn reference_function<S: CodeSink>(&mut self, out: &mut S, target: &Expr) -> Result<(), FatalError> {
        out.concat("(");
        if let ExprKind::Dereference(reference) = &target.kind {
            self.expr(out, reference)?;
        }
        out.concat(")");
        Ok(())
    }

    /// `@deref(r) = v` -> `(r)(v)`; `@deref(r) op= v` -> `(r)(r() op v)`.
    pub(super) fn dereference_assignment<S: CodeSink>(
        &mut self,
        out: &mut S,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
    ) -> Result<(), FatalError> {
        self.reference_function(out, target)?;
        out.concat("(");
        match op {
            AssignOp::Assign => self.expr(out, value)?,
            AssignOp::Compound(binary) => {
                self.expr(out, target)?;
                out.concat_operator(binary.as_symbol());
                if needs_parens_after(binary, &value.kind) {
                    out.concat("(");
                    self.expr(out, value)?;
                    out.concat(")");
                } else {
                    self.expr(out, value)?;
                }
            }
        }
        out.concat(")");
        Ok(())
    }

    /// `++@deref(r)` -> `(r)(r() + 1)`; the postfix form subtracts the step
    /// back out to yield the old value.
    pub(super) fn dereference_update<S: CodeSink>(
        &mut self,
        out: &mut S,
        op: UpdateOp,
        prefix: bool,
        target: &Expr,
    ) -> Result<(), FatalError> {
        if !prefix {
            out.concat("(");
        }
        self.reference_function(out, target)?;
        out.concat("(");
        self.expr(out, target)?;
        out.concat_operator(op.step_symbol());
        out.concat("1)");
        if !prefix {
            out.concat_operator(op.inverse_step_symbol());
            out.concat("1)");
        }
        Ok(())
    }
}
