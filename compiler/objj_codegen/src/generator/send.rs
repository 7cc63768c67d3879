//! Message-send lowering.
//!
//! `[recv sel:a with:b]` becomes a call through the receiver's class,
//! `recv.isa.objj_msgSend2(recv, "sel:with:", a, b)`, guarded against a
//! null receiver. Receivers that are not plain identifiers are evaluated
//! once into a `___rN` temporary:
//!
//! ```text
//! ((___r1 = f()), ___r1 === null ? null : ___r1.isa.objj_msgSend0(___r1, "sel"))
//! ```
//!
//! `super` sends go through `objj_msgSendSuper` with the superclass of the
//! class being implemented.

use objj_diagnostic::{Diagnostic, ErrorCode, FatalError};
use objj_ir::{Expr, MessageSend, MethodKind, Receiver, Span};

use super::CodeGenerator;
use crate::scope::BindingKind;
use crate::selector;
use crate::sink::CodeSink;

/// Arity-specialized dispatch functions exist for up to this many arguments.
const MAX_SPECIALIZED_ARITY: usize = 3;

/// How the receiver is referenced after it has been evaluated.
enum ReceiverForm<S> {
    /// Cached in the temporary with this name.
    Temp(String),
    /// Re-emitted as written, behind a null check.
    Guarded(S),
    /// Known non-null: `self` or a class name.
    Direct(S),
}

impl CodeGenerator<'_> {
    pub(super) fn message_send<S: CodeSink>(
        &mut self,
        out: &mut S,
        send: &MessageSend,
        span: Span,
    ) -> Result<(), FatalError> {
        let selector = selector::assemble(&send.selectors, send.args.len());
        match &send.receiver {
            Receiver::Super(super_span) => self.super_send(out, send, &selector, *super_span),
            Receiver::Expr(receiver) => {
                // A cached receiver claims its temporary first, so sends
                // nested in the receiver use deeper ones.
                let temp = self.receiver_needs_temp(receiver).then(|| self.temps.acquire());
                let mut fragment = out.fork();
                self.expr(&mut fragment, receiver)?;

                let form = if let Some(temp) = temp {
                    ReceiverForm::Temp(temp)
                } else if self.receiver_is_known_object(receiver) {
                    ReceiverForm::Direct(fragment.clone())
                } else {
                    ReceiverForm::Guarded(fragment.clone())
                };

                match &form {
                    ReceiverForm::Temp(temp) => {
                        out.concat_node(&format!("(({temp} = "), span);
                        out.splice(fragment);
                        out.concat(&format!("), {temp} === null ? null : {temp}"));
                    }
                    ReceiverForm::Guarded(receiver) => {
                        out.concat_node("(", span);
                        out.splice(fragment);
                        out.concat(" == null ? null : ");
                        out.splice(receiver.clone());
                    }
                    ReceiverForm::Direct(_) => out.splice(fragment),
                }

                out.concat(".isa.objj_msgSend");
                let arity = send.args.len() + send.varargs.len();
                if arity <= MAX_SPECIALIZED_ARITY {
                    out.concat(&arity.to_string());
                }
                out.concat("(");
                match &form {
                    ReceiverForm::Temp(temp) => out.concat(temp),
                    ReceiverForm::Guarded(receiver) | ReceiverForm::Direct(receiver) => {
                        out.splice(receiver.clone());
                    }
                }

                let result = self.send_arguments(out, send, &selector);
                match form {
                    ReceiverForm::Temp(_) => {
                        self.temps.release();
                        out.concat("))");
                    }
                    ReceiverForm::Guarded(_) => out.concat("))"),
                    ReceiverForm::Direct(_) => out.concat(")"),
                }
                result
            }
        }
    }

    /// Anything but a bare identifier is evaluated once into a temporary,
    /// as is an identifier that resolves to an ivar.
    fn receiver_needs_temp(&self, receiver: &Expr) -> bool {
        match receiver.as_ident() {
            Some(name) => {
                self.scopes.lookup_local(name).is_none() && self.visible_ivar(name).is_some()
            }
            None => true,
        }
    }

    /// `self` while it still holds the method receiver, or a class name not
    /// hidden by a variable.
    fn receiver_is_known_object(&self, receiver: &Expr) -> bool {
        match receiver.as_ident() {
            Some("self") => self.scopes.self_is_receiver(),
            Some(name) => {
                let unbound = self
                    .scopes
                    .lookup(name)
                    .map_or(true, |b| b.kind == BindingKind::ClassDecl);
                unbound && self.registry.is_class(name)
            }
            None => false,
        }
    }

    /// `, "sel", a, b, ...varargs` without the closing parenthesis.
    fn send_arguments<S: CodeSink>(
        &mut self,
        out: &mut S,
        send: &MessageSend,
        selector: &str,
    ) -> Result<(), FatalError> {
        out.concat(&format!(", \"{selector}\""));
        for arg in send.args.iter().chain(&send.varargs) {
            out.concat(", ");
            self.expr(out, arg)?;
        }
        Ok(())
    }

    fn super_send<S: CodeSink>(
        &mut self,
        out: &mut S,
        send: &MessageSend,
        selector: &str,
        span: Span,
    ) -> Result<(), FatalError> {
        let superclass = match (self.scopes.current_class(), self.scopes.method_kind()) {
            (Some(class), Some(kind)) => {
                let name = &self.registry.class(class).name;
                match kind {
                    MethodKind::Instance => format!("objj_getClass(\"{name}\").super_class"),
                    MethodKind::Class => format!("objj_getMetaClass(\"{name}\").super_class"),
                }
            }
            _ => {
                self.report(
                    Diagnostic::warning(ErrorCode::W2006)
                        .with_message("'super' used outside of a method")
                        .with_label(span, "no enclosing method"),
                );
                "null".to_string()
            }
        };

        out.concat_node(
            &format!("objj_msgSendSuper({{ receiver: self, super_class: {superclass} }}"),
            span,
        );
        self.send_arguments(out, send, selector)?;
        out.concat(")");
        Ok(())
    }
}
