//! Method declarations and override checking.

use objj_diagnostic::{Diagnostic, ErrorCode, FatalError};
use objj_ir::{MethodDecl, Span, DYNAMIC_TYPE};
use smallvec::SmallVec;
use tracing::trace;

use super::{type_list, MethodOwner};
use crate::generator::CodeGenerator;
use crate::options::WarningCategories;
use crate::registry::{MethodDef, MethodOrigin};
use crate::scope::{BindingKind, ScopeKind};
use crate::selector;
use crate::sink::{CodeSink, FormatRule};

/// Return and parameter types of a declaration, defaults filled in.
struct Signature {
    types: SmallVec<[String; 4]>,
    spans: SmallVec<[Span; 4]>,
    /// Whether each type names a class, parallel to `types`.
    is_class: SmallVec<[bool; 4]>,
}

impl Signature {
    fn of(decl: &MethodDecl) -> Self {
        let mut signature = Signature {
            types: SmallVec::new(),
            spans: SmallVec::new(),
            is_class: SmallVec::new(),
        };

        let default_return = if decl.action { "void" } else { DYNAMIC_TYPE };
        match &decl.return_type {
            Some(ty) => signature.push(&ty.name, ty.span, ty.is_class),
            None => signature.push(default_return, decl.return_type_span(), false),
        }
        for param in &decl.params {
            match &param.ty {
                Some(ty) => signature.push(&ty.name, ty.span, ty.is_class),
                None => signature.push(DYNAMIC_TYPE, param.name.span, false),
            }
        }
        signature
    }

    fn push(&mut self, ty: &str, span: Span, is_class: bool) {
        self.types.push(ty.to_string());
        self.spans.push(span);
        self.is_class.push(is_class);
    }
}

impl CodeGenerator<'_> {
    /// Compile one method into an `objj_method` entry forked from `base`.
    ///
    /// With `register` set, the signature is added to the owner's method
    /// table after checking it against the declaration it overrides.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = %decl.kind.sigil()))]
    pub(super) fn method_declaration<S: CodeSink>(
        &mut self,
        base: &S,
        decl: &MethodDecl,
        owner: &MethodOwner,
        register: bool,
    ) -> Result<S, FatalError> {
        let selector = selector::assemble(&decl.selectors, decl.params.len());
        let signature = Signature::of(decl);
        trace!(%selector, "method");

        if let Some(ty) = &decl.return_type {
            for protocol in &ty.protocols {
                if self.registry.protocol_id(&protocol.name).is_none() {
                    self.report(undefined_protocol(&protocol.name, protocol.span));
                }
            }
        }

        if self.warns_about(WarningCategories::PARAMETER_TYPES) {
            if let Some(previous) = self.previous_declaration(owner, decl, &selector) {
                self.check_override(&selector, &signature, &previous);
            }
        }

        if register {
            let def = MethodDef {
                selector: selector.clone(),
                types: signature.types.clone(),
                type_spans: signature.spans.clone(),
                span: decl.span,
                origin: MethodOrigin::Declared,
            };
            match owner {
                MethodOwner::Class { id, .. } => {
                    self.registry.class_mut(*id).methods_mut(decl.kind).insert(def);
                }
                MethodOwner::Protocol(id) => {
                    self.registry.protocol_mut(*id).methods_mut(decl.kind).insert(def);
                }
            }
        }

        let mut entry = base.fork();
        entry.concat_node(&format!("new objj_method(sel_getUid(\"{selector}\"), "), decl.span);
        match (owner.function_name(&selector), &decl.body) {
            (Some(name), Some(body)) => {
                entry.concat(&format!("function {name}(self, _cmd"));
                for param in &decl.params {
                    entry.concat_comma();
                    entry.concat_node(&param.name.name, param.name.span);
                }
                entry.concat(")");
                entry.concat_format(FormatRule::BeforeLeftBrace);

                self.scopes.open(ScopeKind::Method {
                    kind: decl.kind,
                    selector: selector.clone(),
                });
                self.scopes.declare("self", BindingKind::Argument, decl.span);
                self.scopes.declare("_cmd", BindingKind::Argument, decl.span);
                for param in &decl.params {
                    self.scopes
                        .declare(&param.name.name, BindingKind::Argument, param.name.span);
                }
                self.function_body(&mut entry, body)?;
                self.scopes.close_into_parent();
            }
            _ => entry.concat("null"),
        }
        entry.concat(&format!(", {})", type_list(signature.types.iter().map(String::as_str))));
        Ok(entry)
    }

    /// The declaration `selector` overrides or implements, if any: the class
    /// chain first, then adopted (or inherited) protocols.
    fn previous_declaration(
        &self,
        owner: &MethodOwner,
        decl: &MethodDecl,
        selector: &str,
    ) -> Option<MethodDef> {
        let found = match owner {
            MethodOwner::Class { id, .. } => self
                .registry
                .lookup_method(*id, decl.kind, selector)
                .or_else(|| {
                    let protocols = &self.registry.class(*id).protocols;
                    self.registry
                        .lookup_protocol_method(protocols, decl.kind, selector)
                }),
            MethodOwner::Protocol(id) => {
                let inherited = &self.registry.protocol(*id).protocols;
                self.registry
                    .lookup_protocol_method(inherited, decl.kind, selector)
            }
        };
        found.cloned()
    }

    /// Compare a new signature with the one it overrides, position by
    /// position. Narrowing `id` to a class type is allowed.
    fn check_override(&mut self, selector: &str, signature: &Signature, previous: &MethodDef) {
        for (i, declared) in previous.types.iter().enumerate() {
            let Some(ty) = signature.types.get(i) else {
                break;
            };
            if declared == ty || (declared == DYNAMIC_TYPE && signature.is_class[i]) {
                continue;
            }
            let (code, what) = if i == 0 {
                (ErrorCode::W2001, "return")
            } else {
                (ErrorCode::W2002, "parameter")
            };
            self.report(
                Diagnostic::warning(code)
                    .with_message(format!(
                        "conflicting {what} type in implementation of '{selector}': '{declared}' vs '{ty}'"
                    ))
                    .with_label(signature.spans[i], "conflicting type")
                    .with_secondary_label(previous.type_span(i), "previous implementation is here"),
            );
        }
    }
}

pub(super) fn undefined_protocol(name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W2005)
        .with_message(format!("undefined protocol: '{name}'"))
        .with_label(span, "no protocol with this name")
}
