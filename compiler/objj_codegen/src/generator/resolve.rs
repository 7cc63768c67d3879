//! Identifier resolution.
//!
//! A bare identifier is, in order of preference: an instance variable of
//! the current class (inside an instance method, unless a local binding
//! hides it), a binding in some enclosing scope, a predefined global, or a
//! class or file-level global. Anything else is reported, but only once
//! its scope closes, since a hoisted declaration may still bind it.

use objj_diagnostic::{Diagnostic, ErrorCode};
use objj_ir::{Ident, MethodKind, Span};

use super::CodeGenerator;
use crate::globals::is_reserved;
use crate::options::WarningCategories;
use crate::registry::ClassKind;
use crate::scope::BindingKind;
use crate::sink::CodeSink;
use crate::suggest::suggest_class;

impl CodeGenerator<'_> {
    /// Declaration site of ivar `name` if an unqualified reference to it
    /// would reach it here.
    pub(super) fn visible_ivar(&self, name: &str) -> Option<Span> {
        if !self.scopes.is_local() || self.scopes.method_kind() != Some(MethodKind::Instance) {
            return None;
        }
        let class = self.scopes.current_class()?;
        self.registry
            .find_ivar(class, name)
            .map(|(_, ivar)| ivar.span)
    }

    pub(super) fn identifier<S: CodeSink>(&mut self, out: &mut S, name: &str, span: Span) {
        let assigning = std::mem::take(&mut self.assigning);
        let local = self.scopes.lookup_local(name).copied();

        if let Some(ivar_span) = self.visible_ivar(name) {
            match local {
                None => {
                    self.scopes.add_ivar_ref(name, span);
                    out.concat_node("self.", span);
                    out.concat(name);
                    return;
                }
                Some(binding) => self.report_hidden_ivar(name, binding.span, ivar_span),
            }
        }

        out.concat_node(name, span);
        self.validate_reference(name, span, assigning);
    }

    fn validate_reference(&mut self, name: &str, span: Span, assigning: bool) {
        // Includes the implicit-global marker: one warning per name and body.
        if self.scopes.lookup(name).is_some() {
            return;
        }

        if let Some(access) = self.globals.get(name) {
            if assigning && !access.writable && self.warns_about(WarningCategories::READ_ONLY_GLOBALS) {
                self.report(
                    Diagnostic::warning(ErrorCode::W1003)
                        .with_message("assigning to a read-only predefined global")
                        .with_label(span, format!("'{name}' is predefined")),
                );
            }
            return;
        }

        if assigning {
            if !self.scopes.is_local() || !self.warns_about(WarningCategories::IMPLICIT_GLOBALS) {
                return;
            }
            let Some((context, context_name)) = self.scopes.context_description() else {
                return;
            };
            let diagnostic = Diagnostic::warning(ErrorCode::W1001)
                .with_message(format!(
                    "implicitly creating a global variable in the {context} '{context_name}'; did you mean to use var?"
                ))
                .with_label(span, "assigned here");
            self.scopes.defer_issue(name, diagnostic);
            self.scopes.mark_implicit_global(name, span);
            return;
        }

        if self.registry.is_class(name)
            || self.registry.is_global(name)
            || !self.warns_about(WarningCategories::UNKNOWN_IDENTIFIERS)
        {
            return;
        }

        let mut message = format!("reference to unknown identifier '{name}'");
        let suggestion = suggest_class(name, self.registry.class_names()).map(str::to_string);
        if let Some(candidate) = &suggestion {
            message.push_str(&format!("; did you mean '{candidate}'?"));
        }
        let mut diagnostic = Diagnostic::warning(ErrorCode::W1002)
            .with_message(message)
            .with_label(span, "not declared in any enclosing scope");
        if let Some(candidate) = suggestion {
            diagnostic = diagnostic.with_suggestion(candidate);
        }
        self.scopes.defer_issue(name, diagnostic);
    }

    /// Bind a `var` declarator, checking what it hides.
    pub(super) fn declare_variable(&mut self, id: &Ident) {
        let name = id.name.as_str();
        if is_reserved(name) {
            self.report(
                Diagnostic::warning(ErrorCode::W3002)
                    .with_message("reserved word used for variable name")
                    .with_label(id.span, format!("'{name}' is reserved")),
            );
        } else if self.scopes.is_local() && self.warns_about(WarningCategories::SHADOWED_VARS) {
            self.check_hidden_global(id);
        }

        self.scopes.declare_hoisted(name, BindingKind::LocalVar, id.span);

        // An earlier unqualified use in this body already resolved to the ivar.
        if let Some(ivar_span) = self.visible_ivar(name) {
            if self.scopes.ivar_ref_in_function(name).is_some() {
                self.report_hidden_ivar(name, id.span, ivar_span);
            }
        }
    }

    fn check_hidden_global(&mut self, id: &Ident) {
        let name = id.name.as_str();
        let hidden: Option<(&str, Option<Span>)> = if let Some(access) = self.globals.get(name) {
            (!access.ignore_shadow).then_some(("a predefined global", None))
        } else if let Some(site) = self.registry.global(name) {
            Some(("a global variable", Some(site)))
        } else if let Some(binding) = self.scopes.lookup_file_scope(name) {
            match binding.kind {
                BindingKind::FileVar | BindingKind::Function => Some(("a file variable", Some(binding.span))),
                BindingKind::GlobalDecl => Some(("a @global declaration", Some(binding.span))),
                BindingKind::ClassDecl => Some(("a @class declaration", Some(binding.span))),
                _ => None,
            }
        } else {
            self.registry.class_by_name(name).map(|class| {
                let site = (class.kind != ClassKind::External).then_some(class.span);
                ("a class", site)
            })
        };

        let Some((what, site)) = hidden else {
            return;
        };
        let mut diagnostic = Diagnostic::warning(ErrorCode::W1004)
            .with_message(format!("local declaration of '{name}' hides {what}"))
            .with_label(id.span, "declared here");
        if let Some(site) = site {
            diagnostic = diagnostic.with_secondary_label(site, "declaration is here");
        }
        self.report(diagnostic);
    }

    /// Warn once per function body that a local binding hides ivar `name`.
    fn report_hidden_ivar(&mut self, name: &str, local: Span, ivar: Span) {
        if !self.warns_about(WarningCategories::SHADOWED_IVARS) || !self.scopes.note_hidden_ivar(name) {
            return;
        }
        self.report(
            Diagnostic::warning(ErrorCode::W1005)
                .with_message(format!("local declaration of '{name}' hides an instance variable"))
                .with_label(local, "local declaration")
                .with_secondary_label(ivar, "instance variable is declared here"),
        );
    }
}
