//! `@implementation` declarations.

use objj_diagnostic::{Diagnostic, ErrorCode, FatalError};
use objj_ir::{ClassDecl, MethodKind, Span, StmtKind};
use rustc_hash::FxHashSet;
use tracing::debug;

use super::method::undefined_protocol;
use super::{bracketed_list, class_prefix, entry_base, missing_check, MethodOwner};
use crate::generator::CodeGenerator;
use crate::registry::{ClassDef, ClassId, ClassKind, ProtocolId};
use crate::scope::ScopeKind;
use crate::sink::{CodeSink, FormatRule};

/// A required method the class does not implement.
struct Unimplemented {
    selector: String,
    kind: MethodKind,
    protocol: String,
    /// The adopted protocol name in the class header.
    adopted_at: Span,
    declared_at: Span,
}

impl CodeGenerator<'_> {
    #[tracing::instrument(level = "debug", skip_all, fields(class = %decl.name.name))]
    pub(in crate::generator) fn class_declaration<S: CodeSink>(
        &mut self,
        out: &mut S,
        decl: &ClassDecl,
    ) -> Result<(), FatalError> {
        let id = self.declare_class(decl)?;
        let name = decl.name.name.as_str();
        let category = decl.category.as_ref().map(|c| c.name.as_str());
        let comment = class_comment(decl);

        out.concat_node(&format!("// {comment}"), decl.span);
        out.concat_format(FormatRule::Newline);
        match category {
            None => {
                let superclass = decl.superclass.as_ref().map_or("Nil", |s| s.name.as_str());
                out.concat_node(
                    &format!("var $the_class = objj_allocateClassPair({superclass}, \"{name}\"),"),
                    decl.name.span,
                );
                out.indent();
                out.concat_format(FormatRule::Newline);
                out.concat("$meta_class = $the_class.isa;");
                out.dedent();
            }
            Some(_) => {
                out.concat_node(
                    &format!("var $the_class = objj_getClass(\"{name}\");"),
                    decl.name.span,
                );
                missing_check(out, "$the_class", &format!("Undefined class: {name}"));
                out.concat_format(FormatRule::Newline);
                out.concat("var $meta_class = $the_class.isa;");
            }
        }

        for (i, protocol) in decl.protocols.iter().enumerate() {
            let var = if i == 0 { "var " } else { "" };
            out.concat_format(FormatRule::Newline);
            out.concat_node(
                &format!("{var}$protocol = objj_getProtocol(\"{}\");", protocol.name),
                protocol.span,
            );
            missing_check(out, "$protocol", &format!("Undefined protocol: {}", protocol.name));
            out.concat_format(FormatRule::Newline);
            out.concat("class_addProtocol($the_class, $protocol);");
        }

        let with_accessors = self.add_ivars(out, id, decl);

        if category.is_none() {
            out.concat_format(FormatRule::Newline);
            out.concat("objj_registerClassPair($the_class);");
        }

        let prefix = class_prefix(name, category);
        let owner = MethodOwner::Class {
            id,
            prefix: prefix.clone(),
        };
        let base = entry_base(out);
        let mut instance_methods = Vec::new();
        let mut class_methods = Vec::new();

        self.scopes.open(ScopeKind::Class { class: id });
        for stmt in &decl.body {
            if let StmtKind::Method(method) = &stmt.kind {
                let entry = self.method_declaration(&base, method, &owner, true)?;
                match method.kind {
                    MethodKind::Instance => instance_methods.push(entry),
                    MethodKind::Class => class_methods.push(entry),
                }
            } else {
                out.concat_format(FormatRule::Newline);
                self.statement(out, stmt)?;
            }
        }
        instance_methods.extend(self.synthesize_accessors(&base, id, &prefix, &with_accessors));
        self.scopes.close_into_parent();

        for (label, target, entries) in [
            ("// Instance methods", "$the_class", instance_methods),
            ("// Class methods", "$the_class.isa", class_methods),
        ] {
            if entries.is_empty() {
                continue;
            }
            out.concat_format(FormatRule::Newline);
            out.concat_format(FormatRule::Newline);
            out.concat(label);
            out.concat_format(FormatRule::Newline);
            bracketed_list(out, &format!("class_addMethods({target},"), entries);
            out.concat(");");
        }

        out.concat_format(FormatRule::Newline);
        out.concat(&format!("// @end: {comment}"));

        self.check_protocol_conformance(id, decl);
        Ok(())
    }

    /// Create or reopen the class definition.
    ///
    /// A category reopens its class, creating a forward definition when the
    /// class is unknown. A full implementation needs a known superclass and
    /// must be the only implementation of its name.
    fn declare_class(&mut self, decl: &ClassDecl) -> Result<ClassId, FatalError> {
        let name = decl.name.name.as_str();
        let existing = self.registry.class_id(name);

        let id = if decl.category.is_some() {
            match existing {
                Some(id) => id,
                None => self.registry.add_class(ClassDef::new(
                    name,
                    None,
                    ClassKind::Forward,
                    decl.name.span,
                )),
            }
        } else {
            if let Some(id) = existing {
                if self.registry.class(id).kind == ClassKind::Implemented {
                    return Err(FatalError::new(
                        ErrorCode::E4004,
                        decl.name.span,
                        format!("duplicate definition of class '{name}'"),
                    ));
                }
            }
            let superclass = match &decl.superclass {
                Some(superclass) => Some(self.registry.class_id(&superclass.name).ok_or_else(|| {
                    FatalError::new(
                        ErrorCode::E4003,
                        superclass.span,
                        format!("unknown superclass '{}'", superclass.name),
                    )
                })?),
                None => None,
            };
            match existing {
                // A forward or external definition becomes this implementation,
                // keeping methods a category added to it.
                Some(id) => {
                    let class = self.registry.class_mut(id);
                    class.superclass = superclass;
                    class.kind = ClassKind::Implemented;
                    class.span = decl.name.span;
                    class.ivars.clear();
                    id
                }
                None => self.registry.add_class(ClassDef::new(
                    name,
                    superclass,
                    ClassKind::Implemented,
                    decl.name.span,
                )),
            }
        };

        for protocol in &decl.protocols {
            match self.registry.protocol_id(&protocol.name) {
                Some(pid) => {
                    let adopted = &mut self.registry.class_mut(id).protocols;
                    if !adopted.contains(&pid) {
                        adopted.push(pid);
                    }
                }
                None => self.report(undefined_protocol(&protocol.name, protocol.span)),
            }
        }

        debug!(?id, category = decl.category.is_some(), "class declared");
        Ok(id)
    }

    /// Warn for each method required by an adopted protocol (or one it
    /// inherits) that the class chain does not implement.
    fn check_protocol_conformance(&mut self, id: ClassId, decl: &ClassDecl) {
        let mut seen: FxHashSet<(ProtocolId, MethodKind, String)> = FxHashSet::default();
        let mut missing = Vec::new();

        for adopted in &decl.protocols {
            let Some(root) = self.registry.protocol_id(&adopted.name) else {
                continue;
            };
            for pid in self.registry.protocol_closure(&[root]) {
                let protocol = self.registry.protocol(pid);
                for kind in [MethodKind::Instance, MethodKind::Class] {
                    for method in protocol.methods(kind).iter() {
                        if self.registry.lookup_method(id, kind, &method.selector).is_some() {
                            continue;
                        }
                        if !seen.insert((pid, kind, method.selector.clone())) {
                            continue;
                        }
                        missing.push(Unimplemented {
                            selector: method.selector.clone(),
                            kind,
                            protocol: protocol.name.clone(),
                            adopted_at: adopted.span,
                            declared_at: method.span,
                        });
                    }
                }
            }
        }

        for method in missing {
            self.report(
                Diagnostic::warning(ErrorCode::W2003)
                    .with_message(format!(
                        "method '{}' in protocol '{}' not implemented",
                        method.selector, method.protocol
                    ))
                    .with_label(method.adopted_at, format!("required {} method", kind_word(method.kind)))
                    .with_secondary_label(method.declared_at, "method declared here"),
            );
        }
    }
}

fn kind_word(kind: MethodKind) -> &'static str {
    match kind {
        MethodKind::Instance => "instance",
        MethodKind::Class => "class",
    }
}

/// `@implementation Foo : Bar <P, Q>` or `@implementation Foo (Cat)`.
fn class_comment(decl: &ClassDecl) -> String {
    let mut comment = format!("@implementation {}", decl.name.name);
    if let Some(category) = &decl.category {
        comment.push_str(&format!(" ({})", category.name));
    } else if let Some(superclass) = &decl.superclass {
        comment.push_str(&format!(" : {}", superclass.name));
    }
    if !decl.protocols.is_empty() {
        let names: Vec<&str> = decl.protocols.iter().map(|p| p.name.as_str()).collect();
        comment.push_str(&format!(" <{}>", names.join(", ")));
    }
    comment
}
