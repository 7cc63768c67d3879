//! Instance variables and synthesized accessors.

use objj_diagnostic::{Diagnostic, ErrorCode};
use objj_ir::{ClassDecl, IvarDecl, MethodKind, Span};
use smallvec::smallvec;

use super::{bracketed_list, implementation_name, type_list};
use crate::generator::CodeGenerator;
use crate::registry::{ClassId, IvarDef, MethodDef, MethodOrigin};
use crate::sink::{CodeSink, FormatRule};

/// Parameter name of synthesized setters.
const SETTER_ARGUMENT: &str = "newValue";

impl CodeGenerator<'_> {
    /// Register the class's ivars and emit `class_addIvars`.
    ///
    /// An ivar already declared by the class or a superclass is reported and
    /// left out. Returns the registered ivars that want accessors.
    pub(super) fn add_ivars<'d, S: CodeSink>(
        &mut self,
        out: &mut S,
        id: ClassId,
        decl: &'d ClassDecl,
    ) -> Vec<&'d IvarDecl> {
        let mut entries = Vec::new();
        let mut with_accessors = Vec::new();

        for ivar in &decl.ivars {
            let name = ivar.name.name.as_str();
            if let Some((owner, previous)) = self.registry.find_ivar(id, name) {
                let diagnostic = Diagnostic::warning(ErrorCode::W2004)
                    .with_message(format!(
                        "instance variable '{name}' is already declared in class '{}'",
                        self.registry.class(owner).name
                    ))
                    .with_label(ivar.name.span, "duplicate declaration")
                    .with_secondary_label(previous.span, "previous declaration is here");
                self.report(diagnostic);
                continue;
            }

            self.registry.class_mut(id).ivars.push(IvarDef {
                name: name.to_string(),
                ty: ivar.ty.name.clone(),
                has_accessors: ivar.accessors.is_some(),
                span: ivar.name.span,
            });
            if ivar.accessors.is_some() {
                with_accessors.push(ivar);
            }

            let mut entry = out.fork();
            entry.concat_node(
                &format!("new objj_ivar(\"{name}\", \"{}\")", ivar.ty.name),
                ivar.span,
            );
            entries.push(entry);
        }

        if !entries.is_empty() {
            out.concat_format(FormatRule::Newline);
            bracketed_list(out, "class_addIvars($the_class,", entries);
            out.concat(");");
        }
        with_accessors
    }

    /// Getter and setter entries for `ivars`, skipping selectors the class
    /// implements itself.
    pub(super) fn synthesize_accessors<S: CodeSink>(
        &mut self,
        base: &S,
        id: ClassId,
        prefix: &str,
        ivars: &[&IvarDecl],
    ) -> Vec<S> {
        let mut entries = Vec::new();

        for ivar in ivars {
            let Some(accessors) = &ivar.accessors else {
                continue;
            };
            let name = ivar.name.name.as_str();
            let ty = ivar.ty.name.as_str();
            let (getter, setter) = self.options.accessor_style.accessor_names(name, accessors);

            if !self.implements(id, &getter) {
                let function = implementation_name(prefix, &getter);
                let mut entry = accessor_head(base, &function, &getter, &[], accessors.span);
                entry.concat(&format!("return self.{name};"));
                accessor_tail(&mut entry, &[ty]);
                entries.push(entry);
                self.register_accessor(id, getter, ty, ivar.ty.span, None);
            }

            let Some(setter) = setter else {
                continue;
            };
            if self.implements(id, &setter) {
                continue;
            }
            let copy = accessors
                .copy
                .unwrap_or_else(|| ivar.ty.is_class && self.responds_to_copy(ty));

            let function = implementation_name(prefix, &setter);
            let mut entry = accessor_head(base, &function, &setter, &[SETTER_ARGUMENT], accessors.span);
            if copy {
                entry.concat(&format!("if (self.{name} !== {SETTER_ARGUMENT})"));
                entry.indent();
                entry.concat_format(FormatRule::Newline);
                entry.concat(&format!(
                    "self.{name} = ({SETTER_ARGUMENT} == null ? null : {SETTER_ARGUMENT}.isa.objj_msgSend0({SETTER_ARGUMENT}, \"copy\"));"
                ));
                entry.dedent();
            } else {
                entry.concat(&format!("self.{name} = {SETTER_ARGUMENT};"));
            }
            accessor_tail(&mut entry, &["void", ty]);
            entries.push(entry);
            self.register_accessor(id, setter, ty, ivar.ty.span, Some(accessors.span));
        }
        entries
    }

    /// The class itself (not a superclass) has an instance method `selector`.
    fn implements(&self, id: ClassId, selector: &str) -> bool {
        self.registry
            .class(id)
            .methods(MethodKind::Instance)
            .contains(selector)
    }

    /// Instances of class `name` understand `copy`.
    fn responds_to_copy(&self, name: &str) -> bool {
        self.registry
            .class_id(name)
            .and_then(|id| self.registry.lookup_method(id, MethodKind::Instance, "copy"))
            .is_some()
    }

    /// Record a synthesized getter (`setter_span` absent) or setter.
    fn register_accessor(
        &mut self,
        id: ClassId,
        selector: String,
        ty: &str,
        ty_span: Span,
        setter_span: Option<Span>,
    ) {
        let def = match setter_span {
            None => MethodDef {
                selector,
                types: smallvec![ty.to_string()],
                type_spans: smallvec![ty_span],
                span: ty_span,
                origin: MethodOrigin::Synthesized,
            },
            Some(span) => MethodDef {
                selector,
                types: smallvec!["void".to_string(), ty.to_string()],
                type_spans: smallvec![span, ty_span],
                span,
                origin: MethodOrigin::Synthesized,
            },
        };
        self.registry
            .class_mut(id)
            .methods_mut(MethodKind::Instance)
            .insert(def);
    }
}

/// `new objj_method(sel_getUid("sel"), function $Foo__sel(self, _cmd, ...) {` and
/// the first body line break.
fn accessor_head<S: CodeSink>(base: &S, name: &str, selector: &str, params: &[&str], span: Span) -> S {
    let mut entry = base.fork();
    entry.concat_node(&format!("new objj_method(sel_getUid(\"{selector}\"), "), span);
    entry.concat(&format!("function {name}(self, _cmd"));
    for param in params {
        entry.concat_comma();
        entry.concat(param);
    }
    entry.concat(")");
    entry.concat_format(FormatRule::BeforeLeftBrace);
    entry.concat("{");
    entry.indent();
    entry.concat_format(FormatRule::Newline);
    entry
}

/// Close the accessor body and append its type list.
fn accessor_tail<S: CodeSink>(entry: &mut S, types: &[&str]) {
    entry.dedent();
    entry.concat_format(FormatRule::Newline);
    entry.concat("}");
    entry.concat(&format!(", {})", type_list(types.iter().copied())));
}
