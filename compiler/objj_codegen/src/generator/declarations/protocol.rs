//! `@protocol` declarations.

use objj_diagnostic::{ErrorCode, FatalError};
use objj_ir::{MethodKind, ProtocolDecl};
use tracing::debug;

use super::{bracketed_list, entry_base, missing_check, MethodOwner};
use crate::generator::CodeGenerator;
use crate::registry::ProtocolDef;
use crate::scope::ScopeKind;
use crate::sink::{CodeSink, FormatRule};

impl CodeGenerator<'_> {
    /// Register the protocol and emit its runtime description.
    ///
    /// Only `@required` methods enter the registry and take part in
    /// conformance checks; `@optional` ones are still described to the
    /// runtime.
    #[tracing::instrument(level = "debug", skip_all, fields(protocol = %decl.name.name))]
    pub(in crate::generator) fn protocol_declaration<S: CodeSink>(
        &mut self,
        out: &mut S,
        decl: &ProtocolDecl,
    ) -> Result<(), FatalError> {
        let name = decl.name.name.as_str();
        if self.registry.protocol_id(name).is_some() {
            return Err(FatalError::new(
                ErrorCode::E4001,
                decl.name.span,
                format!("duplicate protocol '{name}'"),
            ));
        }

        let mut inherited = Vec::with_capacity(decl.protocols.len());
        for protocol in &decl.protocols {
            let id = self.registry.protocol_id(&protocol.name).ok_or_else(|| {
                FatalError::new(
                    ErrorCode::E4005,
                    protocol.span,
                    format!("undefined protocol '{}'", protocol.name),
                )
            })?;
            inherited.push(id);
        }

        let id = self
            .registry
            .add_protocol(ProtocolDef::new(name, inherited, decl.name.span));
        debug!(?id, "protocol declared");

        let mut comment = format!("@protocol {name}");
        if !decl.protocols.is_empty() {
            let names: Vec<&str> = decl.protocols.iter().map(|p| p.name.as_str()).collect();
            comment.push_str(&format!(" <{}>", names.join(", ")));
        }

        out.concat_node(&format!("// {comment}"), decl.span);
        out.concat_format(FormatRule::Newline);
        out.concat_node(
            &format!("var $the_protocol = objj_allocateProtocol(\"{name}\");"),
            decl.name.span,
        );

        for (i, protocol) in decl.protocols.iter().enumerate() {
            let var = if i == 0 { "var " } else { "" };
            out.concat_format(FormatRule::Newline);
            out.concat_node(
                &format!("{var}$inherited_protocol = objj_getProtocol(\"{}\");", protocol.name),
                protocol.span,
            );
            missing_check(
                out,
                "$inherited_protocol",
                &format!("Undefined protocol: {}", protocol.name),
            );
            out.concat_format(FormatRule::Newline);
            out.concat("protocol_addProtocol($the_protocol, $inherited_protocol);");
        }

        let owner = MethodOwner::Protocol(id);
        let base = entry_base(out);
        // (required, instance) lists in emission order.
        let mut lists: [(bool, bool, Vec<S>); 4] = [
            (true, true, Vec::new()),
            (true, false, Vec::new()),
            (false, true, Vec::new()),
            (false, false, Vec::new()),
        ];

        self.scopes.open(ScopeKind::Protocol { protocol: id });
        for (required, methods) in [(true, &decl.required), (false, &decl.optional)] {
            for method in methods {
                let entry = self.method_declaration(&base, method, &owner, required)?;
                let instance = method.kind == MethodKind::Instance;
                if let Some((_, _, list)) = lists
                    .iter_mut()
                    .find(|(r, i, _)| *r == required && *i == instance)
                {
                    list.push(entry);
                }
            }
        }
        self.scopes.close_into_parent();

        for (required, instance, entries) in lists {
            if entries.is_empty() {
                continue;
            }
            out.concat_format(FormatRule::Newline);
            bracketed_list(out, "protocol_addMethodDescriptions($the_protocol,", entries);
            out.concat(",");
            out.concat_format(FormatRule::Newline);
            out.concat(&format!("{required}, {instance});"));
        }

        out.concat_format(FormatRule::Newline);
        out.concat("objj_registerProtocol($the_protocol);");
        out.concat_format(FormatRule::Newline);
        out.concat(&format!("// @end: {comment}"));
        Ok(())
    }
}
