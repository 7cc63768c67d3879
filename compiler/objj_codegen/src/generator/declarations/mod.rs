//! Class, protocol and method declarations.
//!
//! A declaration is emitted as straight-line runtime calls: allocate the
//! class (or protocol), attach ivars, register it, then add method lists.
//! Methods are compiled into fragments forked from an indented base and
//! spliced into their list once the whole body has been seen, since
//! synthesized accessors and the class-method list come after the body.

mod class;
mod ivars;
mod method;
mod protocol;

use crate::registry::{ClassId, ProtocolId};
use crate::selector;
use crate::sink::{CodeSink, FormatRule};

/// Where a compiled method is registered.
enum MethodOwner {
    Class {
        id: ClassId,
        /// `$Foo`, or `$Foo_Cat` inside a category.
        prefix: String,
    },
    Protocol(ProtocolId),
}

impl MethodOwner {
    /// Name of the implementing function, e.g. `$Foo__initWithName_`.
    fn function_name(&self, selector: &str) -> Option<String> {
        match self {
            MethodOwner::Class { prefix, .. } => Some(implementation_name(prefix, selector)),
            MethodOwner::Protocol(_) => None,
        }
    }
}

/// Prefix of the implementing functions of a class or category.
fn class_prefix(name: &str, category: Option<&str>) -> String {
    match category {
        Some(category) => format!("${name}_{category}"),
        None => format!("${name}"),
    }
}

fn implementation_name(prefix: &str, selector: &str) -> String {
    format!("{prefix}__{}", selector::mangle(selector))
}

/// `["id", "int"]`
fn type_list<'t>(types: impl IntoIterator<Item = &'t str>) -> String {
    let quoted: Vec<String> = types.into_iter().map(|t| format!("\"{t}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

/// A sink for list entries, one level deeper than `out`.
fn entry_base<S: CodeSink>(out: &S) -> S {
    let mut base = out.fork();
    base.indent();
    base
}

/// `head` then a bracketed, one-per-line list of `entries`, ending after `]`.
fn bracketed_list<S: CodeSink>(out: &mut S, head: &str, entries: Vec<S>) {
    out.concat(head);
    out.concat_format(FormatRule::Newline);
    out.concat("[");
    out.indent();
    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            out.concat(",");
        }
        out.concat_format(FormatRule::Newline);
        out.splice(entry);
    }
    out.dedent();
    out.concat_format(FormatRule::Newline);
    out.concat("]");
}

/// `if (!$var)` / indented `throw` for a runtime lookup that came back empty.
fn missing_check<S: CodeSink>(out: &mut S, var: &str, message: &str) {
    out.concat_format(FormatRule::Newline);
    out.concat(&format!("if (!{var})"));
    out.indent();
    out.concat_format(FormatRule::Newline);
    out.concat(&format!("throw new SyntaxError(\"{message}\");"));
    out.dedent();
}
