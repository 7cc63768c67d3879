//! Tree-walking code generator.
//!
//! One [`CodeGenerator`] compiles one unit: it walks the program depth
//! first, maintaining the scope chain and the registry, and writes tokens
//! to a [`CodeSink`]. Handlers are split by concern:
//!
//! - `statements`: control flow, blocks, variable and function declarations
//! - `expressions`: operators, calls, member access, function expressions
//! - `resolve`: identifier classification and its diagnostics
//! - `send`: message-send lowering
//! - `literals`: Objective-J literal forms and `@ref`/`@deref`
//! - `declarations`: classes, protocols, methods, ivars and accessors
//!
//! Nested output that must be placed elsewhere (method entries, function
//! bodies, cached receivers) is compiled into a fork of the sink and
//! returned as a value for the caller to splice.

mod declarations;
mod expressions;
mod literals;
mod precedence;
mod resolve;
mod send;
mod statements;

use objj_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, FatalError};
use objj_ir::{Block, Program};
use tracing::debug;

use crate::globals::PredefinedGlobals;
use crate::options::{CompilerOptions, WarningCategories};
use crate::registry::Registry;
use crate::scope::{ReceiverTemps, ScopeChain};
use crate::sink::{CodeSink, FormatRule};

/// Code generator for one compilation unit.
pub struct CodeGenerator<'a> {
    options: &'a CompilerOptions,
    registry: &'a mut Registry,
    globals: PredefinedGlobals,
    scopes: ScopeChain,
    /// Receiver temporaries of the function body being compiled.
    temps: ReceiverTemps,
    diagnostics: DiagnosticQueue,
    /// Compiling a bare identifier on the left of an assignment.
    assigning: bool,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(options: &'a CompilerOptions, registry: &'a mut Registry) -> Self {
        CodeGenerator {
            options,
            registry,
            globals: PredefinedGlobals::new(&options.extra_globals),
            scopes: ScopeChain::new(),
            temps: ReceiverTemps::default(),
            diagnostics: DiagnosticQueue::with_config(DiagnosticConfig {
                warning_limit: options.warning_limit,
                ..DiagnosticConfig::default()
            }),
            assigning: false,
        }
    }

    /// Compile `program` into `out`.
    ///
    /// Statements are written one per line. Receiver temporaries used at
    /// file level are declared on the first line.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn generate<S: CodeSink>(&mut self, program: &Program, out: &mut S) -> Result<(), FatalError> {
        let mut body = out.fork();
        for stmt in &program.body {
            self.statement(&mut body, stmt)?;
            body.concat_format(FormatRule::Newline);
        }

        if let Some(declaration) = self.temps.declaration() {
            out.concat(&declaration);
            out.concat_format(FormatRule::Newline);
        }
        out.splice(body);

        self.close_root();
        Ok(())
    }

    /// Diagnostics reported so far, in source order.
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    fn warns_about(&self, category: WarningCategories) -> bool {
        self.options.warns_about(category)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report the deferred identifier issues that survive the whole unit.
    fn close_root(&mut self) {
        let summary = self.scopes.close();
        let mut reported = 0usize;
        for issue in summary.pending {
            if self.registry.is_class(&issue.name) || self.registry.is_global(&issue.name) {
                continue;
            }
            reported += 1;
            self.report(issue.diagnostic);
        }
        debug!(reported, "deferred identifier issues");
    }

    /// Compile a function or method body as a braced block.
    ///
    /// The body gets its own receiver temporaries, declared at its top.
    /// The caller opens the function scope and declares the parameters.
    fn function_body<S: CodeSink>(&mut self, out: &mut S, body: &Block) -> Result<(), FatalError> {
        out.concat("{");
        out.indent();

        let saved = std::mem::take(&mut self.temps);
        let mut inner = out.fork();
        let result = body.body.iter().try_for_each(|stmt| {
            inner.concat_format(FormatRule::Newline);
            self.statement(&mut inner, stmt)
        });
        let temps = std::mem::replace(&mut self.temps, saved);
        result?;

        if let Some(declaration) = temps.declaration() {
            out.concat_format(FormatRule::Newline);
            out.concat(&declaration);
        }
        out.splice(inner);
        out.dedent();
        out.concat_format(FormatRule::Newline);
        out.concat("}");
        Ok(())
    }
}
