//! Objective-J semantic analysis and JavaScript generation.
//!
//! This crate takes a parsed [`objj_ir::Program`] and produces JavaScript
//! that performs the same work through explicit runtime calls: message
//! sends become `objj_msgSend` dispatch, `@implementation` and `@protocol`
//! become class and protocol registration.
//!
//! # Pipeline
//!
//! One compilation unit is one depth-first walk by a [`CodeGenerator`]:
//!
//! - identifiers are resolved against the [`scope`] chain, classifying
//!   each as local, instance variable, file-level, class or global
//! - declarations populate the [`Registry`] (classes, protocols, method
//!   signatures) and are checked for conflicting overrides and protocol
//!   conformance
//! - code is written token by token to a [`CodeSink`]; [`JsBuffer`] is the
//!   default in-memory sink
//!
//! Non-fatal problems are collected as [`Diagnostic`]s. A fatal problem
//! aborts the unit with a [`FatalError`].
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=objj_codegen=debug`: declaration-level spans and events.
//! - `RUST_LOG=objj_codegen=trace`: every expression and message send.
//! - `OBJJ_LOG_TREE=1`: print spans as an indented tree instead of flat lines.

mod generator;
pub mod globals;
pub mod options;
pub mod registry;
pub mod scope;
pub mod selector;
pub mod sink;
mod stack;
pub mod suggest;

use std::sync::Once;

use objj_diagnostic::{Diagnostic, FatalError};
use objj_ir::Program;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

pub use generator::CodeGenerator;
pub use globals::GlobalAccess;
pub use options::{AccessorStyle, CompilerOptions, FormatOptions, WarningCategories};
pub use registry::Registry;
pub use sink::{CodeSink, FormatRule, JsBuffer};

/// A compiled unit.
#[derive(Debug)]
pub struct Compiled {
    pub code: JsBuffer,
    /// Warnings in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Classes and protocols known after the unit, seeded ones included.
    pub registry: Registry,
}

/// A unit that stopped at a fatal error.
///
/// `diagnostics` holds the warnings reported before the abort followed by
/// the fatal diagnostic itself.
#[derive(Debug, Error)]
#[error("compilation aborted: {error}")]
pub struct Aborted {
    #[source]
    pub error: FatalError,
    pub diagnostics: Vec<Diagnostic>,
    pub registry: Registry,
}

/// Compile one unit into a fresh [`JsBuffer`].
///
/// `registry` seeds the unit with classes and protocols declared elsewhere
/// and is handed back, extended, in the result.
#[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
pub fn compile(
    program: &Program,
    options: &CompilerOptions,
    mut registry: Registry,
) -> Result<Compiled, Aborted> {
    let mut code = JsBuffer::with_format(&options.format);
    let mut generator = CodeGenerator::new(options, &mut registry);
    let result = generator.generate(program, &mut code);
    let mut diagnostics = generator.into_diagnostics();

    match result {
        Ok(()) => {
            debug!(
                bytes = code.as_str().len(),
                diagnostics = diagnostics.len(),
                "unit compiled"
            );
            Ok(Compiled {
                code,
                diagnostics,
                registry,
            })
        }
        Err(error) => {
            debug!(code = %error.code, message = %error.message, "unit aborted");
            diagnostics.push(error.to_diagnostic());
            Err(Aborted {
                error,
                diagnostics,
                registry,
            })
        }
    }
}

/// Compile independent units in parallel.
///
/// Every unit starts from its own copy of `seed`, so declarations in one
/// unit are invisible to the others. Results keep the order of `units`.
pub fn compile_units(
    units: &[Program],
    options: &CompilerOptions,
    seed: &Registry,
) -> Vec<Result<Compiled, Aborted>> {
    units
        .par_iter()
        .map(|program| compile(program, options, seed.clone()))
        .collect()
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os("OBJJ_LOG_TREE").is_some();
        let hierarchical =
            tree.then(|| tracing_tree::HierarchicalLayer::new(2).with_targets(true));
        let flat = (!tree).then(|| fmt::layer().with_target(true).with_level(true));

        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(hierarchical)
            .with(flat)
            .try_init();
    });
}
