//! Structured error for diagnostics that abort a compilation unit.

use objj_ir::Span;
use thiserror::Error;

use crate::{Diagnostic, ErrorCode};

/// A fatal diagnostic raised while compiling a declaration.
///
/// Carries the triggering node's span so the unit boundary can report it
/// like any other diagnostic.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[error("{code}: {message}")]
pub struct FatalError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl FatalError {
    pub fn new(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        FatalError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Internal invariant violation.
    pub fn internal(span: Span, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E9001, span, message)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::fatal(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, self.code.description())
    }
}

#[cfg(test)]
mod tests;
