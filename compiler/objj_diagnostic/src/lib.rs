//! Diagnostics of the Objective-J code generator.
//!
//! Every diagnostic carries an [`ErrorCode`], a one-line message, a primary
//! label at the offending node and optionally secondary labels pointing at
//! an earlier declaration ("previous implementation is here").
//!
//! Non-fatal issues are [`Diagnostic`] values collected in a
//! [`DiagnosticQueue`]. Fatal issues are [`FatalError`]s propagated with `?`
//! until the compilation unit boundary, which turns them into a final
//! fatal-severity diagnostic.

mod diagnostic;
mod error_code;
mod fatal;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use fatal::FatalError;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
