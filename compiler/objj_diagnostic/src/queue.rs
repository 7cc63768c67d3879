//! Per-unit diagnostic accumulator.
//!
//! The generator reports in walk order, and deferred identifier issues
//! arrive late, when their scope closes. The queue drops exact duplicates,
//! optionally caps warnings, and hands everything back in source order.

use rustc_hash::FxHashSet;

use crate::Diagnostic;

/// Queue behaviour.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of warnings kept (0 = unlimited). Fatal diagnostics
    /// are never dropped.
    pub warning_limit: usize,
    /// Drop diagnostics identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            warning_limit: 0,
            deduplicate: true,
        }
    }
}

/// Diagnostics of one compilation unit.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.push(diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    warning_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Queue `diag`; `false` if it was a duplicate or over the warning limit.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if diag.is_warning()
            && self.config.warning_limit > 0
            && self.warning_count >= self.config.warning_limit
        {
            return false;
        }

        if self.config.deduplicate && !self.seen.insert(diag.clone()) {
            return false;
        }

        if diag.is_warning() {
            self.warning_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take all diagnostics, sorted by primary span start. Diagnostics at
    /// the same position keep insertion order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        self.seen.clear();
        self.warning_count = 0;
        out.sort_by_key(|d| d.primary_span().map_or(0, |s| s.start));
        out
    }
}
