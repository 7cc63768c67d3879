//! Lexical scopes.
//!
//! Scopes form a stack owned by the generator: a construct opens a scope,
//! compiles its children, then closes it. Closing pops the scope and
//! returns a [`ScopeSummary`] of what must outlive it (ivar references and
//! deferred identifier issues); the caller merges the summary into the new
//! innermost scope with [`ScopeChain::merge`].

use objj_diagnostic::Diagnostic;
use objj_ir::{MethodKind, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::registry::{ClassId, ProtocolId};

/// What kind of declaration a name is bound to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingKind {
    LocalVar,
    Argument,
    /// `function f() {}` in statement position.
    Function,
    /// Name of a named function expression, visible inside it only.
    FunctionName,
    FileVar,
    /// `@global name`
    GlobalDecl,
    /// `@class Name`
    ClassDecl,
    /// Marker recording that an implicit-global warning was already issued.
    ImplicitGlobal,
}

impl BindingKind {
    /// Whether the binding declares the name (as opposed to the marker).
    pub fn declares(self) -> bool {
        !matches!(self, Self::ImplicitGlobal)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Binding {
    pub kind: BindingKind,
    /// The declaring identifier.
    pub span: Span,
}

/// What construct a scope belongs to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Root,
    /// Function body; `name` is `<anonymous>` for unnamed expressions.
    Function { name: String },
    Method { kind: MethodKind, selector: String },
    Class { class: ClassId },
    Protocol { protocol: ProtocolId },
    Block,
    Catch,
}

impl ScopeKind {
    /// Function-level scopes own `var` declarations and receiver temporaries.
    pub fn is_function_level(&self) -> bool {
        matches!(self, Self::Root | Self::Function { .. } | Self::Method { .. })
    }
}

/// An identifier rewritten to an implicit-receiver ivar access.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IvarRef {
    pub name: String,
    pub span: Span,
}

/// A diagnostic about `name` held back until its scope closes, because a
/// later (hoisted) declaration may still bind the name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PendingIssue {
    pub name: String,
    pub diagnostic: Diagnostic,
}

/// Nesting-depth allocator for message-send receiver temporaries.
///
/// Sibling sends at the same depth reuse a name; nested sends get distinct
/// ones. The high-water mark decides which temporaries the enclosing
/// function body declares.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ReceiverTemps {
    depth: usize,
    max_depth: usize,
}

impl ReceiverTemps {
    /// Claim the next depth and return its variable name.
    pub fn acquire(&mut self) -> String {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        Self::name(self.depth)
    }

    pub fn release(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn name(depth: usize) -> String {
        format!("___r{depth}")
    }

    /// `var ___r1, ___r2;` for every depth used, if any.
    pub fn declaration(&self) -> Option<String> {
        if self.max_depth == 0 {
            return None;
        }
        let names: Vec<String> = (1..=self.max_depth).map(Self::name).collect();
        Some(format!("var {};", names.join(", ")))
    }
}

/// One lexical scope.
#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    bindings: FxHashMap<String, Binding>,
    ivar_refs: Vec<IvarRef>,
    pending: Vec<PendingIssue>,
    /// Set when `self` declared here may have been reassigned.
    self_reassigned: bool,
    /// Ivar names already reported as hidden by a local in this scope.
    hidden_ivars_reported: FxHashSet<String>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            bindings: FxHashMap::default(),
            ivar_refs: Vec::new(),
            pending: Vec::new(),
            self_reassigned: false,
            hidden_ivars_reported: FxHashSet::default(),
        }
    }

    fn drain(&mut self) -> ScopeSummary {
        let bindings = &self.bindings;
        let pending = std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|issue| {
                !bindings
                    .get(&issue.name)
                    .is_some_and(|b| b.kind.declares())
            })
            .collect();
        ScopeSummary {
            ivar_refs: std::mem::take(&mut self.ivar_refs),
            pending,
        }
    }
}

/// State handed from a closed scope to its parent.
#[derive(Clone, Debug, Default)]
pub struct ScopeSummary {
    pub ivar_refs: Vec<IvarRef>,
    pub pending: Vec<PendingIssue>,
}

/// The active scope stack. Index 0 is the root scope.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    scopes: Vec<Scope>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    pub fn new() -> Self {
        ScopeChain {
            scopes: vec![Scope::new(ScopeKind::Root)],
        }
    }

    pub fn open(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
    }

    /// Pop the innermost scope.
    ///
    /// Pending issues about names the scope itself declares are dropped;
    /// the rest are returned with the scope's ivar references. The root
    /// scope is never popped: closing it drains its pending state.
    pub fn close(&mut self) -> ScopeSummary {
        if self.scopes.len() > 1 {
            if let Some(mut scope) = self.scopes.pop() {
                return scope.drain();
            }
        }
        self.scopes[0].drain()
    }

    /// Fold a closed child's summary into the innermost scope.
    pub fn merge(&mut self, summary: ScopeSummary) {
        let current = self.current_mut();
        current.ivar_refs.extend(summary.ivar_refs);
        current.pending.extend(summary.pending);
    }

    /// Close the innermost scope and merge it into its parent.
    pub fn close_into_parent(&mut self) {
        let summary = self.close();
        self.merge(summary);
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn function_level_index(&self) -> usize {
        self.scopes
            .iter()
            .rposition(|s| s.kind.is_function_level())
            .unwrap_or(0)
    }

    /// True inside a function or method body.
    pub fn is_local(&self) -> bool {
        self.function_level_index() > 0
    }

    /// Insert or overwrite a binding in the innermost scope.
    pub fn declare(&mut self, name: &str, kind: BindingKind, span: Span) {
        self.current_mut()
            .bindings
            .insert(name.to_string(), Binding { kind, span });
    }

    /// Bind in the nearest function-level scope (or the root), where `var`
    /// and function declarations hoist to. Returns the kind used.
    pub fn declare_hoisted(&mut self, name: &str, local: BindingKind, span: Span) -> BindingKind {
        let index = self.function_level_index();
        let kind = if index == 0 && local == BindingKind::LocalVar {
            BindingKind::FileVar
        } else {
            local
        };
        self.scopes[index]
            .bindings
            .insert(name.to_string(), Binding { kind, span });
        kind
    }

    /// Bind in the root scope.
    pub fn declare_file_level(&mut self, name: &str, kind: BindingKind, span: Span) {
        self.scopes[0]
            .bindings
            .insert(name.to_string(), Binding { kind, span });
    }

    /// Nearest binding, climbing the chain.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|s| s.bindings.get(name))
    }

    /// Nearest binding that is not in the root scope.
    pub fn lookup_local(&self, name: &str) -> Option<&Binding> {
        self.scopes[1..]
            .iter()
            .rev()
            .find_map(|s| s.bindings.get(name))
            .filter(|b| b.kind.declares())
    }

    pub fn lookup_file_scope(&self, name: &str) -> Option<&Binding> {
        self.scopes[0].bindings.get(name)
    }

    pub fn mark_implicit_global(&mut self, name: &str, span: Span) {
        let index = self.function_level_index();
        self.scopes[index].bindings.insert(
            name.to_string(),
            Binding {
                kind: BindingKind::ImplicitGlobal,
                span,
            },
        );
    }

    pub fn defer_issue(&mut self, name: &str, diagnostic: Diagnostic) {
        self.current_mut().pending.push(PendingIssue {
            name: name.to_string(),
            diagnostic,
        });
    }

    pub fn add_ivar_ref(&mut self, name: &str, span: Span) {
        self.current_mut().ivar_refs.push(IvarRef {
            name: name.to_string(),
            span,
        });
    }

    /// First recorded reference to ivar `name` within the current function
    /// body, including closed nested scopes merged into it.
    pub fn ivar_ref_in_function(&self, name: &str) -> Option<Span> {
        let start = self.function_level_index();
        self.scopes[start..]
            .iter()
            .flat_map(|s| s.ivar_refs.iter())
            .find(|r| r.name == name)
            .map(|r| r.span)
    }

    /// Record that a hidden-ivar warning for `name` was issued in the current
    /// function body; returns `false` if it already was.
    pub fn note_hidden_ivar(&mut self, name: &str) -> bool {
        let index = self.function_level_index();
        self.scopes[index]
            .hidden_ivars_reported
            .insert(name.to_string())
    }

    // Receiver context

    fn method_scope(&self) -> Option<&Scope> {
        self.scopes
            .iter()
            .rev()
            .find(|s| matches!(s.kind, ScopeKind::Method { .. }))
    }

    /// Kind of the enclosing method, if any.
    pub fn method_kind(&self) -> Option<MethodKind> {
        self.method_scope().and_then(|s| match s.kind {
            ScopeKind::Method { kind, .. } => Some(kind),
            _ => None,
        })
    }

    /// `("function", name)` or `("method", selector)` for the innermost
    /// function-level scope; `None` at file level.
    pub fn context_description(&self) -> Option<(&'static str, &str)> {
        match &self.scopes[self.function_level_index()].kind {
            ScopeKind::Function { name } => Some(("function", name)),
            ScopeKind::Method { selector, .. } => Some(("method", selector)),
            _ => None,
        }
    }

    pub fn current_class(&self) -> Option<ClassId> {
        self.scopes.iter().rev().find_map(|s| match s.kind {
            ScopeKind::Class { class } => Some(class),
            _ => None,
        })
    }

    fn self_scope_index(&self) -> Option<usize> {
        (1..self.scopes.len())
            .rev()
            .find(|&i| self.scopes[i].bindings.get("self").is_some_and(|b| b.kind.declares()))
    }

    /// Note that `self` may no longer be the method receiver.
    pub fn mark_self_reassigned(&mut self) {
        if let Some(index) = self.self_scope_index() {
            self.scopes[index].self_reassigned = true;
        }
    }

    /// `self` is a local binding whose scope has not seen a reassignment.
    pub fn self_is_receiver(&self) -> bool {
        self.self_scope_index()
            .is_some_and(|i| !self.scopes[i].self_reassigned)
    }
}

#[cfg(test)]
mod tests;
