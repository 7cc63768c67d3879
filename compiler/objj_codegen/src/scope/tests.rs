use super::*;
use objj_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn unknown(name: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W1002)
        .with_message(format!("reference to unknown identifier '{name}'"))
        .with_label(Span::new(0, 1), "unknown identifier")
}

#[test]
fn test_hoisted_var_lands_in_function_scope() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Function {
        name: "f".to_string(),
    });
    chain.open(ScopeKind::Block);
    let kind = chain.declare_hoisted("x", BindingKind::LocalVar, Span::new(3, 4));
    assert_eq!(kind, BindingKind::LocalVar);
    chain.close_into_parent();
    assert_eq!(chain.lookup("x").map(|b| b.kind), Some(BindingKind::LocalVar));
    chain.close_into_parent();
    assert!(chain.lookup("x").is_none());
}

#[test]
fn test_hoisted_var_at_root_is_file_var() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Block);
    let kind = chain.declare_hoisted("x", BindingKind::LocalVar, Span::DUMMY);
    assert_eq!(kind, BindingKind::FileVar);
    assert!(chain.lookup_file_scope("x").is_some());
    assert!(!chain.is_local());
}

#[test]
fn test_class_scope_is_not_local() {
    let mut registry = crate::registry::Registry::new();
    let class = registry.declare_external_class("Widget", None);
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Class { class });
    assert!(!chain.is_local());
    chain.open(ScopeKind::Method {
        kind: MethodKind::Instance,
        selector: "foo".to_string(),
    });
    assert!(chain.is_local());
    assert_eq!(chain.method_kind(), Some(MethodKind::Instance));
    assert_eq!(chain.current_class(), Some(class));
    assert_eq!(chain.context_description(), Some(("method", "foo")));
}

#[test]
fn test_lookup_local_ignores_root_and_markers() {
    let mut chain = ScopeChain::new();
    chain.declare_file_level("g", BindingKind::FileVar, Span::DUMMY);
    chain.open(ScopeKind::Function {
        name: "f".to_string(),
    });
    chain.mark_implicit_global("h", Span::DUMMY);
    assert!(chain.lookup("g").is_some());
    assert!(chain.lookup_local("g").is_none());
    assert!(chain.lookup_local("h").is_none());
    assert_eq!(chain.lookup("h").map(|b| b.kind), Some(BindingKind::ImplicitGlobal));
}

#[test]
fn test_pending_issue_dropped_by_later_declaration() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Function {
        name: "f".to_string(),
    });
    chain.defer_issue("later", unknown("later"));
    chain.defer_issue("missing", unknown("missing"));
    chain.declare_hoisted("later", BindingKind::LocalVar, Span::DUMMY);

    let summary = chain.close();
    let names: Vec<_> = summary.pending.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["missing"]);
}

#[test]
fn test_pending_issue_survives_marker() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Function {
        name: "f".to_string(),
    });
    chain.defer_issue("g", unknown("g"));
    chain.mark_implicit_global("g", Span::DUMMY);
    assert_eq!(chain.close().pending.len(), 1);
}

#[test]
fn test_ivar_refs_merge_into_parent() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Method {
        kind: MethodKind::Instance,
        selector: "foo".to_string(),
    });
    chain.open(ScopeKind::Function {
        name: "<anonymous>".to_string(),
    });
    chain.add_ivar_ref("count", Span::new(10, 15));
    assert_eq!(chain.ivar_ref_in_function("count"), Some(Span::new(10, 15)));
    chain.close_into_parent();
    assert_eq!(chain.method_kind(), Some(MethodKind::Instance));
    assert_eq!(chain.ivar_ref_in_function("count"), Some(Span::new(10, 15)));
}

#[test]
fn test_self_reassignment_marks_declaring_scope() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Method {
        kind: MethodKind::Instance,
        selector: "init".to_string(),
    });
    chain.declare("self", BindingKind::Argument, Span::DUMMY);
    chain.open(ScopeKind::Block);
    assert!(chain.self_is_receiver());
    chain.mark_self_reassigned();
    chain.close_into_parent();
    assert!(!chain.self_is_receiver());
}

#[test]
fn test_self_without_method_is_not_receiver() {
    let chain = ScopeChain::new();
    assert!(!chain.self_is_receiver());
}

#[test]
fn test_hidden_ivar_reported_once_per_function() {
    let mut chain = ScopeChain::new();
    chain.open(ScopeKind::Method {
        kind: MethodKind::Instance,
        selector: "foo".to_string(),
    });
    chain.open(ScopeKind::Block);
    assert!(chain.note_hidden_ivar("count"));
    assert!(!chain.note_hidden_ivar("count"));
}

#[test]
fn test_receiver_temps_track_high_water_mark() {
    let mut temps = ReceiverTemps::default();
    assert_eq!(temps.declaration(), None);
    assert_eq!(temps.acquire(), "___r1");
    assert_eq!(temps.acquire(), "___r2");
    temps.release();
    temps.release();
    assert_eq!(temps.acquire(), "___r1");
    temps.release();
    assert_eq!(temps.declaration().as_deref(), Some("var ___r1, ___r2;"));
}

#[test]
fn test_root_scope_survives_close() {
    let mut chain = ScopeChain::new();
    chain.declare_file_level("known", BindingKind::FileVar, Span::DUMMY);
    chain.defer_issue("known", unknown("known"));
    chain.defer_issue("other", unknown("other"));
    let summary = chain.close();
    assert_eq!(summary.pending.len(), 1);
    assert!(!chain.is_local());
    assert!(chain.lookup_file_scope("known").is_some());
}
