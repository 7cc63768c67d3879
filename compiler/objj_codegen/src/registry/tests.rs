use super::*;
use pretty_assertions::assert_eq;

fn class_with_ivar(registry: &mut Registry, name: &str, superclass: Option<ClassId>, ivar: &str) -> ClassId {
    let mut def = ClassDef::new(name, superclass, ClassKind::Implemented, Span::DUMMY);
    def.ivars.push(IvarDef {
        name: ivar.to_string(),
        ty: "int".to_string(),
        has_accessors: false,
        span: Span::new(1, 2),
    });
    registry.add_class(def)
}

#[test]
fn test_method_table_keeps_order_and_replaces() {
    let mut table = MethodTable::default();
    table.insert(MethodDef::external("b", &["id"]));
    table.insert(MethodDef::external("a", &["id"]));
    table.insert(MethodDef::external("b", &["void"]));

    let selectors: Vec<_> = table.iter().map(|m| m.selector.as_str()).collect();
    assert_eq!(selectors, vec!["b", "a"]);
    assert_eq!(table.get("b").map(|m| m.types[0].as_str()), Some("void"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_find_ivar_walks_superclasses() {
    let mut registry = Registry::new();
    let base = class_with_ivar(&mut registry, "Base", None, "count");
    let derived = class_with_ivar(&mut registry, "Derived", Some(base), "name");

    let (owner, ivar) = registry.find_ivar(derived, "count").expect("inherited ivar");
    assert_eq!(owner, base);
    assert_eq!(ivar.ty, "int");
    assert!(registry.find_ivar(base, "name").is_none());
}

#[test]
fn test_ancestors_order() {
    let mut registry = Registry::new();
    let a = registry.declare_external_class("A", None);
    let b = registry.declare_external_class("B", Some("A"));
    let c = registry.declare_external_class("C", Some("B"));
    assert_eq!(registry.ancestors(c).collect::<Vec<_>>(), vec![c, b, a]);
}

#[test]
fn test_ancestors_terminates_on_cycle() {
    let mut registry = Registry::new();
    let a = registry.declare_external_class("A", None);
    let b = registry.declare_external_class("B", Some("A"));
    registry.class_mut(a).superclass = Some(b);
    assert_eq!(registry.ancestors(a).count(), 2);
}

#[test]
fn test_lookup_method_prefers_own_definition() {
    let mut registry = Registry::new();
    let base = registry.declare_external_class("Base", None);
    registry
        .class_mut(base)
        .instance_methods
        .insert(MethodDef::external("description", &["CPString"]));
    let derived = registry.declare_external_class("Derived", Some("Base"));
    registry
        .class_mut(derived)
        .instance_methods
        .insert(MethodDef::external("description", &["id"]));

    let inherited = registry.lookup_method(base, MethodKind::Instance, "description");
    assert_eq!(inherited.map(|m| m.types[0].as_str()), Some("CPString"));
    let own = registry.lookup_method(derived, MethodKind::Instance, "description");
    assert_eq!(own.map(|m| m.types[0].as_str()), Some("id"));
}

#[test]
fn test_add_class_replaces_forward_in_place() {
    let mut registry = Registry::new();
    let forward = registry.add_class(ClassDef::new("View", None, ClassKind::Forward, Span::DUMMY));
    let real = registry.add_class(ClassDef::new("View", None, ClassKind::Implemented, Span::new(5, 9)));
    assert_eq!(forward, real);
    assert_eq!(registry.class(real).kind, ClassKind::Implemented);
    assert_eq!(registry.classes().count(), 1);
}

#[test]
fn test_protocol_closure_dedups() {
    let mut registry = Registry::new();
    let base = registry.declare_external_protocol("Base", &[]);
    let left = registry.declare_external_protocol("Left", &["Base"]);
    let right = registry.declare_external_protocol("Right", &["Base"]);
    let closure = registry.protocol_closure(&[left, right]);
    assert_eq!(closure, vec![left, base, right]);
}

#[test]
fn test_lookup_protocol_method_in_parent() {
    let mut registry = Registry::new();
    let base = registry.declare_external_protocol("Base", &[]);
    registry
        .protocol_mut(base)
        .instance_methods
        .insert(MethodDef::external("run", &["void"]));
    let child = registry.declare_external_protocol("Child", &["Base"]);
    assert!(registry
        .lookup_protocol_method(&[child], MethodKind::Instance, "run")
        .is_some());
    assert!(registry
        .lookup_protocol_method(&[child], MethodKind::Class, "run")
        .is_none());
}

#[test]
fn test_globals_keep_first_site() {
    let mut registry = Registry::new();
    registry.add_global("counter", Span::new(0, 7));
    registry.add_global("counter", Span::new(20, 27));
    assert_eq!(registry.global("counter"), Some(Span::new(0, 7)));
    assert!(registry.is_global("counter"));
    assert!(!registry.is_global("other"));
}
