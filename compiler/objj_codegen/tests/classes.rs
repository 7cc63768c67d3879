//! `@implementation`, categories, ivars, accessors and override checks.

mod common;

use common::{codes, compile_ok, compile_with, foundation, js, lines};
use objj_codegen::registry::{ClassKind, MethodDef};
use objj_codegen::CompilerOptions;
use objj_diagnostic::{ErrorCode, Severity};
use objj_ir::build::{
    class_forward, class_ty, expr_stmt, id_ty, ident, ivar, ivar_at, ivar_with_accessors, num,
    prim_ty, program, ret, send, var, ClassBuilder, MethodBuilder,
};
use objj_ir::{Accessors, MethodKind};
use pretty_assertions::assert_eq;

#[test]
fn test_class_with_ivar_and_method() {
    let class = ClassBuilder::new("Foo")
        .superclass("CPObject")
        .ivar(ivar(prim_ty("int"), "x"))
        .method(
            MethodBuilder::instance("x")
                .returns(prim_ty("int"))
                .body(vec![ret(Some(ident("x")))]),
        )
        .build();

    assert_eq!(
        js(vec![class]),
        lines(&[
            "// @implementation Foo : CPObject",
            r#"var $the_class = objj_allocateClassPair(CPObject, "Foo"),"#,
            "    $meta_class = $the_class.isa;",
            "class_addIvars($the_class,",
            "[",
            r#"    new objj_ivar("x", "int")"#,
            "]);",
            "objj_registerClassPair($the_class);",
            "",
            "// Instance methods",
            "class_addMethods($the_class,",
            "[",
            r#"    new objj_method(sel_getUid("x"), function $Foo__x(self, _cmd) {"#,
            "        return self.x;",
            r#"    }, ["int"])"#,
            "]);",
            "// @end: @implementation Foo : CPObject",
        ])
    );
}

#[test]
fn test_root_class_passes_nil() {
    let code = js(vec![ClassBuilder::new("Root").build()]);
    assert_eq!(
        code,
        lines(&[
            "// @implementation Root",
            r#"var $the_class = objj_allocateClassPair(Nil, "Root"),"#,
            "    $meta_class = $the_class.isa;",
            "objj_registerClassPair($the_class);",
            "// @end: @implementation Root",
        ])
    );
}

#[test]
fn test_instance_methods_precede_class_methods() {
    let code = js(vec![ClassBuilder::new("Foo")
        .superclass("CPObject")
        .method(MethodBuilder::class("shared"))
        .method(MethodBuilder::instance("run:").param(Some(prim_ty("int")), "times"))
        .build()]);

    let instance = code.find("// Instance methods").unwrap_or(usize::MAX);
    let class = code.find("// Class methods").unwrap_or(usize::MAX);
    assert!(instance < class, "{code}");
    assert!(code.contains("class_addMethods($the_class.isa,\n"));
    assert!(code.contains(
        r#"new objj_method(sel_getUid("run:"), function $Foo__run_(self, _cmd, times) {"#
    ));
    assert!(code.contains(r#"}, ["id", "int"])"#));
}

#[test]
fn test_category_extends_existing_class() {
    let compiled = compile_ok(vec![ClassBuilder::new("CPObject")
        .category("Extras")
        .method(MethodBuilder::instance("greet"))
        .build()]);

    assert_eq!(
        compiled.code.as_str(),
        lines(&[
            "// @implementation CPObject (Extras)",
            r#"var $the_class = objj_getClass("CPObject");"#,
            "if (!$the_class)",
            r#"    throw new SyntaxError("Undefined class: CPObject");"#,
            "var $meta_class = $the_class.isa;",
            "",
            "// Instance methods",
            "class_addMethods($the_class,",
            "[",
            r#"    new objj_method(sel_getUid("greet"), function $CPObject_Extras__greet(self, _cmd) {"#,
            r#"    }, ["id"])"#,
            "]);",
            "// @end: @implementation CPObject (Extras)",
        ])
    );
    let class = compiled.registry.class_by_name("CPObject");
    assert!(class.is_some_and(|c| c.methods(MethodKind::Instance).contains("greet")));
}

#[test]
fn test_category_on_unknown_class_creates_forward_class() {
    let compiled = compile_ok(vec![ClassBuilder::new("Widget").category("Drawing").build()]);
    assert!(compiled.diagnostics.is_empty());
    let class = compiled.registry.class_by_name("Widget");
    assert_eq!(class.map(|c| c.kind), Some(ClassKind::Forward));
}

#[test]
fn test_forward_class_becomes_implementation() {
    let compiled = compile_ok(vec![
        class_forward("Foo"),
        expr_stmt(send(ident("Foo"), "alloc", vec![])),
        ClassBuilder::new("Foo").superclass("CPObject").build(),
    ]);
    let code = compiled.code.as_str();
    assert!(code.starts_with("// @class Foo\nFoo.isa.objj_msgSend0(Foo, \"alloc\");\n"), "{code}");
    assert!(compiled.diagnostics.is_empty());
    let class = compiled.registry.class_by_name("Foo");
    assert_eq!(class.map(|c| c.kind), Some(ClassKind::Implemented));
}

#[test]
fn test_unknown_superclass_is_fatal() {
    let program = program(vec![ClassBuilder::new("Foo").superclass("Missing").build()]);
    let Err(aborted) = objj_codegen::compile(&program, &CompilerOptions::default(), foundation()) else {
        panic!("expected an abort");
    };
    assert_eq!(aborted.error.code, ErrorCode::E4003);
    assert_eq!(aborted.error.message, "unknown superclass 'Missing'");
    let last = aborted.diagnostics.last().map(|d| d.severity);
    assert_eq!(last, Some(Severity::Fatal));
}

#[test]
fn test_second_implementation_is_fatal() {
    let program = program(vec![
        ClassBuilder::new("Foo").superclass("CPObject").build(),
        ClassBuilder::new("Foo").superclass("CPObject").build(),
    ]);
    let result = objj_codegen::compile(&program, &CompilerOptions::default(), foundation());
    assert_eq!(result.err().map(|a| a.error.code), Some(ErrorCode::E4004));
}

#[test]
fn test_ivar_redeclared_in_subclass() {
    let compiled = compile_ok(vec![
        ClassBuilder::new("Base")
            .superclass("CPObject")
            .ivar(ivar_at(prim_ty("int"), "count", 10, 15))
            .build(),
        ClassBuilder::new("Derived")
            .superclass("Base")
            .ivar(ivar_at(prim_ty("int"), "count", 40, 45))
            .build(),
    ]);

    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W2004]);
    let diagnostic = &compiled.diagnostics[0];
    assert_eq!(
        diagnostic.message,
        "instance variable 'count' is already declared in class 'Base'"
    );
    assert_eq!(diagnostic.labels[1].span.start, 10);
    let derived = compiled.registry.class_by_name("Derived");
    assert_eq!(derived.map(|c| c.ivars.len()), Some(0));
}

#[test]
fn test_same_ivar_in_unrelated_classes() {
    let compiled = compile_ok(vec![
        ClassBuilder::new("A").superclass("CPObject").ivar(ivar(id_ty(), "value")).build(),
        ClassBuilder::new("B").superclass("CPObject").ivar(ivar(id_ty(), "value")).build(),
    ]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_accessors_are_synthesized_after_methods() {
    let code = js(vec![ClassBuilder::new("Person")
        .superclass("CPObject")
        .ivar(ivar_with_accessors(class_ty("CPString"), "name", Accessors::default()))
        .method(MethodBuilder::instance("description"))
        .build()]);

    assert!(code.contains(&lines(&[
        r#"    }, ["id"]),"#,
        r#"    new objj_method(sel_getUid("name"), function $Person__name(self, _cmd) {"#,
        "        return self.name;",
        r#"    }, ["CPString"]),"#,
        r#"    new objj_method(sel_getUid("setName:"), function $Person__setName_(self, _cmd, newValue) {"#,
        "        self.name = newValue;",
        r#"    }, ["void", "CPString"])"#,
        "]);",
    ])), "{code}");
}

#[test]
fn test_copy_setter_for_copyable_class() {
    let mut registry = foundation();
    if let Some(id) = registry.class_id("CPString") {
        registry
            .class_mut(id)
            .methods_mut(MethodKind::Instance)
            .insert(MethodDef::external("copy", &["id"]));
    }
    let compiled = compile_with(
        vec![ClassBuilder::new("Person")
            .superclass("CPObject")
            .ivar(ivar_with_accessors(class_ty("CPString"), "name", Accessors::default()))
            .build()],
        &CompilerOptions::default(),
        registry,
    );

    assert!(compiled.code.as_str().contains(&lines(&[
        "        if (self.name !== newValue)",
        r#"            self.name = (newValue == null ? null : newValue.isa.objj_msgSend0(newValue, "copy"));"#,
        r#"    }, ["void", "CPString"])"#,
    ])));
}

#[test]
fn test_readonly_accessor_has_no_setter() {
    let accessors = Accessors {
        readonly: true,
        ..Accessors::default()
    };
    let compiled = compile_ok(vec![ClassBuilder::new("Person")
        .superclass("CPObject")
        .ivar(ivar_with_accessors(prim_ty("int"), "age", accessors))
        .build()]);

    assert!(compiled.code.as_str().contains(r#"sel_getUid("age")"#));
    assert!(!compiled.code.as_str().contains("setAge:"));
    let person = compiled.registry.class_by_name("Person");
    assert!(person.is_some_and(|c| c.methods(MethodKind::Instance).contains("age")));
}

#[test]
fn test_explicit_getter_is_not_synthesized() {
    let code = js(vec![ClassBuilder::new("Person")
        .superclass("CPObject")
        .ivar(ivar_with_accessors(prim_ty("int"), "age", Accessors::default()))
        .method(MethodBuilder::instance("age").returns(prim_ty("int")).body(vec![ret(Some(num(42)))]))
        .build()]);

    assert_eq!(code.matches(r#"sel_getUid("age")"#).count(), 1);
    assert!(code.contains("return 42;"));
    assert!(code.contains(r#"sel_getUid("setAge:")"#));
}

#[test]
fn test_conflicting_return_type() {
    let compiled = compile_ok(vec![
        ClassBuilder::new("Base")
            .superclass("CPObject")
            .method(MethodBuilder::instance("count").returns(prim_ty("int")))
            .build(),
        ClassBuilder::new("Derived")
            .superclass("Base")
            .method(MethodBuilder::instance("count").returns(prim_ty("float")))
            .build(),
    ]);

    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W2001]);
    let diagnostic = &compiled.diagnostics[0];
    assert_eq!(
        diagnostic.message,
        "conflicting return type in implementation of 'count': 'int' vs 'float'"
    );
    assert_eq!(diagnostic.cross_references().count(), 1);
}

#[test]
fn test_conflicting_parameter_type() {
    let compiled = compile_ok(vec![
        ClassBuilder::new("Base")
            .superclass("CPObject")
            .method(MethodBuilder::instance("setCount:").param(Some(prim_ty("int")), "n"))
            .build(),
        ClassBuilder::new("Derived")
            .superclass("Base")
            .method(MethodBuilder::instance("setCount:").param(Some(prim_ty("float")), "n"))
            .build(),
    ]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W2002]);
}

#[test]
fn test_narrowing_id_to_class_is_allowed() {
    let compiled = compile_ok(vec![
        ClassBuilder::new("Base")
            .superclass("CPObject")
            .method(MethodBuilder::instance("item").returns(id_ty()))
            .build(),
        ClassBuilder::new("Derived")
            .superclass("Base")
            .method(MethodBuilder::instance("item").returns(class_ty("CPString")))
            .build(),
    ]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_override_checks_can_be_disabled() {
    let options = CompilerOptions {
        warnings: objj_codegen::WarningCategories::all()
            - objj_codegen::WarningCategories::PARAMETER_TYPES,
        ..CompilerOptions::default()
    };
    let compiled = compile_with(
        vec![
            ClassBuilder::new("Base")
                .superclass("CPObject")
                .method(MethodBuilder::instance("count").returns(prim_ty("int")))
                .build(),
            ClassBuilder::new("Derived")
                .superclass("Base")
                .method(MethodBuilder::instance("count").returns(prim_ty("float")))
                .build(),
        ],
        &options,
        foundation(),
    );
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_body_statements_between_ivars_and_methods() {
    let code = js(vec![ClassBuilder::new("Foo")
        .superclass("CPObject")
        .stmt(var("shared", Some(num(0))))
        .method(MethodBuilder::instance("bar"))
        .build()]);
    assert!(code.contains("objj_registerClassPair($the_class);\nvar shared = 0;\n\n// Instance methods"), "{code}");
}

#[test]
fn test_method_outside_class_is_fatal() {
    let program = program(vec![MethodBuilder::instance("orphan").stmt()]);
    let result = objj_codegen::compile(&program, &CompilerOptions::default(), foundation());
    assert_eq!(result.err().map(|a| a.error.code), Some(ErrorCode::E4002));
}
