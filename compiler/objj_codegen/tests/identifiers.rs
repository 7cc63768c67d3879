//! Identifier resolution and scope diagnostics.

mod common;

use common::{codes, compile_ok, compile_with, foundation, js, lines};
use objj_codegen::{CompilerOptions, GlobalAccess, WarningCategories};
use objj_diagnostic::ErrorCode;
use objj_ir::build::{
    assign, call, expr_stmt, func_expr, function_decl, id_ty, ident, ident_at, ivar, ivar_at, num,
    prim_ty, ret, var, var_at, ClassBuilder, MethodBuilder,
};
use pretty_assertions::assert_eq;

fn counter_class(method: MethodBuilder) -> ClassBuilder {
    ClassBuilder::new("Counter")
        .superclass("CPObject")
        .ivar(ivar_at(prim_ty("int"), "count", 5, 10))
        .method(method)
}

#[test]
fn test_implicit_global_in_function() {
    let compiled = compile_ok(vec![function_decl(
        "setup",
        &[],
        vec![
            expr_stmt(assign(ident("leaked"), num(1))),
            expr_stmt(assign(ident("leaked"), num(2))),
        ],
    )]);

    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1001]);
    assert_eq!(
        compiled.diagnostics[0].message,
        "implicitly creating a global variable in the function 'setup'; did you mean to use var?"
    );
}

#[test]
fn test_implicit_global_in_method_names_selector() {
    let compiled = compile_ok(vec![ClassBuilder::new("Foo")
        .superclass("CPObject")
        .method(MethodBuilder::instance("reset:").param(None, "x").body(vec![expr_stmt(assign(
            ident("total"),
            ident("x"),
        ))]))
        .build()]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1001]);
    assert!(compiled.diagnostics[0].message.contains("method 'reset:'"));
}

#[test]
fn test_file_level_assignment_creates_global() {
    let compiled = compile_ok(vec![
        expr_stmt(assign(ident_at("config", 3, 9), num(1))),
        function_decl("read", &[], vec![var("config", None)]),
    ]);

    assert!(compiled.registry.is_global("config"));
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1004]);
    let diagnostic = &compiled.diagnostics[0];
    assert_eq!(
        diagnostic.message,
        "local declaration of 'config' hides a global variable"
    );
    assert_eq!(diagnostic.labels[1].span.start, 3);
}

#[test]
fn test_hoisted_var_binds_earlier_uses() {
    let compiled = compile_ok(vec![function_decl(
        "f",
        &[],
        vec![
            expr_stmt(assign(ident("z"), num(1))),
            ret(Some(ident("y"))),
            var("y", None),
            var("z", None),
        ],
    )]);
    assert_eq!(compiled.diagnostics, vec![]);
}

#[test]
fn test_later_function_declaration_binds_call() {
    let compiled = compile_ok(vec![
        expr_stmt(call(ident("later"), vec![])),
        function_decl("later", &[], vec![]),
    ]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_unknown_identifier_suggests_class() {
    let compiled = compile_ok(vec![expr_stmt(ident("CPObjet"))]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1002]);
    let diagnostic = &compiled.diagnostics[0];
    assert_eq!(
        diagnostic.message,
        "reference to unknown identifier 'CPObjet'; did you mean 'CPObject'?"
    );
    assert_eq!(diagnostic.suggestions, vec!["CPObject".to_string()]);
}

#[test]
fn test_unknown_identifier_inside_nested_function_reported_once() {
    let inner = func_expr(None, &[], vec![ret(Some(ident("missing")))]);
    let compiled = compile_ok(vec![function_decl("outer", &[], vec![ret(Some(inner))])]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1002]);
}

#[test]
fn test_outer_var_binds_nested_function_use() {
    let inner = func_expr(None, &[], vec![ret(Some(ident("captured")))]);
    let compiled = compile_ok(vec![function_decl(
        "outer",
        &[],
        vec![ret(Some(inner)), var("captured", Some(num(1)))],
    )]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_read_only_global_assignment() {
    let compiled = compile_ok(vec![expr_stmt(assign(ident("Math"), num(1)))]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1003]);
    assert!(!compiled.registry.is_global("Math"));
}

#[test]
fn test_writable_global_assignment() {
    let compiled = compile_ok(vec![function_decl(
        "f",
        &[],
        vec![expr_stmt(assign(ident("onload"), num(1)))],
    )]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_extra_globals_are_predefined() {
    let options = CompilerOptions {
        extra_globals: vec![("jQuery".to_string(), GlobalAccess::READ_ONLY)],
        ..CompilerOptions::default()
    };
    let compiled = compile_with(
        vec![
            expr_stmt(ident("jQuery")),
            expr_stmt(assign(ident("jQuery"), num(0))),
        ],
        &options,
        foundation(),
    );
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1003]);
}

#[test]
fn test_warning_limit_caps_reported_warnings() {
    let body = || {
        vec![
            expr_stmt(ident("alpha")),
            expr_stmt(ident("beta")),
            expr_stmt(ident("gamma")),
        ]
    };
    assert_eq!(compile_ok(body()).diagnostics.len(), 3);

    let options = CompilerOptions {
        warning_limit: 2,
        ..CompilerOptions::default()
    };
    let compiled = compile_with(body(), &options, foundation());
    assert_eq!(
        codes(&compiled.diagnostics),
        vec![ErrorCode::W1002, ErrorCode::W1002]
    );
    assert_eq!(compiled.code.as_str(), "alpha;\nbeta;\ngamma;\n");
}

#[test]
fn test_local_hides_predefined_global() {
    let compiled = compile_ok(vec![function_decl(
        "f",
        &[],
        vec![var("window", None), var("document", None)],
    )]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1004]);
    assert_eq!(
        compiled.diagnostics[0].message,
        "local declaration of 'window' hides a predefined global"
    );
    assert_eq!(compiled.diagnostics[0].cross_references().count(), 0);
}

#[test]
fn test_local_hides_file_variable_and_class() {
    let compiled = compile_ok(vec![
        var_at("shared", 0, 6, None),
        function_decl("f", &[], vec![var("shared", None), var("CPString", None)]),
    ]);
    let messages: Vec<&str> = compiled.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "local declaration of 'shared' hides a file variable",
            "local declaration of 'CPString' hides a class",
        ]
    );
}

#[test]
fn test_file_level_declarations_do_not_warn_about_hiding() {
    let compiled = compile_ok(vec![var("window", None)]);
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_shadow_warnings_can_be_disabled() {
    let options = CompilerOptions {
        warnings: WarningCategories::all() - WarningCategories::SHADOWED_VARS,
        ..CompilerOptions::default()
    };
    let compiled = compile_with(
        vec![function_decl("f", &[], vec![var("window", None)])],
        &options,
        foundation(),
    );
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_reserved_word_variable() {
    let compiled = compile_ok(vec![var("arguments", None)]);
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W3002]);
}

#[test]
fn test_ivar_reference_becomes_member_access() {
    let code = js(vec![counter_class(
        MethodBuilder::instance("increment").body(vec![expr_stmt(assign(ident("count"), num(1)))]),
    )
    .build()]);
    assert!(code.contains("        self.count = 1;\n"), "{code}");
}

#[test]
fn test_ivar_is_not_visible_in_class_method() {
    let compiled = compile_ok(vec![counter_class(
        MethodBuilder::class("peek").body(vec![ret(Some(ident("count")))]),
    )
    .build()]);
    assert!(compiled.code.as_str().contains("        return count;\n"));
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1002]);
}

#[test]
fn test_local_hides_ivar() {
    let compiled = compile_ok(vec![counter_class(MethodBuilder::instance("calc").body(vec![
        var("count", Some(num(1))),
        ret(Some(ident("count"))),
        ret(Some(ident("count"))),
    ]))
    .build()]);

    assert!(compiled.code.as_str().contains("        return count;\n"));
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1005]);
    let diagnostic = &compiled.diagnostics[0];
    assert_eq!(
        diagnostic.message,
        "local declaration of 'count' hides an instance variable"
    );
    assert_eq!(diagnostic.labels[1].span.start, 5);
}

#[test]
fn test_var_after_ivar_use_warns() {
    let compiled = compile_ok(vec![counter_class(MethodBuilder::instance("calc").body(vec![
        expr_stmt(ident("count")),
        var("count", None),
    ]))
    .build()]);
    assert!(compiled.code.as_str().contains("        self.count;\n"));
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1005]);
}

#[test]
fn test_ivar_hidden_by_local_of_enclosing_function() {
    let compiled = compile_ok(vec![ClassBuilder::new("Box")
        .superclass("CPObject")
        .ivar(ivar(id_ty(), "content"))
        .method(MethodBuilder::instance("open").body(vec![
            var("content", None),
            expr_stmt(func_expr(None, &[], vec![ret(Some(ident("content")))])),
        ]))
        .build()]);
    assert!(compiled.code.as_str().contains("return content;"));
    assert_eq!(codes(&compiled.diagnostics), vec![ErrorCode::W1005]);
}

#[test]
fn test_ivar_in_nested_function_of_method() {
    let code = js(vec![counter_class(MethodBuilder::instance("later").body(vec![ret(Some(
        func_expr(None, &[], vec![ret(Some(ident("count")))]),
    ))]))
    .build()]);
    assert!(code.contains("return self.count;"), "{code}");
}

#[test]
fn test_file_level_code_has_no_ivars() {
    let code = js(vec![
        counter_class(MethodBuilder::instance("noop")).build(),
        var("count", Some(num(3))),
        expr_stmt(ident("count")),
    ]);
    assert!(code.ends_with(&lines(&["var count = 3;", "count;"])), "{code}");
}
