//! Shared helpers for the code generator integration tests.

#![allow(dead_code)]

use objj_codegen::{compile, Compiled, CompilerOptions, Registry};
use objj_diagnostic::{Diagnostic, ErrorCode};
use objj_ir::{Program, Stmt};

/// A registry with the root class most fixtures subclass.
pub fn foundation() -> Registry {
    let mut registry = Registry::new();
    registry.declare_external_class("CPObject", None);
    registry.declare_external_class("CPString", Some("CPObject"));
    registry
}

pub fn compile_with(body: Vec<Stmt>, options: &CompilerOptions, registry: Registry) -> Compiled {
    let program: Program = objj_ir::build::program(body);
    match compile(&program, options, registry) {
        Ok(compiled) => compiled,
        Err(aborted) => panic!("unexpected abort: {aborted}"),
    }
}

pub fn compile_ok(body: Vec<Stmt>) -> Compiled {
    compile_with(body, &CompilerOptions::default(), foundation())
}

/// Generated code of `body`, compiled against [`foundation`].
pub fn js(body: Vec<Stmt>) -> String {
    compile_ok(body).code.into_string()
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

/// Join lines with `\n`, adding the trailing newline every top-level
/// statement ends with.
pub fn lines(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
