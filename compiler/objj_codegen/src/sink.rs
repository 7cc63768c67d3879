//! Output Sink
//!
//! The generator writes tokens through [`CodeSink`]: literal text,
//! optionally tagged with a source span, and named format rules whose
//! concrete spacing the sink decides. [`JsBuffer`] is the default
//! in-memory implementation.

use std::fmt;

use objj_ir::Span;

use crate::options::FormatOptions;

/// Named spacing slots in the output.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FormatRule {
    /// Line break between statements or declaration parts.
    Newline,
    /// Between a statement head and its `{`.
    BeforeLeftBrace,
    /// After a separating comma.
    Comma,
    /// After an object-literal colon.
    Colon,
    BeforeOperator,
    AfterOperator,
    /// Between a keyword and its parenthesized clause.
    AfterKeyword,
    BeforeElse,
    BeforeCatch,
    BeforeFinally,
    /// After each `;` inside a `for (...)` header.
    ForSeparator,
    /// Between the statement lists of two `case` clauses.
    BetweenCaseBlocks,
}

impl FormatRule {
    /// The rule's external name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Newline => "newline",
            Self::BeforeLeftBrace => "before-left-brace",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::BeforeOperator => "before-operator",
            Self::AfterOperator => "after-operator",
            Self::AfterKeyword => "after-keyword",
            Self::BeforeElse => "before-else",
            Self::BeforeCatch => "before-catch",
            Self::BeforeFinally => "before-finally",
            Self::ForSeparator => "for-separator",
            Self::BetweenCaseBlocks => "between-case-blocks",
        }
    }
}

/// Destination for generated code.
pub trait CodeSink: Clone {
    /// Append literal text.
    fn concat(&mut self, text: &str);

    /// Append literal text generated for the node at `span`.
    fn concat_node(&mut self, text: &str, span: Span);

    /// Append source text for the node at `span` exactly as given.
    ///
    /// Line breaks inside `text` belong to a token, such as a string with
    /// a line continuation, and are not followed by indentation.
    fn concat_verbatim(&mut self, text: &str, span: Span);

    /// Append the spacing the sink associates with `rule`.
    fn concat_format(&mut self, rule: FormatRule);

    /// Increase indentation for lines started after this call.
    fn indent(&mut self);

    /// Decrease indentation for lines started after this call.
    fn dedent(&mut self);

    /// An empty sink with the same configuration and indentation level.
    #[must_use]
    fn fork(&self) -> Self;

    /// Append a fragment produced by [`CodeSink::fork`].
    fn splice(&mut self, fragment: Self);

    fn is_empty(&self) -> bool;

    /// A binary operator with its surrounding spacing.
    fn concat_operator(&mut self, op: &str) {
        self.concat_format(FormatRule::BeforeOperator);
        self.concat(op);
        self.concat_format(FormatRule::AfterOperator);
    }

    fn concat_comma(&mut self) {
        self.concat(",");
        self.concat_format(FormatRule::Comma);
    }
}

/// Association between a generated byte offset and the source it came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SourceMapping {
    pub generated: usize,
    pub source: Span,
}

/// In-memory JavaScript output with indentation and source mappings.
#[derive(Clone, Debug)]
pub struct JsBuffer {
    text: String,
    mappings: Vec<SourceMapping>,
    indent_unit: String,
    level: usize,
    at_line_start: bool,
}

impl Default for JsBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsBuffer {
    pub fn new() -> Self {
        Self::with_format(&FormatOptions::default())
    }

    pub fn with_format(format: &FormatOptions) -> Self {
        JsBuffer {
            text: String::new(),
            mappings: Vec::new(),
            indent_unit: format.indent_unit(),
            level: 0,
            at_line_start: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn mappings(&self) -> &[SourceMapping] {
        &self.mappings
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Write pending indentation if a new line has started.
    fn pad(&mut self) {
        if self.at_line_start {
            for _ in 0..self.level {
                self.text.push_str(&self.indent_unit);
            }
            self.at_line_start = false;
        }
    }

    fn push_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.text.push('\n');
                self.at_line_start = true;
            }
            if !line.is_empty() {
                self.pad();
                self.text.push_str(line);
            }
        }
    }
}

impl CodeSink for JsBuffer {
    fn concat(&mut self, text: &str) {
        self.push_text(text);
    }

    fn concat_node(&mut self, text: &str, span: Span) {
        if !text.starts_with('\n') && !text.is_empty() {
            self.pad();
        }
        self.mappings.push(SourceMapping {
            generated: self.text.len(),
            source: span,
        });
        self.push_text(text);
    }

    fn concat_verbatim(&mut self, text: &str, span: Span) {
        if text.is_empty() {
            return;
        }
        self.pad();
        self.mappings.push(SourceMapping {
            generated: self.text.len(),
            source: span,
        });
        self.text.push_str(text);
        self.at_line_start = text.ends_with('\n');
    }

    fn concat_format(&mut self, rule: FormatRule) {
        match rule {
            FormatRule::Newline | FormatRule::BetweenCaseBlocks => self.push_text("\n"),
            FormatRule::BeforeLeftBrace
            | FormatRule::Comma
            | FormatRule::Colon
            | FormatRule::BeforeOperator
            | FormatRule::AfterOperator
            | FormatRule::AfterKeyword
            | FormatRule::BeforeElse
            | FormatRule::BeforeCatch
            | FormatRule::BeforeFinally
            | FormatRule::ForSeparator => self.push_text(" "),
        }
    }

    fn indent(&mut self) {
        self.level += 1;
    }

    fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    fn fork(&self) -> Self {
        JsBuffer {
            text: String::new(),
            mappings: Vec::new(),
            indent_unit: self.indent_unit.clone(),
            level: self.level,
            at_line_start: false,
        }
    }

    fn splice(&mut self, fragment: Self) {
        if fragment.text.is_empty() {
            return;
        }
        if !fragment.text.starts_with('\n') {
            self.pad();
        }
        let base = self.text.len();
        self.text.push_str(&fragment.text);
        self.mappings
            .extend(fragment.mappings.into_iter().map(|m| SourceMapping {
                generated: m.generated + base,
                source: m.source,
            }));
        self.at_line_start = fragment.at_line_start;
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for JsBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
