//! Compiler configuration.

use bitflags::bitflags;
use objj_ir::Accessors;

use crate::globals::GlobalAccess;

bitflags! {
    /// Diagnostic categories that can be switched off individually.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct WarningCategories: u16 {
        /// Assignment to an undeclared name inside a function or method.
        const IMPLICIT_GLOBALS = 1 << 0;
        /// Reference to a name declared nowhere.
        const UNKNOWN_IDENTIFIERS = 1 << 1;
        /// Assignment to a read-only predefined global.
        const READ_ONLY_GLOBALS = 1 << 2;
        /// Local declaration hiding a global, file variable or class.
        const SHADOWED_VARS = 1 << 3;
        /// Local declaration hiding an instance variable.
        const SHADOWED_IVARS = 1 << 4;
        /// `debugger` statements.
        const DEBUGGER = 1 << 5;
        /// Conflicting types between a method and the declaration it overrides.
        const PARAMETER_TYPES = 1 << 6;
    }
}

impl Default for WarningCategories {
    fn default() -> Self {
        Self::all()
    }
}

/// Naming transform applied to an ivar name before deriving accessor names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AccessorStyle {
    /// `value` -> `value` / `setValue:`
    #[default]
    Plain,
    /// `_value` -> `value` / `setValue:`
    StripUnderscore,
}

impl AccessorStyle {
    fn property_name<'a>(self, ivar: &'a str) -> &'a str {
        match self {
            AccessorStyle::Plain => ivar,
            AccessorStyle::StripUnderscore => {
                let stripped = ivar.trim_start_matches('_');
                if stripped.is_empty() {
                    ivar
                } else {
                    stripped
                }
            }
        }
    }

    /// Getter selector and, unless read-only, setter selector for an ivar.
    pub fn accessor_names(self, ivar: &str, accessors: &Accessors) -> (String, Option<String>) {
        let property = accessors
            .property
            .as_deref()
            .unwrap_or_else(|| self.property_name(ivar));
        let getter = accessors
            .getter
            .clone()
            .unwrap_or_else(|| property.to_string());
        if accessors.readonly {
            return (getter, None);
        }
        let setter = accessors.setter.clone().unwrap_or_else(|| {
            let mut chars = property.chars();
            let capitalized: String = chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default();
            format!("set{capitalized}:")
        });
        (getter, Some(setter))
    }
}

/// Indentation settings; only used to initialise the default output buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    pub indent_string: String,
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent_string: " ".to_string(),
            indent_width: 4,
        }
    }
}

impl FormatOptions {
    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        self.indent_string.repeat(self.indent_width)
    }
}

/// Options for one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct CompilerOptions {
    pub format: FormatOptions,
    /// Emit `name = function(...)` instead of `function name(...)`.
    pub transform_named_function_to_assignment: bool,
    pub warnings: WarningCategories,
    pub accessor_style: AccessorStyle,
    /// Globals layered over the built-in predefined table.
    pub extra_globals: Vec<(String, GlobalAccess)>,
    /// Keep at most this many warnings, in the order they are reported
    /// (0 = unlimited). Errors are always kept.
    pub warning_limit: usize,
}

impl CompilerOptions {
    pub fn warns_about(&self, category: WarningCategories) -> bool {
        self.warnings.contains(category)
    }
}

#[cfg(test)]
mod tests;
