use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: first letter is the default severity (`W` warning, `E` fatal),
/// first digit the area:
/// - W1xxx: Identifier resolution and scoping
/// - W2xxx: Declarations, overrides and protocol conformance
/// - W3xxx: Style
/// - E4xxx: Fatal declaration errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Identifier Warnings (W1xxx)
    /// Assignment to an undeclared identifier inside a function or method
    W1001,
    /// Reference to an identifier that is not declared anywhere
    W1002,
    /// Assignment to a read-only predefined global
    W1003,
    /// Local declaration hides a global, file variable or class
    W1004,
    /// Local declaration hides an instance variable
    W1005,

    // Declaration Warnings (W2xxx)
    /// Conflicting return type in a method override
    W2001,
    /// Conflicting parameter type in a method override
    W2002,
    /// Adopted protocol method not implemented
    W2003,
    /// Instance variable redeclared in a subclass
    W2004,
    /// Reference to an undefined protocol
    W2005,
    /// `super` used outside a method body
    W2006,

    // Style Warnings (W3xxx)
    /// `debugger` statement
    W3001,
    /// Reserved word used as a variable name
    W3002,

    // Fatal Declaration Errors (E4xxx)
    /// Protocol declared twice
    E4001,
    /// Method declared outside a class or protocol
    E4002,
    /// Superclass name does not resolve to a class
    E4003,
    /// Class implemented twice
    E4004,
    /// Protocol inherits from an undefined protocol
    E4005,

    // Internal Errors (E9xxx)
    /// Internal generator error
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W1003 => "W1003",
            ErrorCode::W1004 => "W1004",
            ErrorCode::W1005 => "W1005",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
            ErrorCode::W2003 => "W2003",
            ErrorCode::W2004 => "W2004",
            ErrorCode::W2005 => "W2005",
            ErrorCode::W2006 => "W2006",
            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line explanation, for `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::W1001 => "assignment to an undeclared identifier creates a global",
            ErrorCode::W1002 => "identifier is not declared in any enclosing scope",
            ErrorCode::W1003 => "predefined global is read-only",
            ErrorCode::W1004 => "local declaration hides an outer declaration",
            ErrorCode::W1005 => "local declaration hides an instance variable",
            ErrorCode::W2001 => "override changes the return type",
            ErrorCode::W2002 => "override changes a parameter type",
            ErrorCode::W2003 => "class does not implement a method its protocols require",
            ErrorCode::W2004 => "instance variable is already declared by a superclass",
            ErrorCode::W2005 => "protocol is not defined",
            ErrorCode::W2006 => "`super` has no meaning outside a method",
            ErrorCode::W3001 => "debugger statement left in code",
            ErrorCode::W3002 => "reserved word used as a variable name",
            ErrorCode::E4001 => "protocol is already defined",
            ErrorCode::E4002 => "method declarations must appear inside @implementation or @protocol",
            ErrorCode::E4003 => "superclass is not defined",
            ErrorCode::E4004 => "class is already defined",
            ErrorCode::E4005 => "inherited protocol is not defined",
            ErrorCode::E9001 => "internal code generator error",
        }
    }

    /// Fatal codes abort the compilation unit.
    pub fn is_fatal(&self) -> bool {
        self.as_str().starts_with('E')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
