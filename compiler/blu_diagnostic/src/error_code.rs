//! Error codes for all diagnostics.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Analysis errors and warnings
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid escape sequence
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,
    /// Expected identifier
    E1004,

    // Analysis Errors (E2xxx)
    /// Identifier not found in any scope
    E2001,
    /// Name exported twice
    E2002,
    /// Export from the entry unit
    E2003,
    /// Duplicate function parameter
    E2004,
    /// Reassignment of an immutable binding
    E2005,
    /// Assignment to a binding that does not exist
    E2006,
    /// Redeclaration of a final binding in the same scope
    E2007,
    /// Duplicate record field
    E2008,
    /// `return` outside of a function
    E2009,
    /// Right-hand side of a pipe is not a call
    E2010,
    /// Call on an object literal
    E2011,
    /// Composition from an unknown binding
    E2012,
    /// Export of a binding that does not exist
    E2013,

    // Analysis Warnings (E21xx)
    /// Duplicate object constructor parameter
    E2101,
    /// Duplicate composition source
    E2102,
    /// Top-level `main` is not final
    E2103,

    // Runtime Errors (E6xxx)
    /// Value is not callable
    E6001,
    /// Wrong number of arguments
    E6002,
    /// Operand of the wrong kind
    E6003,
    /// Binding not found at run time
    E6004,
    /// Index out of range
    E6005,
    /// Condition is not a boolean
    E6006,
    /// Range bound is not a number
    E6007,
    /// Record or property not found
    E6008,
    /// Call depth exhausted
    E6009,
    /// Imported file not found
    E6010,
    /// Imported unit failed
    E6011,
    /// Circular import
    E6012,
    /// Native function failed
    E6013,
    /// Invalid index or assignment target
    E6014,
    /// Duplicate field in a record literal
    E6015,

    // Internal Errors (E9xxx)
    /// Internal interpreter error
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2101 => "E2101",
            ErrorCode::E2102 => "E2102",
            ErrorCode::E2103 => "E2103",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
            ErrorCode::E6015 => "E6015",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_analysis_code(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }

    /// Short description used in `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "invalid escape sequence",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "invalid assignment target",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E2001 => "identifier not found",
            ErrorCode::E2002 => "duplicate export",
            ErrorCode::E2003 => "export from the entry unit",
            ErrorCode::E2004 => "duplicate parameter",
            ErrorCode::E2005 => "reassignment of immutable binding",
            ErrorCode::E2006 => "assignment to unknown binding",
            ErrorCode::E2007 => "binding shadows final binding",
            ErrorCode::E2008 => "duplicate record field",
            ErrorCode::E2009 => "return outside function",
            ErrorCode::E2010 => "pipe target is not a call",
            ErrorCode::E2011 => "call on object literal",
            ErrorCode::E2012 => "composition from unknown binding",
            ErrorCode::E2013 => "export of unknown binding",
            ErrorCode::E2101 => "duplicate object parameter",
            ErrorCode::E2102 => "duplicate composition source",
            ErrorCode::E2103 => "main is not final",
            ErrorCode::E6001 => "value is not callable",
            ErrorCode::E6002 => "arity mismatch",
            ErrorCode::E6003 => "wrong operand kind",
            ErrorCode::E6004 => "unresolvable binding",
            ErrorCode::E6005 => "index out of range",
            ErrorCode::E6006 => "non-boolean condition",
            ErrorCode::E6007 => "non-numeric range bound",
            ErrorCode::E6008 => "record or property not found",
            ErrorCode::E6009 => "stack exhausted",
            ErrorCode::E6010 => "import not found",
            ErrorCode::E6011 => "import failed",
            ErrorCode::E6012 => "circular import",
            ErrorCode::E6013 => "native function failed",
            ErrorCode::E6014 => "invalid target",
            ErrorCode::E6015 => "duplicate record field",
            ErrorCode::E9001 => "internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
