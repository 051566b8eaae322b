//! Parse error types.

use blu_diagnostic::{Diagnostic, ErrorCode};
use blu_ir::Token;
use blu_lexer::{LexError, TokenKind};
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },

    #[error("Expected expression, found {found}")]
    ExpectedExpression { found: TokenKind },

    #[error("Expected identifier, found {found}")]
    ExpectedIdentifier { found: TokenKind },

    #[error("Invalid assignment target")]
    InvalidAssignTarget,
}

/// A syntax error with its position.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Token,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Token) -> Self {
        ParseError { kind, token }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::InvalidAssignTarget => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(Some(self.token))
    }
}

/// Any error that stops a unit before analysis.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::Lex(err) => err.to_diagnostic(),
            SyntaxError::Parse(err) => err.to_diagnostic(),
        }
    }
}
