//! Lexer errors.

use blu_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character '{found}'")]
    UnexpectedChar { found: char, line: u32, column: u32 },

    #[error("Unterminated string literal, expected closing {quote}")]
    UnterminatedString { quote: char, line: u32, column: u32 },

    #[error("Invalid escape sequence '\\{escape}'")]
    InvalidEscape { escape: char, line: u32, column: u32 },

    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String, line: u32, column: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnexpectedChar { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::InvalidEscape { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            LexError::UnexpectedChar { column, .. }
            | LexError::UnterminatedString { column, .. }
            | LexError::InvalidEscape { column, .. }
            | LexError::InvalidNumber { column, .. } => *column,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString { .. } => ErrorCode::E0001,
            LexError::UnexpectedChar { .. } | LexError::InvalidNumber { .. } => ErrorCode::E0002,
            LexError::InvalidEscape { .. } => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(Some(blu_ir::Token::new(
                blu_ir::Span::DUMMY,
                self.line(),
                self.column(),
            )))
    }
}
