//! Recursive descent parser for Blu.
//!
//! Produces a flat AST in an `ExprArena`. Parsing stops at the first syntax
//! error; there is no recovery, since a unit with a syntax error is neither
//! analysed nor evaluated.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, SyntaxError};

use blu_ir::{Expr, ExprArena, ExprId, ExprKind, Name, Program, StringInterner, Token};
use blu_lexer::{Lexeme, TokenKind, TokenList};

/// Parsed unit: its arena and the root body.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub program: Program,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    interner: &'a StringInterner,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens.as_slice()),
            arena: ExprArena::new(),
            interner,
        }
    }

    /// Parse a whole unit.
    pub fn parse(mut self) -> Result<ParseOutput, ParseError> {
        let program = self.parse_program()?;
        Ok(ParseOutput {
            arena: self.arena,
            program,
        })
    }

    fn alloc(&mut self, kind: ExprKind, token: Token) -> ExprId {
        self.arena.alloc(Expr::new(kind, Some(token)))
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.cursor.current_token())
    }

    /// Consume `kind` or fail naming what was expected.
    fn expect(&mut self, kind: TokenKind) -> Result<Lexeme, ParseError> {
        if self.cursor.check(kind) {
            Ok(self.cursor.advance())
        } else {
            Err(self.error(ParseErrorKind::UnexpectedToken {
                expected: kind.describe(),
                found: self.cursor.current_kind(),
            }))
        }
    }

    fn expect_ident(&mut self) -> Result<(Name, Token), ParseError> {
        match self.cursor.ident_name() {
            Some(name) => {
                let token = self.cursor.advance().token;
                Ok((name, token))
            }
            None => Err(self.error(ParseErrorKind::ExpectedIdentifier {
                found: self.cursor.current_kind(),
            })),
        }
    }

    /// Whether the current identifier spells `word`.
    fn check_contextual(&self, word: &str) -> bool {
        self.cursor
            .ident_name()
            .is_some_and(|name| self.interner.lookup(name) == word)
    }
}

/// Parse a token list.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<ParseOutput, ParseError> {
    Parser::new(tokens, interner).parse()
}

/// Lex and parse source text.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<ParseOutput, SyntaxError> {
    let tokens = blu_lexer::lex(source, interner)?;
    let output = parse(&tokens, interner)?;
    tracing::debug!(nodes = output.arena.len(), "parsed unit");
    Ok(output)
}

#[cfg(test)]
mod tests;
