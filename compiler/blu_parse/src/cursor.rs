//! Token navigation.

use blu_ir::{Name, Token};
use blu_lexer::{Lexeme, TokenKind};

/// Position within a token list. The list always ends with `Eof`, and the
/// cursor never advances past it.
pub struct Cursor<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(lexemes: &'a [Lexeme]) -> Self {
        Cursor { lexemes, pos: 0 }
    }

    fn at(&self, pos: usize) -> &'a Lexeme {
        let last = self.lexemes.len().saturating_sub(1);
        &self.lexemes[pos.min(last)]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.at(self.pos).kind
    }

    pub fn current_token(&self) -> Token {
        self.at(self.pos).token
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.at(self.pos + 1).kind
    }

    /// Kind of the most recently consumed token.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.pos.checked_sub(1).map(|p| self.at(p).kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Consume the current token, returning it.
    pub fn advance(&mut self) -> Lexeme {
        let lexeme = *self.at(self.pos);
        if !self.is_at_end() {
            self.pos += 1;
        }
        lexeme
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Current identifier's name, if the current token is one.
    pub fn ident_name(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}
