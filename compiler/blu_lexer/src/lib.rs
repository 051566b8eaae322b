//! Lexer for Blu using logos with string interning.
//!
//! Produces a `TokenList` of `Lexeme`s, each carrying its kind and a
//! 1-based line/column position. Identifiers and string literals are
//! interned; string escapes are cooked here so the parser only sees final
//! contents.

mod cook_escape;
mod lex_error;
mod token_kind;

use blu_ir::{Span, StringInterner, Token};
use logos::Logos;

pub use lex_error::LexError;
pub use token_kind::TokenKind;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[token("fun")]
    Fun,
    #[token("return")]
    Return,
    #[token("mut")]
    Mut,
    #[token("rec")]
    Rec,
    #[token("object")]
    Object,
    #[token("final")]
    #[token("explicit")]
    Final,
    #[token("or")]
    Or,
    #[token("and")]
    And,
    #[token("for")]
    For,
    #[token("to")]
    To,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("print")]
    Print,
    #[token("let")]
    Let,
    #[token("nil")]
    Nil,
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("len")]
    Len,
    #[token("clone")]
    Clone,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(".{")]
    DotLBrace,
    #[token("<-")]
    Assign,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("@")]
    At,
    #[token("|>")]
    Pipe,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// A token kind with its source position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub token: Token,
}

/// Lexer output, always terminated by `TokenKind::Eof`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    lexemes: Vec<Lexeme>,
}

impl TokenList {
    pub fn as_slice(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// Token kinds only, for tests and debugging.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.lexemes.iter().map(|l| l.kind).collect()
    }
}

/// Tracks line starts so byte offsets can be turned into line/column.
struct LineTracker<'a> {
    source: &'a str,
    line: u32,
    line_start: usize,
}

impl<'a> LineTracker<'a> {
    fn new(source: &'a str) -> Self {
        LineTracker {
            source,
            line: 1,
            line_start: 0,
        }
    }

    fn newline(&mut self, newline_offset: usize) {
        self.line += 1;
        self.line_start = newline_offset + 1;
    }

    fn token(&self, range: std::ops::Range<usize>) -> Token {
        let column = self.source[self.line_start..range.start].chars().count() + 1;
        Token::new(
            Span::from_range(range),
            self.line,
            u32::try_from(column).unwrap_or(u32::MAX),
        )
    }
}

/// Lex a source file.
///
/// Stops at the first invalid character, unterminated string or invalid
/// escape.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut lexemes = Vec::new();
    let mut lines = LineTracker::new(source);
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let slice = lexer.slice();
        let token = lines.token(range.clone());
        let Ok(raw) = result else {
            return Err(lex_error_at(slice, token));
        };
        if raw == RawToken::Newline {
            lines.newline(range.start);
            continue;
        }
        let kind = convert(raw, slice, token, interner)?;
        lexemes.push(Lexeme { kind, token });
    }

    let end = lines.token(source.len()..source.len());
    lexemes.push(Lexeme {
        kind: TokenKind::Eof,
        token: end,
    });
    Ok(TokenList { lexemes })
}

fn lex_error_at(slice: &str, token: Token) -> LexError {
    match slice.chars().next() {
        Some(quote @ ('"' | '\'')) => LexError::UnterminatedString {
            quote,
            line: token.line,
            column: token.column,
        },
        found => LexError::UnexpectedChar {
            found: found.unwrap_or('\0'),
            line: token.line,
            column: token.column,
        },
    }
}

/// Turn a raw token into its kind, interning names and cooking strings.
fn convert(
    raw: RawToken,
    slice: &str,
    token: Token,
    interner: &StringInterner,
) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Number => {
            TokenKind::Number(slice.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                text: slice.to_owned(),
                line: token.line,
                column: token.column,
            })?)
        }
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&cook_escape::cook(content, token)?))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        RawToken::Fun => TokenKind::Fun,
        RawToken::Return => TokenKind::Return,
        RawToken::Mut => TokenKind::Mut,
        RawToken::Rec => TokenKind::Rec,
        RawToken::Object => TokenKind::Object,
        RawToken::Final => TokenKind::Final,
        RawToken::Or => TokenKind::Or,
        RawToken::And => TokenKind::And,
        RawToken::For => TokenKind::For,
        RawToken::To => TokenKind::To,
        RawToken::If => TokenKind::If,
        RawToken::Then => TokenKind::Then,
        RawToken::Else => TokenKind::Else,
        RawToken::Print => TokenKind::Print,
        RawToken::Let => TokenKind::Let,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Import => TokenKind::Import,
        RawToken::Export => TokenKind::Export,
        RawToken::Len => TokenKind::Len,
        RawToken::Clone => TokenKind::Clone,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotLBrace => TokenKind::DotLBrace,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::At => TokenKind::At,
        RawToken::Pipe => TokenKind::Pipe,
        // Newlines are consumed by the caller.
        RawToken::Newline => TokenKind::Eof,
    };
    Ok(kind)
}
