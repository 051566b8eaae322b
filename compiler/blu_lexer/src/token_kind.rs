//! Token kinds seen by the parser.

use blu_ir::Name;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Fun,
    Return,
    Mut,
    Rec,
    Object,
    Final,
    Or,
    And,
    For,
    To,
    If,
    Then,
    Else,
    Print,
    Let,
    Nil,
    Import,
    Export,
    Len,
    Clone,
    True,
    False,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    /// `.{` opening an environment block
    DotLBrace,
    /// `<-`
    Assign,
    Eq,
    EqEq,
    /// `<>`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    At,
    /// `|>`
    Pipe,

    // Literals
    Number(f64),
    Str(Name),
    Ident(Name),

    Eof,
}

impl TokenKind {
    /// Human-readable description for parser errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Fun => "`fun`",
            TokenKind::Return => "`return`",
            TokenKind::Mut => "`mut`",
            TokenKind::Rec => "`rec`",
            TokenKind::Object => "`object`",
            TokenKind::Final => "`final`",
            TokenKind::Or => "`or`",
            TokenKind::And => "`and`",
            TokenKind::For => "`for`",
            TokenKind::To => "`to`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::Print => "`print`",
            TokenKind::Let => "`let`",
            TokenKind::Nil => "`nil`",
            TokenKind::Import => "`import`",
            TokenKind::Export => "`export`",
            TokenKind::Len => "`len`",
            TokenKind::Clone => "`clone`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::DotLBrace => "`.{`",
            TokenKind::Assign => "`<-`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`<>`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::At => "`@`",
            TokenKind::Pipe => "`|>`",
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
