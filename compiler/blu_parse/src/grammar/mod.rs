//! Grammar productions.
//!
//! - `mod.rs`: program, blocks and statements
//! - `expr.rs`: operator precedence and postfix forms
//! - `primary.rs`: literals, functions, objects, imports and control flow

mod expr;
mod primary;

use blu_ir::{BindingKind, ExprId, ExprKind, Ident, Param, Program};
use blu_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_program(&mut self) -> Result<Program, ParseError> {
        let token = self.cursor.current_token();
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }
        let body = self.alloc(ExprKind::Body(stmts), token);
        Ok(Program { body })
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<ExprId, ParseError> {
        let open = self.expect(TokenKind::LBrace)?;
        let stmts = self.parse_statements_until_brace()?;
        Ok(self.alloc(ExprKind::Body(stmts), open.token))
    }

    /// Statements up to and including the closing `}`.
    pub(crate) fn parse_statements_until_brace(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::RBrace) {
                return Ok(stmts);
            }
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.cursor.is_at_end() {
                return Err(self.error(ParseErrorKind::UnexpectedToken {
                    expected: TokenKind::RBrace.describe(),
                    found: TokenKind::Eof,
                }));
            }
            stmts.push(self.parse_statement()?);
        }
    }

    fn parse_statement(&mut self) -> Result<ExprId, ParseError> {
        blu_stack::ensure_sufficient_stack(|| {
            let stmt = match self.cursor.current_kind() {
                TokenKind::Let => self.parse_let()?,
                TokenKind::Print => self.parse_print()?,
                TokenKind::Return => self.parse_return()?,
                TokenKind::Export => self.parse_export()?,
                TokenKind::LBrace => self.parse_block()?,
                _ => self.parse_expr()?,
            };
            self.finish_statement()?;
            Ok(stmt)
        })
    }

    /// A statement ends with `;`, unless it ended with `}` or is the last
    /// one before a closing brace or the end of the file.
    fn finish_statement(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Semicolon)
            || self.cursor.previous_kind() == Some(TokenKind::RBrace)
            || self.cursor.check(TokenKind::RBrace)
            || self.cursor.is_at_end()
        {
            return Ok(());
        }
        Err(self.error(ParseErrorKind::UnexpectedToken {
            expected: TokenKind::Semicolon.describe(),
            found: self.cursor.current_kind(),
        }))
    }

    /// `let [final] [mut|rec] name = expr` or `let [final] [rec] name p1 p2 = { body }`
    pub(crate) fn parse_let(&mut self) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::Let)?;
        let is_final = self.cursor.eat(TokenKind::Final);
        let kind = if self.cursor.eat(TokenKind::Mut) {
            BindingKind::Mutable
        } else if self.cursor.eat(TokenKind::Rec) {
            BindingKind::Recursive
        } else {
            BindingKind::None
        };
        let (name, name_token) = self.expect_ident()?;

        let value = if self.cursor.check_ident() {
            let mut params = Vec::new();
            while let Some(param) = self.cursor.ident_name() {
                let token = self.cursor.advance().token;
                params.push(Param {
                    name: param,
                    token: Some(token),
                    is_mutable: false,
                });
            }
            self.expect(TokenKind::Eq)?;
            let body = self.parse_block()?;
            self.alloc(ExprKind::Function { params, body }, name_token)
        } else {
            self.expect(TokenKind::Eq)?;
            self.parse_expr()?
        };

        Ok(self.alloc(
            ExprKind::Binding {
                name,
                kind,
                is_final,
                value,
            },
            name_token,
        ))
    }

    /// Whether the statement being parsed has no further operands.
    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        )
    }

    fn parse_print(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Print)?.token;
        let mut args = Vec::new();
        if !self.at_statement_end() {
            args.push(self.parse_expr()?);
            while self.cursor.eat(TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        Ok(self.alloc(ExprKind::Print(args), token))
    }

    fn parse_return(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Return)?.token;
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(self.alloc(ExprKind::Return(value), token))
    }

    fn parse_export(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Export)?.token;
        let mut names = Vec::new();
        loop {
            let (name, name_token) = self.expect_ident()?;
            names.push(Ident {
                name,
                token: Some(name_token),
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(self.alloc(ExprKind::Export(names), token))
    }
}
