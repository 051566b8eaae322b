//! Primary expressions.

use blu_ir::{BindingKind, ExprId, ExprKind, Field, Ident, ImportKind, Literal, Param};
use blu_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current_token();
        let literal = match self.cursor.current_kind() {
            TokenKind::Number(value) => Literal::Number(value),
            TokenKind::Str(name) => Literal::Str(name),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Nil => Literal::Nil,
            TokenKind::Ident(name) => {
                self.cursor.advance();
                return Ok(self.alloc(ExprKind::Ident(name), token));
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::LBrace => return self.parse_record_literal(),
            TokenKind::Fun => return self.parse_function(),
            TokenKind::Object => return self.parse_object(),
            TokenKind::Import => return self.parse_import(),
            TokenKind::If => return self.parse_if(),
            TokenKind::For => return self.parse_for(),
            found => return Err(self.error(ParseErrorKind::ExpectedExpression { found })),
        };
        self.cursor.advance();
        Ok(self.alloc(ExprKind::Literal(literal), token))
    }

    fn parse_list(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::LBracket)?.token;
        let mut items = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            items.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(self.alloc(ExprKind::List(items), token))
    }

    /// `{ name: expr, ... }` in expression position.
    fn parse_record_literal(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::LBrace)?.token;
        let mut fields = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            let (name, name_token) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expr()?;
            fields.push(Field {
                name,
                token: Some(name_token),
                value,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.alloc(ExprKind::Record(fields), token))
    }

    /// `fun(a, b) { body }`; the parameter list may be omitted.
    fn parse_function(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Fun)?.token;
        let params = if self.cursor.check(TokenKind::LParen) {
            self.parse_params(false)?
        } else {
            Vec::new()
        };
        let body = self.parse_block()?;
        Ok(self.alloc(ExprKind::Function { params, body }, token))
    }

    /// `( [mut] name, ... )`. `mut` is only accepted for constructors.
    fn parse_params(&mut self, allow_mut: bool) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            let is_mutable = allow_mut && self.cursor.eat(TokenKind::Mut);
            let (name, token) = self.expect_ident()?;
            params.push(Param {
                name,
                token: Some(token),
                is_mutable,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// `object [(params)] [+Source ...] { members }`
    ///
    /// Members are `let` bindings or `name: expr` shorthands, separated by
    /// `,` or `;`.
    fn parse_object(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Object)?.token;
        let params = if self.cursor.check(TokenKind::LParen) {
            Some(self.parse_params(true)?)
        } else {
            None
        };

        let mut composed = Vec::new();
        while self.cursor.eat(TokenKind::Plus) {
            let (name, name_token) = self.expect_ident()?;
            composed.push(Ident {
                name,
                token: Some(name_token),
            });
        }

        self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.cursor.eat(TokenKind::RBrace) {
            if self.cursor.eat(TokenKind::Comma) || self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            let member = if self.cursor.check(TokenKind::Let) {
                self.parse_let()?
            } else {
                let (name, name_token) = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let value = self.parse_expr()?;
                self.alloc(
                    ExprKind::Binding {
                        name,
                        kind: BindingKind::None,
                        is_final: false,
                        value,
                    },
                    name_token,
                )
            };
            members.push(member);
        }

        Ok(self.alloc(
            ExprKind::Object {
                params,
                composed,
                members,
            },
            token,
        ))
    }

    /// `import [base|std] a.b.c`
    fn parse_import(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::Import)?.token;
        let mode_word = matches!(self.cursor.peek_kind(), TokenKind::Ident(_));
        let kind = if mode_word && self.check_contextual("base") {
            self.cursor.advance();
            ImportKind::Base
        } else if mode_word && self.check_contextual("std") {
            self.cursor.advance();
            ImportKind::Std
        } else {
            ImportKind::Relative
        };

        let mut path = vec![self.expect_ident()?.0];
        while self.cursor.eat(TokenKind::Dot) {
            path.push(self.expect_ident()?.0);
        }
        Ok(self.alloc(ExprKind::Import { kind, path }, token))
    }

    /// `if cond then { .. } [else { .. } | else if ..]`
    fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::If)?.token;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            if self.cursor.check(TokenKind::If) {
                Some(self.parse_if()?)
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            token,
        ))
    }

    /// `for start to end { body }`
    fn parse_for(&mut self) -> Result<ExprId, ParseError> {
        let token = self.expect(TokenKind::For)?.token;
        let start = self.parse_expr()?;
        self.expect(TokenKind::To)?;
        let end = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(self.alloc(ExprKind::For { start, end, body }, token))
    }
}
