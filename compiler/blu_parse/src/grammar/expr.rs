//! Operator precedence, lowest first:
//!
//! assignment `<-` (right), pipe `|>` (right), `or`, `and`, `== <>`,
//! `< <= > >=`, prepend `@` (right), `+ -`, `* /`, unary `- len clone`,
//! postfix call/index/property/env-open.

use blu_ir::{
    ArithmeticOp, ComparisonOp, EqualityOp, ExprId, ExprKind, LogicalOp,
};
use blu_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        blu_stack::ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_pipe()?;
        if !self.cursor.check(TokenKind::Assign) {
            return Ok(target);
        }
        let token = self.cursor.current_token();
        if !matches!(
            self.arena.get(target).kind,
            ExprKind::Ident(_) | ExprKind::Property { .. }
        ) {
            return Err(self.error(ParseErrorKind::InvalidAssignTarget));
        }
        self.cursor.advance();
        let value = self.parse_expr()?;
        Ok(self.alloc(ExprKind::Assign { target, value }, token))
    }

    /// Pipes associate to the right, so `a |> f() |> g()` nests the second
    /// pipe as the right operand of the first.
    fn parse_pipe(&mut self) -> Result<ExprId, ParseError> {
        let lhs = self.parse_or()?;
        if !self.cursor.check(TokenKind::Pipe) {
            return Ok(lhs);
        }
        let token = self.cursor.advance().token;
        let rhs = self.parse_pipe()?;
        Ok(self.alloc(
            ExprKind::Pipe {
                lhs,
                rhs,
                desugared: false,
            },
            token,
        ))
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.cursor.check(TokenKind::Or) {
            let token = self.cursor.advance().token;
            let rhs = self.parse_and()?;
            lhs = self.alloc(
                ExprKind::Logical {
                    op: LogicalOp::Or,
                    lhs,
                    rhs,
                },
                token,
            );
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_equality()?;
        while self.cursor.check(TokenKind::And) {
            let token = self.cursor.advance().token;
            let rhs = self.parse_equality()?;
            lhs = self.alloc(
                ExprKind::Logical {
                    op: LogicalOp::And,
                    lhs,
                    rhs,
                },
                token,
            );
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::EqEq => EqualityOp::Eq,
                TokenKind::NotEq => EqualityOp::NotEq,
                _ => return Ok(lhs),
            };
            let token = self.cursor.advance().token;
            let rhs = self.parse_comparison()?;
            lhs = self.alloc(ExprKind::Equality { op, lhs, rhs }, token);
        }
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_prepend()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Lt => ComparisonOp::Lt,
                TokenKind::LtEq => ComparisonOp::LtEq,
                TokenKind::Gt => ComparisonOp::Gt,
                TokenKind::GtEq => ComparisonOp::GtEq,
                _ => return Ok(lhs),
            };
            let token = self.cursor.advance().token;
            let rhs = self.parse_prepend()?;
            lhs = self.alloc(ExprKind::Comparison { op, lhs, rhs }, token);
        }
    }

    fn parse_prepend(&mut self) -> Result<ExprId, ParseError> {
        let item = self.parse_term()?;
        if !self.cursor.check(TokenKind::At) {
            return Ok(item);
        }
        let token = self.cursor.advance().token;
        let list = self.parse_prepend()?;
        Ok(self.alloc(ExprKind::Prepend { item, list }, token))
    }

    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => ArithmeticOp::Add,
                TokenKind::Minus => ArithmeticOp::Sub,
                _ => return Ok(lhs),
            };
            let token = self.cursor.advance().token;
            let rhs = self.parse_factor()?;
            lhs = self.alloc(ExprKind::Arithmetic { op, lhs, rhs }, token);
        }
    }

    fn parse_factor(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => ArithmeticOp::Mul,
                TokenKind::Slash => ArithmeticOp::Div,
                _ => return Ok(lhs),
            };
            let token = self.cursor.advance().token;
            let rhs = self.parse_unary()?;
            lhs = self.alloc(ExprKind::Arithmetic { op, lhs, rhs }, token);
        }
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let wrap: fn(ExprId) -> ExprKind = match self.cursor.current_kind() {
            TokenKind::Minus => ExprKind::Negate,
            TokenKind::Len => ExprKind::Len,
            TokenKind::Clone => ExprKind::Clone,
            _ => return self.parse_postfix(),
        };
        let token = self.cursor.advance().token;
        let operand = blu_stack::ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(self.alloc(wrap(operand), token))
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let token = self.cursor.current_token();
            expr = match self.cursor.current_kind() {
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.parse_call_args()?;
                    self.alloc(ExprKind::Call { callee: expr, args }, token)
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    self.alloc(ExprKind::Index { target: expr, index }, token)
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    let (name, name_token) = self.expect_ident()?;
                    self.alloc(ExprKind::Property { target: expr, name }, name_token)
                }
                TokenKind::DotLBrace => {
                    self.cursor.advance();
                    let stmts = self.parse_statements_until_brace()?;
                    let body = self.alloc(ExprKind::Body(stmts), token);
                    self.alloc(ExprKind::EnvOpen { target: expr, body }, token)
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Arguments after the opening `(`, through the closing `)`.
    fn parse_call_args(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let mut args = Vec::new();
        if self.cursor.eat(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}
