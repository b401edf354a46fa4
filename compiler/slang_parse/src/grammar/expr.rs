//! Expression parsing, one method per precedence level.

use slang_ir::{BinaryOp, Expr, Property, TokenKind};
use slang_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{ParseError, Parser};

impl Parser {
    /// Parse a full expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// `objectOrLogical ('=' assignment)?`, right associative.
    pub(crate) fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_object_or_logical()?;
        if self.cursor.eat(TokenKind::Equals) {
            let value = self.parse_expression()?;
            return Ok(Expr::assign(left, value));
        }
        Ok(left)
    }

    fn parse_object_or_logical(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(TokenKind::OpenBrace) {
            self.parse_object()
        } else {
            self.parse_logical()
        }
    }

    /// `'{' (IDENT (':' expression)? ','?)* '}'`
    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let mut properties = Vec::new();

        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::CloseBrace) {
            let key = self
                .cursor
                .expect(TokenKind::Identifier, "expected identifier as object key")?
                .value;

            // Shorthand `{ key }` or `{ key, ... }`.
            if self.cursor.eat(TokenKind::Comma) || self.cursor.check(TokenKind::CloseBrace) {
                properties.push(Property { key, value: None });
                continue;
            }

            self.cursor
                .expect(TokenKind::Colon, "expected `:` following object key")?;
            let value = self.parse_expression()?;
            properties.push(Property {
                key,
                value: Some(value),
            });

            if !self.cursor.check(TokenKind::CloseBrace) {
                self.cursor.expect(
                    TokenKind::Comma,
                    "expected `,` or `}` following object property",
                )?;
            }
        }

        self.cursor
            .expect(TokenKind::CloseBrace, "object literal missing closing `}`")?;
        Ok(Expr::Object(properties))
    }

    /// `additive (('&&' | '|') additive)?`; does not chain.
    fn parse_logical(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;
        if let Some(op) = self.current_op(BinaryOp::is_logical) {
            self.cursor.advance();
            let right = self.parse_additive()?;
            return Ok(Expr::binary(left, op, right));
        }
        Ok(left)
    }

    /// Left-associative `+ - == != < >`.
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.current_op(BinaryOp::is_additive) {
            self.cursor.advance();
            trace!(op = op.as_symbol(), "parse_additive");
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// Left-associative `* / %`.
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_call_member()?;
        while let Some(op) = self.current_op(BinaryOp::is_multiplicative) {
            self.cursor.advance();
            trace!(op = op.as_symbol(), "parse_multiplicative");
            let right = self.parse_call_member()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// Operator at the cursor, if it belongs to `level`.
    fn current_op(&self, level: fn(BinaryOp) -> bool) -> Option<BinaryOp> {
        BinaryOp::from_token(self.cursor.current()).filter(|&op| level(op))
    }

    /// `member ('(' args ')')*`
    fn parse_call_member(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_member()?;
        while self.cursor.check(TokenKind::OpenParen) {
            let args = self.parse_args()?;
            expr = Expr::call(expr, args);
        }
        Ok(expr)
    }

    /// `'(' (expression (',' expression)*)? ')'`
    pub(crate) fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor
            .expect(TokenKind::OpenParen, "expected `(` to open argument list")?;
        let mut args = Vec::new();
        if !self.cursor.check(TokenKind::CloseParen) {
            args.push(self.parse_expression()?);
            while self.cursor.eat(TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        self.cursor
            .expect(TokenKind::CloseParen, "expected `)` to close argument list")?;
        Ok(args)
    }

    /// `primary ('.' IDENT | '[' expression ']')*`
    fn parse_member(&mut self) -> Result<Expr, ParseError> {
        let mut object = self.parse_primary()?;
        loop {
            if self.cursor.eat(TokenKind::Dot) {
                let property = self
                    .cursor
                    .expect(TokenKind::Identifier, "expected identifier following `.`")?;
                object = Expr::member(object, Expr::Identifier(property.value), false);
            } else if self.cursor.eat(TokenKind::OpenBracket) {
                let property = self.parse_expression()?;
                self.cursor.expect(
                    TokenKind::CloseBracket,
                    "expected `]` to close computed member",
                )?;
                object = Expr::member(object, property, true);
            } else {
                return Ok(object);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        debug!(
            pos = self.cursor.position(),
            kind = self.cursor.current_kind().display_name(),
            span_start = self.cursor.current_span().start,
            span_end = self.cursor.current_span().end,
            "parse_primary"
        );

        match self.cursor.current_kind() {
            TokenKind::Identifier => Ok(Expr::Identifier(self.cursor.advance().value)),
            TokenKind::String => Ok(Expr::String(self.cursor.advance().value)),
            TokenKind::Number => {
                let token = self.cursor.advance();
                token
                    .value
                    .parse::<f64>()
                    .map(Expr::Number)
                    .map_err(|_| ParseError::syntax("malformed number literal", &token))
            }
            TokenKind::OpenParen => {
                self.cursor.advance();
                let value = self.parse_expression()?;
                self.cursor.expect(
                    TokenKind::CloseParen,
                    "expected `)` to close parenthesized expression",
                )?;
                Ok(value)
            }
            _ => Err(ParseError::syntax(
                "unexpected token in expression",
                self.cursor.current(),
            )),
        }
    }
}
