//! Statement parsing: declarations, control flow, blocks.

use std::rc::Rc;

use slang_ir::{
    Expr, ForStatement, FunctionDeclaration, IfStatement, Stmt, TokenKind, TryCatchStatement,
    VarDeclaration,
};
use slang_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{ParseError, Parser};

impl Parser {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        debug!(
            pos = self.cursor.position(),
            kind = self.cursor.current_kind().display_name(),
            span_start = self.cursor.current_span().start,
            span_end = self.cursor.current_span().end,
            "parse_statement"
        );

        match self.cursor.current_kind() {
            TokenKind::Let | TokenKind::Const => {
                self.parse_var_declaration().map(Stmt::VarDeclaration)
            }
            TokenKind::Fn => self.parse_function_declaration().map(Stmt::FunctionDeclaration),
            TokenKind::If => self.parse_if().map(Stmt::If),
            TokenKind::For => self.parse_for().map(Stmt::For),
            // `try` and `catch` are ordinary identifiers everywhere else.
            TokenKind::Identifier
                if self.cursor.check_word("try")
                    && self.cursor.peek_next_kind() == TokenKind::OpenBrace =>
            {
                self.parse_try_catch().map(Stmt::TryCatch)
            }
            _ => {
                let expr = self.parse_expression()?;
                self.cursor.eat(TokenKind::Semicolon);
                Ok(Stmt::Expr(expr))
            }
        }
    }

    /// `('let' | 'const') IDENT ('=' expression)? ';'`
    fn parse_var_declaration(&mut self) -> Result<VarDeclaration, ParseError> {
        let constant = self.cursor.advance().is(TokenKind::Const);
        let identifier = self
            .cursor
            .expect(
                TokenKind::Identifier,
                "expected identifier name following `let` or `const`",
            )?
            .value;

        if self.cursor.check(TokenKind::Semicolon) {
            if constant {
                return Err(ParseError::syntax(
                    format!("constant `{identifier}` must be assigned a value"),
                    self.cursor.current(),
                ));
            }
            self.cursor.advance();
            return Ok(VarDeclaration {
                identifier,
                constant,
                value: None,
            });
        }

        self.cursor.expect(
            TokenKind::Equals,
            "expected `=` following identifier in variable declaration",
        )?;
        let value = self.parse_expression()?;
        self.cursor.expect(
            TokenKind::Semicolon,
            "variable declaration must end with `;`",
        )?;

        trace!(%identifier, constant, "parse_var_declaration");
        Ok(VarDeclaration {
            identifier,
            constant,
            value: Some(value),
        })
    }

    /// `'fn' IDENT '(' args ')' block`, every argument a bare identifier.
    fn parse_function_declaration(&mut self) -> Result<FunctionDeclaration, ParseError> {
        self.cursor.advance();
        let name = self
            .cursor
            .expect(TokenKind::Identifier, "expected function name following `fn`")?
            .value;

        let open = self.cursor.current().clone();
        let parameters = self
            .parse_args()?
            .into_iter()
            .map(|arg| match &arg {
                Expr::Identifier(symbol) => Ok(symbol.clone()),
                other => Err(ParseError::syntax(
                    format!(
                        "function parameters must be identifiers, not {}",
                        other.kind_name()
                    ),
                    &open,
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let body = self.parse_block()?;
        trace!(%name, params = parameters.len(), "parse_function_declaration");
        Ok(FunctionDeclaration {
            name,
            parameters,
            body: Rc::from(body),
        })
    }

    /// `'if' '(' expression ')' block ('else' (if | block))?`
    fn parse_if(&mut self) -> Result<IfStatement, ParseError> {
        self.cursor.advance();
        self.cursor
            .expect(TokenKind::OpenParen, "expected `(` following `if`")?;
        let test = self.parse_expression()?;
        self.cursor
            .expect(TokenKind::CloseParen, "expected `)` following `if` condition")?;
        let body = self.parse_block()?;

        let alternate = if self.cursor.eat(TokenKind::Else) {
            if self.cursor.check(TokenKind::If) {
                vec![Stmt::If(ensure_sufficient_stack(|| self.parse_if())?)]
            } else {
                self.parse_block()?
            }
        } else {
            Vec::new()
        };

        Ok(IfStatement {
            test,
            body,
            alternate,
        })
    }

    /// `'for' '(' varDecl expression ';' assignment ')' block`
    fn parse_for(&mut self) -> Result<ForStatement, ParseError> {
        self.cursor.advance();
        self.cursor
            .expect(TokenKind::OpenParen, "expected `(` following `for`")?;
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::Let | TokenKind::Const
        ) {
            return Err(ParseError::syntax(
                "`for` loop must start with a variable declaration",
                self.cursor.current(),
            ));
        }
        let init = self.parse_var_declaration()?;
        let test = self.parse_expression()?;
        self.cursor
            .expect(TokenKind::Semicolon, "expected `;` following `for` condition")?;
        let update = self.parse_assignment()?;
        self.cursor
            .expect(TokenKind::CloseParen, "expected `)` following `for` update")?;
        let body = self.parse_block()?;

        Ok(ForStatement {
            init,
            test,
            update,
            body,
        })
    }

    /// `'try' block 'catch' block`
    fn parse_try_catch(&mut self) -> Result<TryCatchStatement, ParseError> {
        self.cursor.advance();
        let body = self.parse_block()?;
        if !self.cursor.check_word("catch") {
            return Err(ParseError::syntax(
                "`try` block must be followed by `catch`",
                self.cursor.current(),
            ));
        }
        self.cursor.advance();
        let alternate = self.parse_block()?;

        Ok(TryCatchStatement { body, alternate })
    }

    /// `'{' statement* '}'`
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.cursor
            .expect(TokenKind::OpenBrace, "expected `{` to open block")?;
        let mut body = Vec::new();
        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::CloseBrace) {
            body.push(self.parse_statement()?);
        }
        self.cursor
            .expect(TokenKind::CloseBrace, "expected `}` to close block")?;
        Ok(body)
    }
}
