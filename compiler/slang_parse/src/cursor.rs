//! Token cursor for navigating the token stream.

use slang_ir::{Span, Token, TokenKind};
use tracing::trace;

use crate::ParseError;

/// Owning cursor over a token vector.
///
/// Invariant: the last token is `Eof` and the position never moves past it,
/// so `current()` is always valid.
pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token after the current one (`Eof` at the end).
    pub(crate) fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Current token is an identifier spelled `word`.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.check(TokenKind::Identifier) && self.current().value == word
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it. At `Eof` the cursor stays put.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        trace!(
            pos = self.pos,
            kind = token.kind.display_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if !token.is(TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Consume a token of `kind`, or fail with `message`.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::syntax(message, self.current()))
        }
    }

    /// Consume the current token if it is of `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: u32) -> Token {
        Token::new(
            TokenKind::Identifier,
            name,
            Span::new(start, start + 1),
        )
    }

    #[test]
    fn appends_missing_eof() {
        let cursor = Cursor::new(vec![ident("a", 0)]);
        assert_eq!(cursor.peek_next_kind(), TokenKind::Eof);

        let empty = Cursor::new(Vec::new());
        assert!(empty.is_at_end());
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut cursor = Cursor::new(vec![ident("a", 0), Token::eof(1)]);
        assert_eq!(cursor.advance().value, "a");
        assert!(cursor.is_at_end());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn expect_reports_the_current_token() {
        let mut cursor = Cursor::new(vec![ident("a", 0)]);
        let err = cursor.expect(TokenKind::Semicolon, "expected `;`");
        assert_eq!(err, Err(ParseError::syntax("expected `;`", &ident("a", 0))));
        assert!(cursor.check_word("a"));
        assert!(cursor.eat(TokenKind::Identifier));
        assert!(!cursor.eat(TokenKind::Identifier));
    }
}
