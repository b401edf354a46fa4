//! Lexer for Slang.
//!
//! Single pass, left to right, no backtracking. At each position the scanner
//! tries, in order: a number, the `=`/`&`/`!` one-or-two character
//! operators, a string literal, the `++`/`--` increment macro, the
//! single-character table, an identifier or keyword, and whitespace.
//! Anything else is a [`LexError`].

mod cursor;
mod lex_error;

#[cfg(test)]
mod tests;

use cursor::Cursor;
use slang_ir::{Span, Token, TokenKind};
use tracing::trace;

pub use lex_error::LexError;

/// Convert source text into tokens, always terminated by an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.current() {
            let start = self.cursor.pos();

            let negative_literal =
                c == '-' && self.cursor.peek().is_some_and(|n| n.is_ascii_digit());
            if c.is_ascii_digit() || negative_literal {
                self.number(start);
                continue;
            }

            match c {
                '=' => self.one_or_two(start, '=', TokenKind::Equals, TokenKind::EqualsCompare),
                '&' => self.one_or_two(start, '&', TokenKind::Ampersand, TokenKind::And),
                '!' => self.one_or_two(
                    start,
                    '=',
                    TokenKind::Exclamation,
                    TokenKind::NotEqualsCompare,
                ),
                '"' => self.string(start),
                '+' | '-' if self.cursor.peek() == Some(c) && !self.tokens.is_empty() => {
                    self.increment(start, c);
                }
                _ => {
                    if let Some(kind) = TokenKind::single_char(c) {
                        self.cursor.advance();
                        self.push(kind, start);
                    } else if c.is_ascii_alphabetic() || c == '_' {
                        self.word(start);
                    } else if matches!(c, ' ' | '\n' | '\t' | '\r') {
                        self.cursor.advance();
                    } else {
                        trace!(position = start, ch = %c, "unrecognized character");
                        return Err(LexError::new(start, c));
                    }
                }
            }
        }

        let end = u32::try_from(self.cursor.pos()).unwrap_or(u32::MAX);
        self.tokens.push(Token::eof(end));
        trace!(count = self.tokens.len(), "tokenize");
        Ok(self.tokens)
    }

    /// Push a token whose text is the source from `start` to the cursor.
    fn push(&mut self, kind: TokenKind, start: usize) {
        let end = self.cursor.pos();
        let value = self.cursor.slice_from(start);
        self.tokens
            .push(Token::new(kind, value, Span::from_range(start..end)));
    }

    /// Digits with at most one `.`, optionally led by a `-` (the caller only
    /// gets here for a `-` that is directly followed by a digit).
    fn number(&mut self, start: usize) {
        self.cursor.advance();
        let mut seen_period = false;
        while let Some(c) = self.cursor.current() {
            if c == '.' && !seen_period {
                seen_period = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.cursor.advance();
        }
        self.push(TokenKind::Number, start);
    }

    /// `c` alone is `single`; `c` followed by `second` is `double`.
    fn one_or_two(&mut self, start: usize, second: char, single: TokenKind, double: TokenKind) {
        self.cursor.advance();
        if self.cursor.current() == Some(second) {
            self.cursor.advance();
            self.push(double, start);
        } else {
            self.push(single, start);
        }
    }

    /// Unescaped text up to the next `"`, or to the end of input.
    fn string(&mut self, start: usize) {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        self.cursor.eat_while(|c| c != '"');
        let content = self.cursor.slice_from(content_start);
        self.cursor.advance();
        let span = Span::from_range(start..self.cursor.pos());
        self.tokens.push(Token::new(TokenKind::String, content, span));
    }

    /// `x++` is `x = x + 1`: emit `=`, a copy of the previous token, the
    /// operator, and `1`.
    fn increment(&mut self, start: usize, op: char) {
        self.cursor.advance();
        self.cursor.advance();
        let span = Span::from_range(start..self.cursor.pos());
        let Some(previous) = self.tokens.last() else {
            return;
        };
        let previous = Token::new(previous.kind, previous.value.clone(), span);
        self.tokens.extend([
            Token::new(TokenKind::Equals, "=", span),
            previous,
            Token::new(TokenKind::BinaryOperator, op.to_string(), span),
            Token::new(TokenKind::Number, "1", span),
        ]);
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`; reserved words become keywords.
    fn word(&mut self, start: usize) {
        self.cursor
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind =
            TokenKind::keyword(self.cursor.slice_from(start)).unwrap_or(TokenKind::Identifier);
        self.push(kind, start);
    }
}
