//! Token types produced by the lexer.

use std::fmt;

use crate::Span;

/// Token kinds for Slang.
///
/// Operators that the grammar treats uniformly (`+ - * / %`) share the
/// `BinaryOperator` kind; the token's text tells them apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    Identifier,
    String,

    // Keywords
    Let,
    Const,
    Fn,
    If,
    Else,
    For,

    // Operators and punctuation
    BinaryOperator,
    Equals,
    Comma,
    Dot,
    Colon,
    Semicolon,
    Greater,
    Lesser,
    EqualsCompare,
    NotEqualsCompare,
    Exclamation,
    And,
    Ampersand,
    Bar,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,

    Eof,
}

impl TokenKind {
    /// Keyword kind for an identifier-shaped word, if it is reserved.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "let" => Some(TokenKind::Let),
            "const" => Some(TokenKind::Const),
            "fn" => Some(TokenKind::Fn),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "for" => Some(TokenKind::For),
            _ => None,
        }
    }

    /// Kind of a character that always forms a token on its own.
    pub fn single_char(c: char) -> Option<TokenKind> {
        match c {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '+' | '-' | '*' | '%' | '/' => Some(TokenKind::BinaryOperator),
            '<' => Some(TokenKind::Lesser),
            '>' => Some(TokenKind::Greater),
            '.' => Some(TokenKind::Dot),
            ';' => Some(TokenKind::Semicolon),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '|' => Some(TokenKind::Bar),
            _ => None,
        }
    }

    /// Human-readable name used in parse diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Let => "`let`",
            TokenKind::Const => "`const`",
            TokenKind::Fn => "`fn`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::BinaryOperator => "operator",
            TokenKind::Equals => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Greater => "`>`",
            TokenKind::Lesser => "`<`",
            TokenKind::EqualsCompare => "`==`",
            TokenKind::NotEqualsCompare => "`!=`",
            TokenKind::Exclamation => "`!`",
            TokenKind::And => "`&&`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Bar => "`|`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::Eof => "end of file",
        }
    }
}

/// A token: its kind, its literal text, and where it came from.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Text carried by the end-of-stream token.
    pub const EOF_TEXT: &'static str = "EndOfFile";

    #[inline]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn eof(offset: u32) -> Self {
        Token::new(TokenKind::Eof, Token::EOF_TEXT, Span::new(offset, offset))
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.value, self.span)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::String => write!(f, "\"{}\"", self.value),
            _ => write!(f, "`{}`", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(TokenKind::keyword("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::keyword("for"), Some(TokenKind::For));
        assert_eq!(TokenKind::keyword("letter"), None);
        assert_eq!(TokenKind::keyword("try"), None);
    }

    #[test]
    fn arithmetic_characters_share_a_kind() {
        for c in ['+', '-', '*', '/', '%'] {
            assert_eq!(TokenKind::single_char(c), Some(TokenKind::BinaryOperator));
        }
        assert_eq!(TokenKind::single_char('='), None);
        assert_eq!(TokenKind::single_char('&'), None);
    }

    #[test]
    fn eof_token_text() {
        let eof = Token::eof(7);
        assert!(eof.is(TokenKind::Eof));
        assert_eq!(eof.value, "EndOfFile");
        assert_eq!(eof.span, Span::new(7, 7));
        assert_eq!(eof.to_string(), "end of file");
    }
}
