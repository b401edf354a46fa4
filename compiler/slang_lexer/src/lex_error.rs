//! Lexer error type.

use slang_ir::Span;

/// A character that starts no token.
///
/// Lexing stops at the first such character; the partial token stream is
/// discarded.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("unrecognized character {ch:?} in source")]
pub struct LexError {
    /// Byte offset of the character.
    pub position: usize,
    pub ch: char,
    pub span: Span,
}

impl LexError {
    pub(crate) fn new(position: usize, ch: char) -> Self {
        LexError {
            position,
            ch,
            span: Span::from_range(position..position + ch.len_utf8()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LexError;
    use slang_ir::Span;

    #[test]
    fn span_covers_the_whole_character() {
        let err = LexError::new(3, '€');
        assert_eq!(err.span, Span::new(3, 6));
    }

    #[test]
    fn message_names_the_character() {
        let err = LexError::new(0, '#');
        assert_eq!(err.to_string(), "unrecognized character '#' in source");
    }
}
