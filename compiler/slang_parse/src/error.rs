//! Parse error types.

use slang_ir::{Span, Token};
use slang_lexer::LexError;

/// Why a source text failed to parse.
///
/// Parsing stops at the first error; there is no recovery.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The text did not tokenize.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token stream does not match the grammar.
    #[error("{message}, found {token}")]
    Syntax { message: String, token: Token },
}

impl ParseError {
    #[cold]
    pub(crate) fn syntax(message: impl Into<String>, token: &Token) -> Self {
        ParseError::Syntax {
            message: message.into(),
            token: token.clone(),
        }
    }

    /// Source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span,
            ParseError::Syntax { token, .. } => token.span,
        }
    }
}
