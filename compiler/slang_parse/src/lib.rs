//! Recursive descent parser for Slang.
//!
//! One function per grammar level, lowest precedence first:
//!
//! ```text
//! assignment → object | logical → additive → multiplicative → call → member → primary
//! ```
//!
//! Comparisons share the additive level and `&&`/`|` do not chain, so
//! `a < b < c` is `(a < b) < c` while `a && b && c` is a syntax error.
//! Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;


use cursor::Cursor;
use slang_ir::{Program, Token};
use tracing::debug;

pub use error::ParseError;

/// Tokenize and parse a complete source text.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = slang_lexer::tokenize(source)?;
    Parser::new(tokens).parse_program()
}

/// Parser state.
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    /// Create a parser over `tokens`. An `Eof` is appended if missing.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            body.push(self.parse_statement()?);
        }
        debug!(statements = body.len(), "parse_program");
        Ok(Program { body })
    }
}
