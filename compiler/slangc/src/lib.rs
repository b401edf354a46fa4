//! Slang driver.
//!
//! Ties the pipeline together for the `slang` binary and for embedding:
//! optional transcription of slang spellings, then lex, parse and
//! evaluate.

mod diagnostic;
mod transcribe;

use std::borrow::Cow;
use std::sync::Once;

use slang_eval::{EvalError, Interpreter, Value};
use slang_ir::{Program, Span, Token};
use slang_lexer::LexError;
use slang_parse::ParseError;

pub use diagnostic::{line_col, render};
pub use transcribe::transcribe;

/// Any failure of the pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SlangError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl SlangError {
    /// Source location, for lex and parse errors.
    pub fn span(&self) -> Option<Span> {
        match self {
            SlangError::Lex(err) => Some(err.span),
            SlangError::Parse(err) => Some(err.span()),
            SlangError::Eval(_) => None,
        }
    }
}

/// How source text is read before lexing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// Skip the transcriber and read canonical syntax only.
    pub plain: bool,
}

/// Canonical source text for `source`.
pub fn prepare(source: &str, options: SourceOptions) -> Cow<'_, str> {
    if options.plain {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(transcribe(source))
    }
}

/// Tokenize canonical source.
pub fn lex_source(source: &str) -> Result<Vec<Token>, SlangError> {
    Ok(slang_lexer::tokenize(source)?)
}

/// Parse canonical source.
pub fn parse_source(source: &str) -> Result<Program, SlangError> {
    Ok(slang_parse::parse(source)?)
}

/// Parse and evaluate canonical source in `interpreter`'s global scope.
///
/// Globals declared by one call stay visible to the next.
pub fn run_source(source: &str, interpreter: &mut Interpreter) -> Result<Value, SlangError> {
    let program = parse_source(source)?;
    Ok(interpreter.eval_program(&program)?)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enabled only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=slang_parse=trace`. With `SLANG_LOG_TREE` also set, spans are
/// drawn as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("SLANG_LOG_TREE").is_ok() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
