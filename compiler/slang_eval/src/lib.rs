//! Slang Eval - tree-walking evaluator for Slang programs.
//!
//! # Architecture
//!
//! - `Environment`: parent-linked lexical scopes shared through `Rc`
//! - `Value`: runtime values; objects are shared mutable maps
//! - `evaluate_binary`: enum-based binary operator dispatch
//! - `NativeRegistry`: built-in globals installed before evaluation
//! - `Interpreter`: walks the AST produced by `slang_parse`
//!
//! Values hold `Rc` handles and are not `Send`; one interpreter runs on one
//! thread.

mod environment;
pub mod errors;
pub mod interpreter;
mod natives;
mod operators;
mod print_handler;
mod value;

pub use environment::{Environment, LocalScope, Mutability};
pub use errors::{EvalError, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use natives::NativeRegistry;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{to_plain, FunctionValue, NativeFn, NativeFunction, ObjectValue, PlainValue, Value};
