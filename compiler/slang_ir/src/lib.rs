//! Slang IR - tokens and syntax tree.
//!
//! This crate is the contract between the front end and the evaluator:
//! - `Span` for source locations
//! - `Token` / `TokenKind` produced by the lexer
//! - AST nodes (`Program`, `Stmt`, `Expr`) produced by the parser
//!
//! Every AST node prints back to canonical source text through `Display`,
//! which the parser accepts and maps to a structurally identical tree.

pub mod ast;
mod span;
mod token;

pub use ast::{
    BinaryOp, Expr, ForStatement, FunctionDeclaration, IfStatement, Program, Property, Stmt,
    TryCatchStatement, VarDeclaration,
};
pub use span::Span;
pub use token::{Token, TokenKind};
