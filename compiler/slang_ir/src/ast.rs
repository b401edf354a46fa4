//! AST node model.
//!
//! Passive data produced by the parser and consumed by the evaluator.
//! Every subtree is owned by its parent; the single exception is a function
//! body, which is an `Rc<[Stmt]>` so function values can share it with the
//! declaration that produced them.

mod print;


use std::fmt;
use std::rc::Rc;

use crate::{Token, TokenKind};

/// Root of a parsed source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Statement nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    VarDeclaration(VarDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    If(IfStatement),
    For(ForStatement),
    TryCatch(TryCatchStatement),
    /// An expression in statement position.
    Expr(Expr),
}

impl Stmt {
    /// Node kind discriminator, as used in diagnostics and traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::VarDeclaration(_) => "VarDeclaration",
            Stmt::FunctionDeclaration(_) => "FunctionDeclaration",
            Stmt::If(_) => "IfStatement",
            Stmt::For(_) => "ForStatement",
            Stmt::TryCatch(_) => "TryCatchStatement",
            Stmt::Expr(expr) => expr.kind_name(),
        }
    }
}

/// `let x = value;`, `let x;` or `const x = value;`.
///
/// `value` is `None` only for a non-constant declaration without initializer.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclaration {
    pub identifier: String,
    pub constant: bool,
    pub value: Option<Expr>,
}

/// `fn name(a, b) { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Rc<[Stmt]>,
}

/// `if (test) { body } else { alternate }`.
///
/// An `else if` chain is an `alternate` holding exactly one nested `If`.
#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub alternate: Vec<Stmt>,
}

/// C-style `for (init; test; update) { body }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStatement {
    pub init: VarDeclaration,
    pub test: Expr,
    pub update: Expr,
    pub body: Vec<Stmt>,
}

/// `try { body } catch { alternate }`.
#[derive(Clone, Debug, PartialEq)]
pub struct TryCatchStatement {
    pub body: Vec<Stmt>,
    pub alternate: Vec<Stmt>,
}

/// Expression nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `assignee = value`. Any left-hand shape parses; legality of the
    /// target is checked during evaluation.
    Assignment {
        assignee: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Call {
        caller: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `object.property` (`computed == false`, property is an `Identifier`)
    /// or `object[property]` (`computed == true`).
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
    Object(Vec<Property>),
    Identifier(String),
    Number(f64),
    String(String),
}

impl Expr {
    pub fn ident(symbol: impl Into<String>) -> Self {
        Expr::Identifier(symbol.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(value.into())
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(assignee: Expr, value: Expr) -> Self {
        Expr::Assignment {
            assignee: Box::new(assignee),
            value: Box::new(value),
        }
    }

    pub fn call(caller: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            caller: Box::new(caller),
            args,
        }
    }

    pub fn member(object: Expr, property: Expr, computed: bool) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        }
    }

    /// Node kind discriminator, as used in diagnostics and traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Assignment { .. } => "AssignmentExpr",
            Expr::Binary { .. } => "BinaryExpr",
            Expr::Call { .. } => "CallExpr",
            Expr::Member { .. } => "MemberExpr",
            Expr::Object(_) => "ObjectLiteral",
            Expr::Identifier(_) => "Identifier",
            Expr::Number(_) => "NumericLiteral",
            Expr::String(_) => "StringLiteral",
        }
    }
}

/// Tear down with an explicit worklist. A long operator chain nests as deep
/// as it is wide, so the derived drop would recurse once per operand.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

impl Expr {
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        fn take(slot: &mut Expr) -> Expr {
            std::mem::replace(slot, Expr::Number(0.0))
        }
        match self {
            Expr::Assignment {
                assignee: left,
                value: right,
            }
            | Expr::Binary { left, right, .. }
            | Expr::Member {
                object: left,
                property: right,
                ..
            } => {
                out.push(take(left));
                out.push(take(right));
            }
            Expr::Call { caller, args } => {
                out.push(take(caller));
                out.append(args);
            }
            Expr::Object(properties) => {
                out.extend(properties.iter_mut().filter_map(|p| p.value.take()));
            }
            Expr::Identifier(_) | Expr::Number(_) | Expr::String(_) => {}
        }
    }
}

/// Object literal entry. `value: None` is the shorthand `{ key }`, which
/// reads the variable named `key` when evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expr>,
}

/// Binary operators, including the comparison and logical ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    /// `&&`: logical AND over truthiness, both sides evaluated.
    And,
    /// `|`: logical OR over truthiness, both sides evaluated.
    Or,
}

impl BinaryOp {
    /// Operator spelled by `token`, if it is one.
    pub fn from_token(token: &Token) -> Option<BinaryOp> {
        match token.kind {
            TokenKind::BinaryOperator => match token.value.as_str() {
                "+" => Some(BinaryOp::Add),
                "-" => Some(BinaryOp::Sub),
                "*" => Some(BinaryOp::Mul),
                "/" => Some(BinaryOp::Div),
                "%" => Some(BinaryOp::Mod),
                _ => None,
            },
            TokenKind::EqualsCompare => Some(BinaryOp::Eq),
            TokenKind::NotEqualsCompare => Some(BinaryOp::NotEq),
            TokenKind::Lesser => Some(BinaryOp::Lt),
            TokenKind::Greater => Some(BinaryOp::Gt),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Bar => Some(BinaryOp::Or),
            _ => None,
        }
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::And => "&&",
            BinaryOp::Or => "|",
        }
    }

    /// Operators of the additive precedence level (which also holds the
    /// comparisons).
    pub fn is_additive(self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
        )
    }

    pub fn is_multiplicative(self) -> bool {
        matches!(self, BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
