//! Canonical source printer.
//!
//! Output is valid Slang that parses back to the same tree. Nested binary,
//! assignment and object-literal expressions are parenthesized so precedence
//! never depends on the printer knowing the grammar's levels; parentheses
//! produce no AST node, so the round trip is exact.

use std::fmt::{self, Write};

use slang_stack::ensure_sufficient_stack;

use super::{Expr, IfStatement, Program, Property, Stmt, VarDeclaration};

const INDENT: &str = "    ";

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write_stmt(f, stmt, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self)
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, body: &[Stmt], depth: usize) -> fmt::Result {
    if body.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{\n")?;
    for stmt in body {
        write_indent(f, depth + 1)?;
        write_stmt(f, stmt, depth + 1)?;
        f.write_char('\n')?;
    }
    write_indent(f, depth)?;
    f.write_char('}')
}

fn write_var_declaration(f: &mut fmt::Formatter<'_>, decl: &VarDeclaration) -> fmt::Result {
    let keyword = if decl.constant { "const" } else { "let" };
    write!(f, "{keyword} {}", decl.identifier)?;
    if let Some(value) = &decl.value {
        f.write_str(" = ")?;
        write_expr(f, value)?;
    }
    f.write_char(';')
}

fn write_if(f: &mut fmt::Formatter<'_>, stmt: &IfStatement, depth: usize) -> fmt::Result {
    f.write_str("if (")?;
    write_expr(f, &stmt.test)?;
    f.write_str(") ")?;
    write_block(f, &stmt.body, depth)?;
    match stmt.alternate.as_slice() {
        [] => Ok(()),
        [Stmt::If(nested)] => {
            f.write_str(" else ")?;
            write_if(f, nested, depth)
        }
        alternate => {
            f.write_str(" else ")?;
            write_block(f, alternate, depth)
        }
    }
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    ensure_sufficient_stack(|| write_stmt_inner(f, stmt, depth))
}

fn write_stmt_inner(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::VarDeclaration(decl) => write_var_declaration(f, decl),
        Stmt::FunctionDeclaration(decl) => {
            write!(f, "fn {}({}) ", decl.name, decl.parameters.join(", "))?;
            write_block(f, &decl.body, depth)
        }
        Stmt::If(stmt) => write_if(f, stmt, depth),
        Stmt::For(stmt) => {
            f.write_str("for (")?;
            write_var_declaration(f, &stmt.init)?;
            f.write_char(' ')?;
            write_expr(f, &stmt.test)?;
            f.write_str("; ")?;
            write_expr(f, &stmt.update)?;
            f.write_str(") ")?;
            write_block(f, &stmt.body, depth)
        }
        Stmt::TryCatch(stmt) => {
            f.write_str("try ")?;
            write_block(f, &stmt.body, depth)?;
            f.write_str(" catch ")?;
            write_block(f, &stmt.alternate, depth)
        }
        Stmt::Expr(expr) => {
            write_expr(f, expr)?;
            f.write_char(';')
        }
    }
}

/// Write an expression in a position that accepts a full `expression`.
fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    ensure_sufficient_stack(|| write_expr_inner(f, expr))
}

fn write_expr_inner(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Assignment { assignee, value } => {
            write_operand(f, assignee)?;
            f.write_str(" = ")?;
            write_expr(f, value)
        }
        Expr::Binary { left, op, right } => {
            write_operand(f, left)?;
            write!(f, " {op} ")?;
            write_operand(f, right)
        }
        Expr::Call { caller, args } => {
            write_operand(f, caller)?;
            f.write_char('(')?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(f, arg)?;
            }
            f.write_char(')')
        }
        Expr::Member {
            object,
            property,
            computed,
        } => {
            // `5.x` would lex as the number `5.` followed by `x`.
            if matches!(**object, Expr::Number(_) | Expr::Call { .. }) {
                write_parenthesized(f, object)?;
            } else {
                write_operand(f, object)?;
            }
            if *computed {
                f.write_char('[')?;
                write_expr(f, property)?;
                f.write_char(']')
            } else {
                f.write_char('.')?;
                write_expr(f, property)
            }
        }
        Expr::Object(properties) => write_object(f, properties),
        Expr::Identifier(symbol) => f.write_str(symbol),
        Expr::Number(value) => write!(f, "{value}"),
        Expr::String(value) => write!(f, "\"{value}\""),
    }
}

/// Write an expression nested inside another one.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Assignment { .. } | Expr::Binary { .. } | Expr::Object(_) => {
            write_parenthesized(f, expr)
        }
        _ => write_expr(f, expr),
    }
}

fn write_parenthesized(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    f.write_char('(')?;
    write_expr(f, expr)?;
    f.write_char(')')
}

fn write_object(f: &mut fmt::Formatter<'_>, properties: &[Property]) -> fmt::Result {
    if properties.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (i, property) in properties.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&property.key)?;
        if let Some(value) = &property.value {
            f.write_str(": ")?;
            write_expr(f, value)?;
        }
    }
    f.write_str(" }")
}
