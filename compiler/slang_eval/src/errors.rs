//! Evaluation errors and their constructors.
//!
//! Every runtime failure is an [`EvalError`]. Errors propagate through `?`
//! until a `try` block catches them or they reach the program's caller.

use slang_ir::BinaryOp;

use crate::Value;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// Runtime error kinds.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("variable `{name}` is not declared")]
    UndeclaredVariable { name: String },

    #[error("cannot redeclare `{name}`: it is already declared in this scope")]
    Redeclaration { name: String },

    #[error("cannot assign to constant `{name}`")]
    ConstAssignment { name: String },

    /// The left side of `=` is neither an identifier nor a member access.
    #[error("cannot assign to {target}")]
    InvalidAssignmentTarget { target: &'static str },

    #[error("cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("cannot read member `{property}` of {type_name}")]
    NonObjectMemberAccess {
        type_name: &'static str,
        property: String,
    },

    #[error("maximum call depth of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },

    /// Raised by a built-in function.
    #[error("{function}: {message}")]
    Native { function: String, message: String },
}

#[cold]
pub fn undeclared_variable(name: &str) -> EvalError {
    EvalError::UndeclaredVariable {
        name: name.to_string(),
    }
}

#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::Redeclaration {
        name: name.to_string(),
    }
}

#[cold]
pub fn const_assignment(name: &str) -> EvalError {
    EvalError::ConstAssignment {
        name: name.to_string(),
    }
}

/// `target` is the AST kind name of the rejected left-hand side.
#[cold]
pub fn invalid_assignment_target(target: &'static str) -> EvalError {
    EvalError::InvalidAssignmentTarget { target }
}

#[cold]
pub fn type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[cold]
pub fn not_callable(callee: &Value) -> EvalError {
    EvalError::NotCallable {
        type_name: callee.type_name(),
    }
}

#[cold]
pub fn non_object_member_access(base: &Value, property: String) -> EvalError {
    EvalError::NonObjectMemberAccess {
        type_name: base.type_name(),
        property,
    }
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::RecursionLimitExceeded { limit }
}

#[cold]
pub fn native_error(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::Native {
        function: function.to_string(),
        message: message.into(),
    }
}
