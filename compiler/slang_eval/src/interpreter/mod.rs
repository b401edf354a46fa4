//! Tree-walking interpreter.
//!
//! Every node evaluates to a [`Value`]. Blocks run in a fresh child scope
//! and yield the value of their last statement (`null` when empty).
//! Calls run in a child of the callee's closure scope, never of the
//! caller's.

mod builder;


use std::rc::Rc;

use slang_ir::{
    Expr, ForStatement, FunctionDeclaration, IfStatement, Program, Property, Stmt, VarDeclaration,
};
use slang_stack::ensure_sufficient_stack;
use tracing::{debug, instrument, trace};

use crate::environment::Mutability;
use crate::errors::{
    invalid_assignment_target, non_object_member_access, not_callable, recursion_limit_exceeded,
};
use crate::{
    evaluate_binary, Environment, EvalError, EvalResult, FunctionValue, ObjectValue,
    SharedPrintHandler, Value,
};

pub use builder::InterpreterBuilder;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Interpreter state: the global scope and the active call depth.
pub struct Interpreter {
    global: Environment,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// An interpreter with the default built-ins, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The single global scope that programs run in.
    #[inline]
    pub fn global(&self) -> &Environment {
        &self.global
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    #[inline]
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Evaluate every top-level statement in the global scope.
    ///
    /// The result is the value of the last statement, or `null`.
    #[instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        let global = self.global.clone();
        let result = self.eval_statements(&program.body, &global);
        if let Err(err) = &result {
            debug!(error = %err, "program failed");
        }
        result
    }

    /// Evaluate one statement in `env`.
    pub fn eval_stmt(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_stmt_inner(stmt, env))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        trace!(kind = stmt.kind_name(), "eval_stmt");
        match stmt {
            Stmt::VarDeclaration(decl) => self.eval_var_declaration(decl, env),
            Stmt::FunctionDeclaration(decl) => Self::eval_function_declaration(decl, env),
            Stmt::If(stmt) => self.eval_if(stmt, env),
            Stmt::For(stmt) => self.eval_for(stmt, env),
            Stmt::TryCatch(stmt) => match self.eval_block(&stmt.body, env) {
                Ok(value) => Ok(value),
                Err(err) => {
                    debug!(error = %err, "try block failed, running catch block");
                    self.eval_block(&stmt.alternate, env)
                }
            },
            Stmt::Expr(expr) => self.eval_expr(expr, env),
        }
    }

    /// Run statements in order in `env`, yielding the last value.
    fn eval_statements(&mut self, body: &[Stmt], env: &Environment) -> EvalResult {
        let mut last = Value::Null;
        for stmt in body {
            last = self.eval_stmt(stmt, env)?;
        }
        Ok(last)
    }

    /// Run statements in a fresh child of `env`.
    fn eval_block(&mut self, body: &[Stmt], env: &Environment) -> EvalResult {
        self.eval_statements(body, &env.child())
    }

    fn eval_var_declaration(&mut self, decl: &VarDeclaration, env: &Environment) -> EvalResult {
        let value = match &decl.value {
            Some(expr) => self.eval_expr(expr, env)?,
            None => Value::Null,
        };
        let mutability = Mutability::from_constant(decl.constant && decl.value.is_some());
        env.declare(&decl.identifier, value.clone(), mutability)?;
        Ok(value)
    }

    fn eval_function_declaration(decl: &FunctionDeclaration, env: &Environment) -> EvalResult {
        let function = Value::Function(Rc::new(FunctionValue {
            name: decl.name.clone(),
            parameters: decl.parameters.clone(),
            body: Rc::clone(&decl.body),
            closure: env.clone(),
        }));
        env.declare(&decl.name, function.clone(), Mutability::Mutable)?;
        Ok(function)
    }

    fn eval_if(&mut self, stmt: &IfStatement, env: &Environment) -> EvalResult {
        if self.eval_expr(&stmt.test, env)?.is_truthy() {
            self.eval_block(&stmt.body, env)
        } else {
            self.eval_block(&stmt.alternate, env)
        }
    }

    /// The loop scope holds the `init` binding; each iteration's body runs
    /// in a fresh child of it.
    fn eval_for(&mut self, stmt: &ForStatement, env: &Environment) -> EvalResult {
        let scope = env.child();
        self.eval_var_declaration(&stmt.init, &scope)?;
        while self.eval_expr(&stmt.test, &scope)?.is_truthy() {
            self.eval_block(&stmt.body, &scope)?;
            self.eval_expr(&stmt.update, &scope)?;
        }
        Ok(Value::Null)
    }

    /// Evaluate one expression in `env`.
    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::string(s.as_str())),
            Expr::Identifier(name) => env.lookup(name),
            Expr::Object(properties) => self.eval_object(properties, env),
            Expr::Binary { left, op, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                evaluate_binary(&left, *op, &right)
            }
            Expr::Assignment { assignee, value } => self.eval_assignment(assignee, value, env),
            Expr::Member {
                object,
                property,
                computed,
            } => {
                let base = self.eval_expr(object, env)?;
                let key = self.member_key(property, *computed, env)?;
                match base {
                    Value::Object(object) => Ok(object.get(&key).unwrap_or(Value::Null)),
                    Value::Function(_) | Value::NativeFunction(_) => Ok(Value::Null),
                    other => Err(non_object_member_access(&other, key)),
                }
            }
            Expr::Call { caller, args } => {
                let callee = self.eval_expr(caller, env)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call_value(&callee, args, env)
            }
        }
    }

    fn eval_object(&mut self, properties: &[Property], env: &Environment) -> EvalResult {
        let object = ObjectValue::new();
        for Property { key, value } in properties {
            let value = match value {
                Some(expr) => self.eval_expr(expr, env)?,
                None => env.lookup(key)?,
            };
            object.set(key.as_str(), value);
        }
        Ok(Value::Object(object))
    }

    /// The right side is evaluated first, then the target.
    fn eval_assignment(&mut self, assignee: &Expr, value: &Expr, env: &Environment) -> EvalResult {
        let value = self.eval_expr(value, env)?;
        match assignee {
            Expr::Identifier(name) => {
                env.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Member {
                object,
                property,
                computed,
            } => {
                let base = self.eval_expr(object, env)?;
                let key = self.member_key(property, *computed, env)?;
                match base {
                    Value::Object(object) => {
                        object.set(key, value.clone());
                        Ok(value)
                    }
                    other => Err(non_object_member_access(&other, key)),
                }
            }
            other => Err(invalid_assignment_target(other.kind_name())),
        }
    }

    /// Property name of a member access: the display text of a computed
    /// key, or the identifier itself.
    fn member_key(
        &mut self,
        property: &Expr,
        computed: bool,
        env: &Environment,
    ) -> Result<String, EvalError> {
        if computed {
            return Ok(self.eval_expr(property, env)?.to_string());
        }
        Ok(match property {
            Expr::Identifier(name) => name.clone(),
            other => other.to_string(),
        })
    }

    /// Call `callee` with already-evaluated arguments.
    ///
    /// Natives receive the caller's environment; user functions run in a
    /// child of their closure.
    pub fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        env: &Environment,
    ) -> EvalResult {
        match callee {
            Value::NativeFunction(native) => {
                trace!(name = native.name(), args = args.len(), "call native");
                native.call(&args, env)
            }
            Value::Function(function) => self.call_function(function, args),
            other => Err(not_callable(other)),
        }
    }

    fn call_function(&mut self, function: &FunctionValue, args: Vec<Value>) -> EvalResult {
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }
        trace!(name = %function.name, depth = self.call_depth, "call");

        let scope = function.closure.child();
        let mut args = args.into_iter();
        for param in &function.parameters {
            // Missing arguments are null; extra ones are ignored.
            scope.declare(param, args.next().unwrap_or(Value::Null), Mutability::Mutable)?;
        }

        self.call_depth += 1;
        let result = self.eval_statements(&function.body, &scope);
        self.call_depth -= 1;
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
