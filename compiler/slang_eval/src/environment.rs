//! Lexical scopes.
//!
//! An [`Environment`] is a handle to one node of a parent-linked scope
//! chain. Blocks and calls create children; function values keep a handle
//! to the scope they were declared in, so closures see later mutations of
//! captured variables.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::errors::{const_assignment, redeclaration, undeclared_variable, EvalError};
use crate::Value;


/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let x = ...`
    Mutable,
    /// `const x = ...`
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn from_constant(constant: bool) -> Self {
        if constant {
            Mutability::Immutable
        } else {
            Mutability::Mutable
        }
    }

    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Error returned by `Scope::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AssignError {
    /// Variable exists but is constant.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded `Rc<RefCell<T>>` wrapper.
///
/// Scopes and object property maps are both shared and mutated through
/// this type.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation, for cycle detection.
    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Whether this is the only handle to the allocation.
    #[inline]
    pub(crate) fn is_unique(&self) -> bool {
        Rc::strong_count(&self.0) == 1
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
pub(crate) struct Scope {
    bindings: FxHashMap<String, Binding>,
    parent: Option<LocalScope<Scope>>,
}

#[derive(Clone)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

impl Scope {
    fn new(parent: Option<LocalScope<Scope>>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent,
        }
    }

    /// Define a variable in this scope, replacing any existing binding.
    #[inline]
    fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        self.bindings
            .insert(name.to_string(), Binding { value, mutability });
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }
}

/// Handle to a scope in the chain. Cloning shares the scope.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
}

impl Environment {
    /// Create a fresh global scope (no parent).
    pub fn global() -> Self {
        Environment {
            scope: LocalScope::new(Scope::new(None)),
        }
    }

    /// Create a child scope whose parent is `self`.
    pub fn child(&self) -> Self {
        Environment {
            scope: LocalScope::new(Scope::new(Some(self.scope.clone()))),
        }
    }

    pub fn is_global(&self) -> bool {
        self.scope.borrow().parent.is_none()
    }

    /// Whether `name` is bound in this exact scope, ignoring ancestors.
    pub fn contains_local(&self, name: &str) -> bool {
        self.scope.borrow().bindings.contains_key(name)
    }

    /// Declare `name` in this scope.
    ///
    /// Shadowing a binding from an outer scope is allowed; declaring the
    /// same name twice in one scope is a `Redeclaration` error.
    pub fn declare(
        &self,
        name: &str,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), EvalError> {
        let mut scope = self.scope.borrow_mut();
        if scope.bindings.contains_key(name) {
            return Err(redeclaration(name));
        }
        scope.define(name, value, mutability);
        Ok(())
    }

    /// Bind `name` in this scope, replacing any existing binding.
    ///
    /// Used to install built-ins, which never conflict with user code
    /// because they are defined before evaluation starts.
    pub fn define(&self, name: &str, value: Value, mutability: Mutability) {
        self.scope.borrow_mut().define(name, value, mutability);
    }

    /// Reassign the nearest binding of `name`.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EvalError> {
        self.scope
            .borrow_mut()
            .assign(name, value)
            .map_err(|err| match err {
                AssignError::Immutable => const_assignment(name),
                AssignError::Undefined => undeclared_variable(name),
            })
    }

    /// Read the nearest binding of `name`.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.scope
            .borrow()
            .lookup(name)
            .ok_or_else(|| undeclared_variable(name))
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.scope.ptr_eq(&other.scope)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("global", &scope.parent.is_none())
            .field("bindings", &names)
            .finish()
    }
}
