//! Runtime values.
//!
//! `Value` is a closed sum type. Strings, functions and natives are
//! immutable and shared through `Rc`; objects are shared *and* mutable,
//! so every alias observes a member assignment.

mod plain;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use slang_ir::Stmt;
use slang_stack::ensure_sufficient_stack;

use crate::environment::LocalScope;
use crate::{Environment, EvalResult};

pub use plain::{to_plain, PlainValue};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Object(ObjectValue),
    Function(Rc<FunctionValue>),
    NativeFunction(NativeFunction),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::String(text.into())
    }

    /// Truthiness used by `if`, `for`, `&&` and `|`.
    ///
    /// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::Function(_) | Value::NativeFunction(_) => true,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::NativeFunction(_) => "native function",
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Language equality: by value for primitives, by identity for objects
/// and functions. Values of different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::Object(object)
    }
}

/// Shared, mutable property map. Keys iterate in sorted order.
#[derive(Clone, Default)]
pub struct ObjectValue(LocalScope<BTreeMap<String, Value>>);

impl ObjectValue {
    pub fn new() -> Self {
        ObjectValue::default()
    }

    /// Property value, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the properties in key order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectValue) -> bool {
        self.0.ptr_eq(&other.0)
    }

    #[inline]
    fn addr(&self) -> *const () {
        self.0.addr()
    }

    /// Empty the map and hand back its values, if no other handle can
    /// observe the object.
    fn take_if_last(&self) -> Option<Vec<Value>> {
        if !self.0.is_unique() {
            return None;
        }
        let map = std::mem::take(&mut *self.0.try_borrow_mut().ok()?);
        Some(map.into_values().collect())
    }
}

/// Nested objects are released with a worklist, so a chain built in a loop
/// does not recurse once per link when the last handle goes away.
impl Drop for ObjectValue {
    fn drop(&mut self) {
        let Some(mut pending) = self.take_if_last() else {
            return;
        };
        while let Some(value) = pending.pop() {
            if let Value::Object(object) = &value {
                pending.extend(object.take_if_last().into_iter().flatten());
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let object = ObjectValue::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

/// A user function: its declaration plus the scope it closes over.
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub closure: Environment,
}

/// Host callable signature: arguments and the caller's environment.
pub type NativeFn = dyn Fn(&[Value], &Environment) -> EvalResult;

/// A built-in function implemented in Rust.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    callable: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        callable: impl Fn(&[Value], &Environment) -> EvalResult + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            callable: Rc::new(callable),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value], env: &Environment) -> EvalResult {
        (self.callable)(args, env)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &NativeFunction) -> bool {
        Rc::ptr_eq(&self.callable, &other.callable)
    }
}

/// Number display text: integers print without a fraction and the IEEE
/// specials print as `Infinity`, `-Infinity` and `NaN`.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{n}")
    }
}

/// Display text of a value.
///
/// This is what `+` concatenates and what a computed member key resolves
/// to. Strings print raw at the top level and quoted inside objects.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut FxHashSet::default(), false)
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    seen: &mut FxHashSet<*const ()>,
    nested: bool,
) -> fmt::Result {
    ensure_sufficient_stack(|| write_value_inner(f, value, seen, nested))
}

fn write_value_inner(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    seen: &mut FxHashSet<*const ()>,
    nested: bool,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::Number(n) => write_number(f, *n),
        Value::String(s) if nested => write!(f, "\"{s}\""),
        Value::String(s) => f.write_str(s),
        Value::Function(func) => write!(f, "fn {}({})", func.name, func.parameters.join(", ")),
        Value::NativeFunction(native) => write!(f, "native fn {}", native.name),
        Value::Object(object) => {
            if seen.contains(&object.addr()) {
                return f.write_str("[Circular]");
            }
            let entries = object.entries();
            if entries.is_empty() {
                return f.write_str("{}");
            }
            seen.insert(object.addr());
            f.write_str("{ ")?;
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_value(f, value, seen, true)?;
            }
            seen.remove(&object.addr());
            f.write_str(" }")
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Object(_) => write!(f, "Object({self})"),
            Value::Function(func) => write!(f, "Function({})", func.name),
            Value::NativeFunction(native) => write!(f, "NativeFunction({})", native.name),
        }
    }
}
