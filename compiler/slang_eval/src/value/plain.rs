//! Plain-data view of runtime values, as used by `print`.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use slang_ir::Stmt;
use slang_stack::ensure_sufficient_stack;

use super::{write_number, Value};

/// Host-side copy of a [`Value`] with no shared state.
#[derive(Clone, Debug, PartialEq)]
pub enum PlainValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(BTreeMap<String, PlainValue>),
    /// A user function descriptor.
    Function {
        name: String,
        body: Rc<[Stmt]>,
        internal: bool,
    },
    /// A built-in function descriptor.
    Native { name: String, internal: bool },
    /// An object that contains itself, seen again below its first occurrence.
    Circular,
}

/// Convert a value recursively.
///
/// Objects become key-to-plain maps, user functions become
/// `{ name, body, internal: false }` and natives `{ name, internal: true }`.
pub fn to_plain(value: &Value) -> PlainValue {
    convert(value, &mut FxHashSet::default())
}

fn convert(value: &Value, seen: &mut FxHashSet<*const ()>) -> PlainValue {
    ensure_sufficient_stack(|| convert_inner(value, seen))
}

fn convert_inner(value: &Value, seen: &mut FxHashSet<*const ()>) -> PlainValue {
    match value {
        Value::Null => PlainValue::Null,
        Value::Boolean(b) => PlainValue::Boolean(*b),
        Value::Number(n) => PlainValue::Number(*n),
        Value::String(s) => PlainValue::String(s.to_string()),
        Value::Function(func) => PlainValue::Function {
            name: func.name.clone(),
            body: Rc::clone(&func.body),
            internal: false,
        },
        Value::NativeFunction(native) => PlainValue::Native {
            name: native.name().to_string(),
            internal: true,
        },
        Value::Object(object) => {
            if seen.contains(&object.addr()) {
                return PlainValue::Circular;
            }
            seen.insert(object.addr());
            let map = object
                .entries()
                .into_iter()
                .map(|(key, value)| (key, convert(&value, seen)))
                .collect();
            seen.remove(&object.addr());
            PlainValue::Object(map)
        }
    }
}

impl Drop for PlainValue {
    fn drop(&mut self) {
        let PlainValue::Object(map) = self else {
            return;
        };
        let mut pending: Vec<PlainValue> = std::mem::take(map).into_values().collect();
        while let Some(mut value) = pending.pop() {
            if let PlainValue::Object(map) = &mut value {
                pending.extend(std::mem::take(map).into_values());
            }
        }
    }
}

impl fmt::Display for PlainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plain(f, self, false)
    }
}

fn write_plain(f: &mut fmt::Formatter<'_>, value: &PlainValue, nested: bool) -> fmt::Result {
    ensure_sufficient_stack(|| write_plain_inner(f, value, nested))
}

fn write_plain_inner(f: &mut fmt::Formatter<'_>, value: &PlainValue, nested: bool) -> fmt::Result {
    match value {
        PlainValue::Null => f.write_str("null"),
        PlainValue::Boolean(b) => write!(f, "{b}"),
        PlainValue::Number(n) => write_number(f, *n),
        PlainValue::String(s) if nested => write!(f, "\"{s}\""),
        PlainValue::String(s) => f.write_str(s),
        PlainValue::Circular => f.write_str("[Circular]"),
        PlainValue::Object(map) if map.is_empty() => f.write_str("{}"),
        PlainValue::Object(map) => {
            f.write_str("{ ")?;
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_plain(f, value, true)?;
            }
            f.write_str(" }")
        }
        PlainValue::Function {
            name,
            body,
            internal,
        } => {
            write!(f, "{{ name: \"{name}\", body: {{")?;
            for stmt in body.iter() {
                write!(f, " {stmt}")?;
            }
            write!(f, " }}, internal: {internal} }}")
        }
        PlainValue::Native { name, internal } => {
            write!(f, "{{ name: \"{name}\", internal: {internal} }}")
        }
    }
}
