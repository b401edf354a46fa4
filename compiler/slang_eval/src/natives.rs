//! Built-in functions and constants.
//!
//! A [`NativeRegistry`] maps global names to values and is installed into
//! the global scope before evaluation starts. Every entry is bound as a
//! constant.

use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::environment::Mutability;
use crate::errors::native_error;
use crate::value::to_plain;
use crate::{
    Environment, EvalError, EvalResult, NativeFunction, ObjectValue, SharedPrintHandler, Value,
};

/// Name-to-value table of built-ins.
#[derive(Default)]
pub struct NativeRegistry {
    entries: FxHashMap<String, Value>,
}

impl NativeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        NativeRegistry::default()
    }

    /// The standard globals: `true`, `false`, `null`, `print`, `time` and
    /// the `math` object. `print` writes through `output`.
    pub fn with_defaults(output: SharedPrintHandler) -> Self {
        let mut registry = NativeRegistry::new();
        registry.register("true", Value::Boolean(true));
        registry.register("false", Value::Boolean(false));
        registry.register("null", Value::Null);

        registry.register_fn("print", move |args, _| {
            for arg in args {
                output.println(&to_plain(arg).to_string());
            }
            Ok(Value::Null)
        });
        registry.register_fn("time", |_, _| {
            let elapsed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|err| native_error("time", err.to_string()))?;
            Ok(Value::Number(elapsed.as_secs_f64() * 1000.0))
        });
        registry.register("math", Value::Object(math_object()));
        registry
    }

    /// Register (or replace) a global value.
    pub fn register(&mut self, name: &str, value: Value) {
        self.entries.insert(name.to_string(), value);
    }

    /// Register a host function under `name`.
    pub fn register_fn(
        &mut self,
        name: &str,
        callable: impl Fn(&[Value], &Environment) -> EvalResult + 'static,
    ) {
        self.register(name, Value::NativeFunction(NativeFunction::new(name, callable)));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind every entry as a constant in `env`.
    pub fn install(&self, env: &Environment) {
        for (name, value) in &self.entries {
            trace!(%name, "install native");
            env.define(name, value.clone(), Mutability::Immutable);
        }
    }
}

fn math_object() -> ObjectValue {
    let object = ObjectValue::new();
    object.set("pi", Value::Number(std::f64::consts::PI));
    object.set("e", Value::Number(std::f64::consts::E));

    let unary: [(&'static str, fn(f64) -> f64); 5] = [
        ("sqrt", f64::sqrt),
        ("abs", f64::abs),
        ("floor", f64::floor),
        ("ceil", f64::ceil),
        ("round", f64::round),
    ];
    for (name, op) in unary {
        let function = NativeFunction::new(name, move |args, _| {
            Ok(Value::Number(op(number_arg(name, args, 0)?)))
        });
        object.set(name, Value::NativeFunction(function));
    }

    let pow = NativeFunction::new("pow", |args, _| {
        let base = number_arg("pow", args, 0)?;
        let exponent = number_arg("pow", args, 1)?;
        Ok(Value::Number(base.powf(exponent)))
    });
    object.set("pow", Value::NativeFunction(pow));

    // With no arguments, `min` is +Infinity and `max` is -Infinity.
    let min = NativeFunction::new("min", |args, _| {
        fold_numbers("min", args, f64::INFINITY, f64::min)
    });
    object.set("min", Value::NativeFunction(min));
    let max = NativeFunction::new("max", |args, _| {
        fold_numbers("max", args, f64::NEG_INFINITY, f64::max)
    });
    object.set("max", Value::NativeFunction(max));

    object
}

fn number_arg(function: &str, args: &[Value], index: usize) -> Result<f64, EvalError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(native_error(
            function,
            format!(
                "argument {} must be a number, got {}",
                index + 1,
                other.type_name()
            ),
        )),
        None => Err(native_error(
            function,
            format!("missing argument {}", index + 1),
        )),
    }
}

fn fold_numbers(
    function: &str,
    args: &[Value],
    init: f64,
    op: fn(f64, f64) -> f64,
) -> EvalResult {
    let mut acc = init;
    for index in 0..args.len() {
        acc = op(acc, number_arg(function, args, index)?);
    }
    Ok(Value::Number(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer_handler;

    fn call(value: Option<Value>, args: &[Value]) -> EvalResult {
        match value {
            Some(Value::NativeFunction(native)) => native.call(args, &Environment::global()),
            other => panic!("not a native function: {other:?}"),
        }
    }

    fn math(name: &str) -> Option<Value> {
        math_object().get(name)
    }

    #[test]
    fn defaults_are_installed_as_constants() {
        let registry = NativeRegistry::with_defaults(buffer_handler());
        let env = Environment::global();
        registry.install(&env);

        assert_eq!(env.lookup("true"), Ok(Value::Boolean(true)));
        assert_eq!(env.lookup("null"), Ok(Value::Null));
        assert!(matches!(env.lookup("math"), Ok(Value::Object(_))));
        assert_eq!(
            env.assign("print", Value::Null),
            Err(EvalError::ConstAssignment {
                name: "print".into()
            })
        );
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn print_writes_each_argument_on_its_own_line() {
        let output = buffer_handler();
        let registry = NativeRegistry::with_defaults(output.clone());
        let object: ObjectValue = [("k", Value::from("v"))].into_iter().collect();
        let result = call(
            registry.get("print").cloned(),
            &[Value::from("hi"), Value::Number(2.5), Value::Object(object)],
        );
        assert_eq!(result, Ok(Value::Null));
        assert_eq!(output.get_output(), "hi\n2.5\n{ k: \"v\" }\n");
    }

    #[test]
    fn time_is_positive() {
        let registry = NativeRegistry::with_defaults(buffer_handler());
        let now = call(registry.get("time").cloned(), &[]);
        assert!(matches!(now, Ok(Value::Number(ms)) if ms > 0.0));
    }

    #[test]
    fn math_functions() {
        assert_eq!(call(math("sqrt"), &[Value::Number(9.0)]), Ok(Value::Number(3.0)));
        assert_eq!(call(math("abs"), &[Value::Number(-2.0)]), Ok(Value::Number(2.0)));
        assert_eq!(call(math("floor"), &[Value::Number(1.7)]), Ok(Value::Number(1.0)));
        assert_eq!(call(math("ceil"), &[Value::Number(1.2)]), Ok(Value::Number(2.0)));
        assert_eq!(call(math("round"), &[Value::Number(2.5)]), Ok(Value::Number(3.0)));
        assert_eq!(
            call(math("pow"), &[Value::Number(2.0), Value::Number(10.0)]),
            Ok(Value::Number(1024.0))
        );
        assert_eq!(
            call(
                math("max"),
                &[Value::Number(1.0), Value::Number(7.0), Value::Number(3.0)]
            ),
            Ok(Value::Number(7.0))
        );
        assert_eq!(call(math("min"), &[]), Ok(Value::Number(f64::INFINITY)));
        assert_eq!(math("pi"), Some(Value::Number(std::f64::consts::PI)));
    }

    #[test]
    fn math_rejects_non_numbers() {
        assert_eq!(
            call(math("sqrt"), &[Value::from("9")]),
            Err(EvalError::Native {
                function: "sqrt".into(),
                message: "argument 1 must be a number, got string".into(),
            })
        );
        assert_eq!(
            call(math("pow"), &[Value::Number(2.0)]),
            Err(EvalError::Native {
                function: "pow".into(),
                message: "missing argument 2".into(),
            })
        );
    }
}
