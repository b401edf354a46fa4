use std::collections::BTreeMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use slang_ir::{BinaryOp, Expr, Stmt};

use super::*;
use crate::Environment;

fn native(name: &str) -> NativeFunction {
    NativeFunction::new(name, |_, _| Ok(Value::Null))
}

fn function(name: &str) -> Value {
    Value::Function(Rc::new(FunctionValue {
        name: name.into(),
        parameters: vec!["a".into(), "b".into()],
        body: Rc::from(vec![Stmt::Expr(Expr::binary(
            Expr::ident("a"),
            BinaryOp::Add,
            Expr::ident("b"),
        ))]),
        closure: Environment::global(),
    }))
}

#[test]
fn truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Boolean(false).is_truthy());
    assert!(!Value::Number(0.0).is_truthy());
    assert!(!Value::from("").is_truthy());

    assert!(Value::Boolean(true).is_truthy());
    assert!(Value::Number(-0.5).is_truthy());
    assert!(Value::from("0").is_truthy());
    assert!(Value::Object(ObjectValue::new()).is_truthy());
    assert!(function("f").is_truthy());
    assert!(Value::NativeFunction(native("print")).is_truthy());
}

#[test]
fn equality_is_by_value_for_primitives() {
    assert_eq!(Value::Number(2.0), Value::Number(2.0));
    assert_eq!(Value::from("a"), Value::string(String::from("a")));
    assert_eq!(Value::Null, Value::Null);
    assert_ne!(Value::Number(1.0), Value::Boolean(true));
    assert_ne!(Value::from("1"), Value::Number(1.0));
    assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
}

#[test]
fn equality_is_by_identity_for_objects_and_functions() {
    let a = ObjectValue::new();
    let b = ObjectValue::new();
    assert_eq!(Value::Object(a.clone()), Value::Object(a));
    assert_ne!(Value::Object(b), Value::Object(ObjectValue::new()));

    let f = function("f");
    assert_eq!(f.clone(), f);
    assert_ne!(function("f"), function("f"));

    let print = native("print");
    assert_eq!(
        Value::NativeFunction(print.clone()),
        Value::NativeFunction(print)
    );
}

#[test]
fn objects_are_shared_between_aliases() {
    let object = ObjectValue::new();
    let alias = object.clone();
    alias.set("x", Value::Number(1.0));
    assert_eq!(object.get("x"), Some(Value::Number(1.0)));
    assert_eq!(object.get("y"), None);
    assert_eq!(object.len(), 1);
    assert!(!object.is_empty());
}

#[test]
fn display_text() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Number(8.0).to_string(), "8");
    assert_eq!(Value::Number(2.5).to_string(), "2.5");
    assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::from("hi").to_string(), "hi");
    assert_eq!(function("add").to_string(), "fn add(a, b)");
    assert_eq!(Value::NativeFunction(native("time")).to_string(), "native fn time");
}

#[test]
fn objects_display_in_key_order() {
    let object: ObjectValue = [
        ("b", Value::from("two")),
        ("a", Value::Number(1.0)),
        ("c", Value::Object(ObjectValue::new())),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        Value::Object(object).to_string(),
        "{ a: 1, b: \"two\", c: {} }"
    );
}

#[test]
fn self_referencing_object_displays_as_circular() {
    let object = ObjectValue::new();
    object.set("me", Value::Object(object.clone()));
    assert_eq!(Value::Object(object.clone()).to_string(), "{ me: [Circular] }");
    assert_eq!(
        to_plain(&Value::Object(object.clone())),
        PlainValue::Object(BTreeMap::from([("me".to_string(), PlainValue::Circular)]))
    );
    // Break the cycle so the test does not leak.
    object.set("me", Value::Null);
}

#[test]
fn plain_conversion() {
    let inner: ObjectValue = [("n", Value::Number(3.0))].into_iter().collect();
    let object: ObjectValue = [
        ("inner", Value::Object(inner)),
        ("flag", Value::Boolean(false)),
        ("nothing", Value::Null),
    ]
    .into_iter()
    .collect();

    let expected = PlainValue::Object(BTreeMap::from([
        ("flag".to_string(), PlainValue::Boolean(false)),
        (
            "inner".to_string(),
            PlainValue::Object(BTreeMap::from([("n".to_string(), PlainValue::Number(3.0))])),
        ),
        ("nothing".to_string(), PlainValue::Null),
    ]));
    assert_eq!(to_plain(&Value::Object(object)), expected);
}

#[test]
fn plain_functions_are_descriptors() {
    match &to_plain(&function("add")) {
        PlainValue::Function {
            name,
            body,
            internal,
        } => {
            assert_eq!(name, "add");
            assert_eq!(body.len(), 1);
            assert!(!*internal);
        }
        other => panic!("expected a function descriptor, got {other:?}"),
    }

    assert_eq!(
        to_plain(&Value::NativeFunction(native("print"))),
        PlainValue::Native {
            name: "print".into(),
            internal: true,
        }
    );
}

#[test]
fn plain_display() {
    assert_eq!(to_plain(&Value::from("raw")).to_string(), "raw");
    assert_eq!(
        to_plain(&function("add")).to_string(),
        "{ name: \"add\", body: { a + b; }, internal: false }"
    );
    assert_eq!(
        to_plain(&Value::NativeFunction(native("print"))).to_string(),
        "{ name: \"print\", internal: true }"
    );
    let object: ObjectValue = [("s", Value::from("x"))].into_iter().collect();
    assert_eq!(to_plain(&Value::Object(object)).to_string(), "{ s: \"x\" }");
}
