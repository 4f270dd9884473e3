// Guard truthiness - decides whether a looked-up guard value fires a rule
// Falsiness is defined once, here, instead of leaning on host-language coercion

use serde_json::Value;

/// A guard value is falsy when it is null, `false`, numeric zero, the
/// empty string, or an empty collection. Everything else is truthy;
/// notably the string `"0"` is truthy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    !is_falsy(value)
}
