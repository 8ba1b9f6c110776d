//! Pure helpers over JSON values
//!
//! Nothing in here depends on the rest of the crate.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// True for JSON objects.
pub fn is_record(value: &Value) -> bool {
    value.is_object()
}

/// True for JSON objects and arrays.
pub fn is_struct(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// JavaScript-style truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Get a value from `obj` by dot-notation path.
///
/// Unlike the configuration store, arrays can be traversed with numeric
/// segments (`items.0.name`). Segments are trimmed; an empty path or an
/// empty segment yields `None`.
pub fn get_val<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
    if !is_struct(obj) {
        return None;
    }

    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let mut current = obj;
    for part in parts {
        let key = part.trim();
        current = match current {
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(key)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Get a value as `T`, falling back to `default` when the value is missing,
/// falsy, or of the wrong shape.
pub fn safely_get_as<T: DeserializeOwned>(obj: &Value, path: &str, default: T) -> T {
    get_val(obj, path)
        .filter(|v| is_truthy(v))
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(default)
}
