//! Built-in value converters.
//!
//! Converters rewrite a raw value while formatted output is built. The
//! built-in set covers the common primitive coercions; any closure with
//! the same signature works as a converter.

use serde_json::Value;

use crate::error::{Error, Result};

/// Conversion applied to a raw option value during formatting.
pub type ConvertFn = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Convert the value to an integer.
///
/// Strings are parsed as `i64` with surrounding whitespace tolerated, and
/// integral numbers pass through unchanged. Anything else fails with
/// [`Error::NotConvertible`].
pub fn integer(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| not_convertible(value, "integer")),
        _ => Err(not_convertible(value, "integer")),
    }
}

/// Convert the value to a floating point number.
///
/// Strings must parse to a finite `f64`; numbers pass through unchanged.
pub fn float(value: &Value) -> Result<Value> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::from(f)),
            _ => Err(not_convertible(value, "float")),
        },
        _ => Err(not_convertible(value, "float")),
    }
}

/// Coerce the value to a boolean.
///
/// The strings `"true"` and `"1"` are true and any other string is false.
/// Booleans pass through, everything else is false. Never fails.
pub fn boolean(value: &Value) -> Result<Value> {
    let truthy = match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "true" | "1"),
        _ => false,
    };
    Ok(Value::Bool(truthy))
}

/// Render the value as a string; non-string values use their JSON form.
pub fn string(value: &Value) -> Result<Value> {
    Ok(Value::String(render(value)))
}

/// Look up a built-in converter by name.
///
/// Recognized names: `integer`/`int`, `float`, `boolean`/`bool`,
/// `string`/`str`.
pub fn by_name(name: &str) -> Option<fn(&Value) -> Result<Value>> {
    match name {
        "integer" | "int" => Some(integer),
        "float" => Some(float),
        "boolean" | "bool" => Some(boolean),
        "string" | "str" => Some(string),
        _ => None,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn not_convertible(value: &Value, target: &str) -> Error {
    Error::NotConvertible(render(value), target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_parses_strings_and_passes_numbers() {
        assert_eq!(integer(&json!("42")).unwrap(), json!(42));
        assert_eq!(integer(&json!(" -7 ")).unwrap(), json!(-7));
        assert_eq!(integer(&json!(3)).unwrap(), json!(3));
    }

    #[test]
    fn integer_rejects_non_numeric_values() {
        let err = integer(&json!("eighty")).unwrap_err();
        assert!(matches!(err, Error::NotConvertible(value, target)
            if value == "eighty" && target == "integer"));
        assert!(integer(&json!(true)).is_err());
        assert!(integer(&json!(2.5)).is_err());
    }

    #[test]
    fn float_accepts_finite_numbers_only() {
        assert_eq!(float(&json!("1.5")).unwrap(), json!(1.5));
        assert_eq!(float(&json!(2)).unwrap(), json!(2));
        assert!(float(&json!("NaN")).is_err());
        assert!(float(&json!("inf")).is_err());
        assert!(float(&json!("eighty")).is_err());
    }

    #[test]
    fn boolean_coerces_without_failing() {
        assert_eq!(boolean(&json!("true")).unwrap(), json!(true));
        assert_eq!(boolean(&json!("1")).unwrap(), json!(true));
        assert_eq!(boolean(&json!("yes")).unwrap(), json!(false));
        assert_eq!(boolean(&json!("")).unwrap(), json!(false));
        assert_eq!(boolean(&json!(false)).unwrap(), json!(false));
        assert_eq!(boolean(&json!(1)).unwrap(), json!(false));
    }

    #[test]
    fn string_renders_json_forms() {
        assert_eq!(string(&json!("kit")).unwrap(), json!("kit"));
        assert_eq!(string(&json!(true)).unwrap(), json!("true"));
        assert_eq!(string(&json!(80)).unwrap(), json!("80"));
    }

    #[test]
    fn by_name_resolves_known_names_and_aliases() {
        assert!(by_name("integer").is_some());
        assert!(by_name("int").is_some());
        assert!(by_name("float").is_some());
        assert!(by_name("bool").is_some());
        assert!(by_name("str").is_some());
        assert!(by_name("decimal").is_none());
    }
}
