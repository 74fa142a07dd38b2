use serde_json::{Map, Value};

/// `value || []`: absent or null becomes an empty list, anything else is
/// passed through untouched.
pub fn list_or_empty(value: Option<Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(v) => v,
    }
}

/// `value || {}` for records.
pub fn record_or_empty(value: Option<Value>) -> Value {
    match value {
        Some(v @ Value::Object(_)) => v,
        _ => Value::Object(Map::new()),
    }
}

/// Moves a field out of a JSON object, if both exist.
pub fn take_field(value: &mut Value, key: &str) -> Option<Value> {
    value.as_object_mut().and_then(|map| map.remove(key))
}

/// Elements of a JSON array, or nothing for any other value.
pub fn as_slice(value: &Value) -> &[Value] {
    value.as_array().map(|v| v.as_slice()).unwrap_or(&[])
}

/// Integer field that upstream may send as a number or a numeric string.
pub fn int_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flag fields come as `1`/`0` or as booleans.
pub fn flag_field(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(v) => int_field_value(v) == Some(1),
        None => false,
    }
}

fn int_field_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        assert_eq!(list_or_empty(None), json!([]));
        assert_eq!(list_or_empty(Some(Value::Null)), json!([]));
        assert_eq!(list_or_empty(Some(json!([1]))), json!([1]));
        assert_eq!(record_or_empty(None), json!({}));
        assert_eq!(record_or_empty(Some(json!("x"))), json!({}));
        assert_eq!(record_or_empty(Some(json!({"a": 1}))), json!({"a": 1}));
    }

    #[test]
    fn test_fields() {
        let v = json!({ "n": 3, "s": "4", "flag": 1, "off": 0, "b": true });
        assert_eq!(int_field(&v, "n"), Some(3));
        assert_eq!(int_field(&v, "s"), Some(4));
        assert_eq!(int_field(&v, "missing"), None);
        assert!(flag_field(&v, "flag"));
        assert!(!flag_field(&v, "off"));
        assert!(flag_field(&v, "b"));
        assert!(!flag_field(&v, "missing"));
    }
}
