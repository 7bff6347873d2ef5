//! JSON helpers shared by the document loaders

use serde_json::Value;

/// Short name of a JSON value's type, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!([1])), "an array");
        assert_eq!(json_kind(&json!({"a": 1})), "an object");
        assert_eq!(json_kind(&json!("1.0.0")), "a string");
    }
}
