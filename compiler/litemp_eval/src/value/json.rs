//! Conversion from `serde_json` documents.

use serde_json::Value as Json;

use super::Value;

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::string(s),
            Json::Array(items) => items.into_iter().collect(),
            Json::Object(map) => Value::map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_convert() {
        assert_eq!(Value::from(json!(null)), Value::None);
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!("hi")), Value::from("hi"));
    }

    #[test]
    fn nested_documents_convert() {
        let value = Value::from(json!({"user": {"name": "Ned"}, "tags": ["a", "b"]}));
        let user = value.item("user").unwrap_or(Value::None);
        assert_eq!(user.item("name"), Some(Value::from("Ned")));
        assert_eq!(
            value.item("tags"),
            Some(Value::from(vec!["a", "b"]))
        );
    }
}
