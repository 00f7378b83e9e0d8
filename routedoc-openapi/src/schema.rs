use serde_json::Value;

/// Shallow copy of a field schema without its `description` key.
///
/// Descriptions are promoted to the enclosing parameter or body object, so
/// they are not repeated inside `schema`. Nested schemas are left untouched,
/// and non-object values are returned unchanged.
pub fn normalize_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .filter(|(key, _)| key.as_str() != "description")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// The `description` string of a schema, if it has one.
pub fn schema_description(schema: &Value) -> Option<&str> {
    schema.get("description").and_then(Value::as_str)
}
