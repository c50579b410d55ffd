//! Re-hydration of persisted documents.
//!
//! Documents coming back from storage or from a generation layer are not
//! always clean JSON trees: the whole document may arrive as a JSON string,
//! and structural sub-values (`fields`, `sections`, `dataSource`, ...) may be
//! stringified. Those strings are parsed back before typed deserialization.

use crate::document::Document;
use crate::error::{ModelError, ModelResult};
use serde_json::Value;

/// Keys whose values are structures, never plain strings
const STRUCTURAL_KEYS: &[&str] = &[
    "fields",
    "actions",
    "sections",
    "regions",
    "content",
    "children",
    "modules",
    "columns",
    "rows",
    "filters",
    "widgets",
    "options",
    "data",
    "dataSource",
    "layout",
    "accessibility",
    "intent",
    "constraints",
    "evaluation",
    "payload",
    "params",
    "schema",
    "props",
    "telemetry",
];

impl Document {
    /// Parse a document from JSON text, tolerating a doubly-encoded document
    pub fn from_json_str(text: &str) -> ModelResult<Document> {
        let value: Value = serde_json::from_str(text)?;
        Document::from_value(value)
    }

    /// Deserialize a document, re-parsing stringified structure first
    pub fn from_value(value: Value) -> ModelResult<Document> {
        let value = match value {
            Value::String(text) => serde_json::from_str(&text)?,
            other => other,
        };
        if !value.is_object() {
            return Err(ModelError::UnexpectedShape {
                expected: "object",
                found: shape_name(&value),
            });
        }
        Ok(serde_json::from_value(hydrate_value(value))?)
    }
}

/// Recursively parse stringified values found under structural keys
pub fn hydrate_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = if STRUCTURAL_KEYS.contains(&key.as_str()) {
                        parse_stringified(value)
                    } else {
                        value
                    };
                    (key, hydrate_value(value))
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(hydrate_value).collect()),
        other => other,
    }
}

fn parse_stringified(value: Value) -> Value {
    match value {
        Value::String(text) => {
            let trimmed = text.trim_start();
            if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
                return Value::String(text);
            }
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        other => other,
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBody;
    use serde_json::json;

    #[test]
    fn test_stringified_containers_are_parsed() {
        let doc = Document::from_value(json!({
            "id": "doc",
            "kind": "form",
            "fields": "[{\"id\":\"f1\",\"name\":\"email\",\"component\":\"input\"}]",
            "layout": "{\"space\":\"md\"}"
        }))
        .unwrap();

        match &doc.body {
            DocumentBody::Form(form) => assert_eq!(form.fields[0].name, "email"),
            _ => panic!("Expected form body"),
        }
        assert_eq!(doc.layout.unwrap().space.as_deref(), Some("md"));
    }

    #[test]
    fn test_document_as_json_string() {
        let inner = json!({ "id": "t", "kind": "table", "columns": [{ "id": "c", "key": "name" }] });
        let text = serde_json::to_string(&Value::String(inner.to_string())).unwrap();

        let doc = Document::from_json_str(&text).unwrap();
        assert_eq!(doc.id, "t");
    }

    #[test]
    fn test_plain_strings_under_structural_keys_survive() {
        let value = hydrate_value(json!({ "data": "42 users", "title": "[draft]" }));
        assert_eq!(value, json!({ "data": "42 users", "title": "[draft]" }));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let err = Document::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ModelError::UnexpectedShape { found: "array", .. }));
    }
}
