//! Hand-written JSON-LD.

use crate::schema::doc::SCHEMA_CONTEXT;
use crate::value::Fields;
use serde_json::{Map, Value};

/// Custom document from `json` (a JSON string) or `document` (a record).
///
/// The document must be a record carrying `@type`. A missing `@context` is
/// filled in and moved to the front.
pub fn custom(data: &Value) -> Option<Value> {
    let f = Fields::new(data);
    let parsed = match (f.text("json"), f.get("document")) {
        (Some(text), _) => serde_json::from_str::<Value>(&text).ok()?,
        (None, Some(document @ Value::Object(_))) => document.clone(),
        _ => return None,
    };
    let Value::Object(document) = parsed else {
        return None;
    };
    let has_type = document
        .get("@type")
        .is_some_and(|kind| matches!(kind, Value::String(s) if !s.trim().is_empty()) || kind.is_array());
    if !has_type {
        return None;
    }

    let mut ordered = Map::with_capacity(document.len() + 1);
    let context = document
        .get("@context")
        .cloned()
        .unwrap_or_else(|| Value::String(SCHEMA_CONTEXT.into()));
    ordered.insert("@context".into(), context);
    ordered.extend(document.into_iter().filter(|(key, _)| key != "@context"));
    Some(Value::Object(ordered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_from_json_text() {
        let doc = custom(&json!({ "json": r#"{ "@type": "Thing", "name": "X" }"# })).unwrap();
        assert_eq!(
            doc,
            json!({ "@context": "https://schema.org", "@type": "Thing", "name": "X" })
        );
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys[0], "@context");
    }

    #[test]
    fn test_custom_keeps_given_context() {
        let doc = custom(&json!({
            "document": { "@type": "Thing", "@context": "https://example.org" }
        }))
        .unwrap();
        assert_eq!(doc["@context"], json!("https://example.org"));
    }

    #[test]
    fn test_custom_rejects_bad_input() {
        assert!(custom(&json!({ "json": "{ broken" })).is_none());
        assert!(custom(&json!({ "json": "[1, 2]" })).is_none());
        assert!(custom(&json!({ "json": r#"{ "name": "untyped" }"# })).is_none());
        assert!(custom(&json!({ "document": "text" })).is_none());
    }
}
