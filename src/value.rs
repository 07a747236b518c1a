//! Null-safe views over loosely-typed form data.
//!
//! Form values arrive as arbitrary JSON. Everything in here is total: a
//! missing key, a `null`, or a value of the wrong shape reads as "absent"
//! instead of failing, so callers never need to guard against malformed input.
//!
//! | Accessor        | Accepts                          | Otherwise        |
//! |-----------------|----------------------------------|------------------|
//! | `text`          | non-blank string, number         | `None`           |
//! | `number`        | number, numeric string           | `None`           |
//! | `flag`          | `true`, `"true"`, `"1"`, `"on"`  | `false`          |
//! | `list`          | array                            | empty slice      |
//! | `record`        | object                           | empty `Fields`   |

use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Shared empty object so `Fields` can borrow one for non-record input.
static EMPTY: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Borrowed, read-only view over a JSON record.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// View any value as a record; non-objects become an empty record.
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self { map },
            _ => Self::empty(),
        }
    }

    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    pub fn empty() -> Self {
        Self { map: &*EMPTY }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Trimmed, non-empty string value. Numbers are stringified.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(as_text)
    }

    /// Numeric value; numeric strings are parsed.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean-ish flag. Anything unrecognized is `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(as_flag)
    }

    /// Like `flag`, but distinguishes "not set" from `false`.
    pub fn opt_flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            other => Some(as_flag(other)),
        }
    }

    /// Array value, or an empty slice for anything else.
    pub fn list(&self, key: &str) -> &'a [Value] {
        match self.get(key) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Nested record, or an empty record for anything else.
    pub fn record(&self, key: &str) -> Fields<'a> {
        self.get(key).map_or_else(Self::empty, Self::new)
    }

    /// String list: accepts an array of strings/numbers, or a single string
    /// split on newlines and commas.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.split_list(key, &['\n', ','])
    }

    /// Like `strings`, but text is split on newlines only, so free-text
    /// lines keep their commas.
    pub fn lines(&self, key: &str) -> Vec<String> {
        self.split_list(key, &['\n'])
    }

    fn split_list(&self, key: &str, separators: &[char]) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
            Some(Value::String(s)) => s
                .split(separators)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.map.iter()
    }
}

/// Trimmed non-empty text from a scalar value.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

/// Whether a stored value counts as "not set" for override resolution.
///
/// `null`, blank strings, empty arrays and empty records are empty.
/// Booleans and numbers always carry a value.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_non_record_is_empty() {
        let value = json!("just a string");
        let fields = Fields::new(&value);
        assert!(fields.is_empty());
        assert_eq!(fields.text("name"), None);
        assert!(fields.list("items").is_empty());
    }

    #[test]
    fn test_text_trims_and_skips_blank() {
        let value = json!({ "a": "  hello ", "b": "   ", "c": 42, "d": null, "e": [1] });
        let fields = Fields::new(&value);
        assert_eq!(fields.text("a").as_deref(), Some("hello"));
        assert_eq!(fields.text("b"), None);
        assert_eq!(fields.text("c").as_deref(), Some("42"));
        assert_eq!(fields.text("d"), None);
        assert_eq!(fields.text("e"), None);
    }

    #[test]
    fn test_number_parses_strings() {
        let value = json!({ "a": "12.5", "b": 3, "c": "abc" });
        let fields = Fields::new(&value);
        assert_eq!(fields.number("a"), Some(12.5));
        assert_eq!(fields.number("b"), Some(3.0));
        assert_eq!(fields.number("c"), None);
    }

    #[test]
    fn test_list_wrong_shape_is_empty() {
        let value = json!({ "steps": "not an array", "ok": [1, 2] });
        let fields = Fields::new(&value);
        assert!(fields.list("steps").is_empty());
        assert_eq!(fields.list("ok").len(), 2);
    }

    #[test]
    fn test_record_wrong_shape_is_empty() {
        let value = json!({ "address": ["x"] });
        let fields = Fields::new(&value);
        assert!(fields.record("address").is_empty());
        assert!(fields.record("missing").is_empty());
    }

    #[test]
    fn test_flag_variants() {
        let value = json!({ "a": true, "b": "on", "c": "no", "d": 0, "e": 1 });
        let fields = Fields::new(&value);
        assert!(fields.flag("a"));
        assert!(fields.flag("b"));
        assert!(!fields.flag("c"));
        assert!(!fields.flag("d"));
        assert!(fields.flag("e"));
        assert!(!fields.flag("missing"));
        assert_eq!(fields.opt_flag("missing"), None);
        assert_eq!(fields.opt_flag("c"), Some(false));
    }

    #[test]
    fn test_strings_from_text_and_array() {
        let value = json!({ "a": "rust, seo\nweb", "b": ["x", "", 3] });
        let fields = Fields::new(&value);
        assert_eq!(fields.strings("a"), vec!["rust", "seo", "web"]);
        assert_eq!(fields.strings("b"), vec!["x", "3"]);
    }

    #[test]
    fn test_lines_keep_commas() {
        let value = json!({ "a": "2 cups flour, sifted\r\n\n1 egg", "b": ["x, y"] });
        let fields = Fields::new(&value);
        assert_eq!(fields.lines("a"), vec!["2 cups flour, sifted", "1 egg"]);
        assert_eq!(fields.lines("b"), vec!["x, y"]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!(" ")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!("x")));
    }
}
