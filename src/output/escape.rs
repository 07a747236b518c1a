//! Escaping for the three contexts output is written into.
//!
//! | Context               | Function          | Guards against                 |
//! |-----------------------|-------------------|--------------------------------|
//! | HTML attribute / text | [`html_escape`]   | `<`, `>`, `&`, `"`             |
//! | inline `<script>`     | [`js_string`]     | quotes, `</script>` breakout   |
//! | JSON-LD block         | [`script_json`]   | `</script>` breakout           |
//! | HTML comment          | [`comment_text`]  | `--` and `>` closing early     |

use serde_json::Value;
use std::borrow::Cow;

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Double-quoted JavaScript string literal, safe inside `<script>`.
pub fn js_string(s: &str) -> String {
    // serializing a &str cannot fail
    let quoted = serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""));
    escape_script_close(&quoted)
}

/// Serialize a JSON-LD document for a `<script>` block.
pub fn script_json(value: &Value, pretty: bool) -> String {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    escape_script_close(&json.unwrap_or_default())
}

/// `</` becomes `<\/`, which JSON and JavaScript read back unchanged.
fn escape_script_close(s: &str) -> String {
    s.replace("</", "<\\/")
}

/// Text that cannot terminate the HTML comment it is placed in.
pub fn comment_text(s: &str) -> String {
    let text = s.trim().replace("--", "- -");
    text.trim_end_matches(['-', '>', ' ']).replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_escape_borrows_when_clean() {
        assert!(matches!(html_escape("plain text"), Cow::Borrowed(_)));
        assert_eq!(html_escape(r#"a "b" <c> & d"#), "a &quot;b&quot; &lt;c&gt; &amp; d");
    }

    #[test]
    fn test_js_string_blocks_script_close() {
        assert_eq!(js_string("G-123"), "\"G-123\"");
        assert_eq!(js_string("x</script><b>"), "\"x<\\/script><b>\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_script_json_escapes_close_tag() {
        let value = json!({ "name": "</script><script>alert(1)</script>" });
        let json = script_json(&value, false);
        assert!(!json.contains("</"));
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("twitter https://x.com/a"), "twitter https://x.com/a");
        assert_eq!(comment_text("bad -- comment -->"), "bad - - comment");
        assert!(!comment_text("a-->b").contains("-->"));
    }
}
