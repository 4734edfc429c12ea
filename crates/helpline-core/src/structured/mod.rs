//! Structured-output parsing for free-text model replies.
//!
//! Model output is untrusted: it may wrap JSON in prose, emit invalid JSON,
//! or emit nothing useful at all. Everything the pipeline reads from the model
//! goes through this module, which turns raw text into typed verdicts with an
//! explicit default for every field (see [`verdict`]).

pub mod verdict;

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Matches a `"response": "..."` pair anywhere in the text.
static RESPONSE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""response"\s*:\s*"([^"]+)""#).expect("response field pattern is valid")
});

/// Extract the JSON object spanning the first `{` to the last `}`.
///
/// Returns an empty map when there is no such span or it does not parse as a
/// JSON object. Braces are not balanced: a stray `}` after the object makes
/// the span invalid and the result empty.
pub fn extract_json_object(text: &str) -> Map<String, Value> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Map::new();
    };
    if end < start {
        return Map::new();
    }
    serde_json::from_str::<Map<String, Value>>(&text[start..=end]).unwrap_or_default()
}

/// Extract the user-facing reply from a drafting response.
///
/// Tries, in order: the `response` string of the embedded JSON object, a
/// regex search for a `"response": "..."` pair (for almost-JSON output), and
/// finally the whole output trimmed.
pub fn extract_reply_text(raw: &str) -> String {
    if let Some(Value::String(reply)) = extract_json_object(raw).get("response") {
        return reply.trim().to_string();
    }

    if let Some(captures) = RESPONSE_FIELD.captures(raw) {
        if let Some(m) = captures.get(1) {
            return m.as_str().trim().to_string();
        }
    }

    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_object_with_noise() {
        let obj = extract_json_object(r#"noise {"a":1} trailing"#);
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn test_extract_json_object_no_braces() {
        assert!(extract_json_object("no braces here").is_empty());
    }

    #[test]
    fn test_extract_json_object_invalid_json() {
        assert!(extract_json_object("{ intent: greeting }").is_empty());
    }

    #[test]
    fn test_extract_json_object_reversed_braces() {
        assert!(extract_json_object("} nothing {").is_empty());
    }

    #[test]
    fn test_extract_json_object_stray_closing_brace_truncates() {
        // First `{` to last `}` spans both fragments, which is not valid JSON.
        let text = r#"{"intent": "greeting"} and then }"#;
        assert!(extract_json_object(text).is_empty());
    }

    #[test]
    fn test_extract_json_object_nested() {
        let obj = extract_json_object("Sure!\n```json\n{\"a\": {\"b\": [1, 2]}}\n```");
        assert_eq!(obj["a"]["b"], json!([1, 2]));
    }

    #[test]
    fn test_extract_json_object_array_is_not_object() {
        assert!(extract_json_object("[1, 2]").is_empty());
    }

    #[test]
    fn test_extract_reply_text_from_json() {
        let raw = "Here you go: {\"response\": \"  Happy to help!  \"}";
        assert_eq!(extract_reply_text(raw), "Happy to help!");
    }

    #[test]
    fn test_extract_reply_text_from_almost_json() {
        // Trailing comma makes the object invalid, regex still finds the value.
        let raw = "{\"response\": \"We will look into it.\",}";
        assert_eq!(extract_reply_text(raw), "We will look into it.");
    }

    #[test]
    fn test_extract_reply_text_non_string_response_falls_through() {
        let raw = r#"{"response": 42}"#;
        assert_eq!(extract_reply_text(raw), r#"{"response": 42}"#);
    }

    #[test]
    fn test_extract_reply_text_passthrough() {
        assert_eq!(
            extract_reply_text("  Thanks, a human will join shortly.\n"),
            "Thanks, a human will join shortly."
        );
    }
}
