//! Recovery of JSON payloads from free-form LLM responses.
//!
//! Models are asked to answer with JSON but often wrap it in Markdown code
//! fences or surround it with prose. [`extract_json`] strips the fences,
//! takes the span between the first `{` and the last `}`, and parses that.

use serde_json::Value;

use crate::error::CoreError;

/// Remove a leading ```` ``` ```` / ```` ```json ```` fence and a trailing
/// ```` ``` ```` fence, then trim.
pub fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the info string ("json", "JSON", ...) up to the first newline.
        s = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Parse the JSON object embedded in a model response.
///
/// Tries the outermost `{ ... }` span first, then the whole fence-stripped
/// text. Fails with [`CoreError::Validation`] when neither parses.
pub fn extract_json(text: &str) -> Result<Value, CoreError> {
    let cleaned = strip_code_fences(text);

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                return Ok(value);
            }
        }
    }

    serde_json::from_str(cleaned).map_err(|e| {
        CoreError::Validation(format!("Failed to parse JSON from model response: {e}"))
    })
}

/// Check that every named field exists on `value` and holds an array.
pub fn require_array_fields(value: &Value, fields: &[&str]) -> Result<(), CoreError> {
    for field in fields {
        match value.get(field) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(CoreError::Validation(format!(
                    "Model response field '{field}' is not an array"
                )))
            }
            None => {
                return Err(CoreError::Validation(format!(
                    "Model response is missing the '{field}' field"
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn parses_plain_json() {
        let v = extract_json(r#"{"trends": ["linen"]}"#).unwrap();
        assert_eq!(v, json!({"trends": ["linen"]}));
    }

    #[test]
    fn parses_json_code_fence() {
        let text = "```json\n{\"trends\": [\"linen\", \"sheer\"]}\n```";
        let v = extract_json(text).unwrap();
        assert_eq!(v["trends"][1], "sheer");
    }

    #[test]
    fn parses_bare_code_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text).unwrap()["a"], 1);
    }

    #[test]
    fn parses_json_surrounded_by_prose() {
        let text = "Here are the trends:\n{\"trends\": [{\"name\": \"butter yellow\"}]}\nHope this helps!";
        let v = extract_json(text).unwrap();
        assert_eq!(v["trends"][0]["name"], "butter yellow");
    }

    #[test]
    fn nested_braces_use_outermost_span() {
        let text = "x {\"outer\": {\"inner\": {\"deep\": true}}} y";
        assert_eq!(extract_json(text).unwrap()["outer"]["inner"]["deep"], true);
    }

    #[test]
    fn falls_back_to_whole_text_for_arrays() {
        let v = extract_json("```json\n[1, 2, 3]\n```").unwrap();
        assert_eq!(v, json!([1, 2, 3]));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert_matches!(
            extract_json("```json\n{\"trends\": [\n```"),
            Err(CoreError::Validation(_))
        );
        assert!(extract_json("no json here").is_err());
        assert!(extract_json("").is_err());
    }

    #[test]
    fn strip_fences_leaves_unfenced_text() {
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn array_fields_are_checked() {
        let v = json!({"trends": [], "keywords": "oops"});
        assert!(require_array_fields(&v, &["trends"]).is_ok());
        assert!(require_array_fields(&v, &["keywords"]).is_err());
        assert!(require_array_fields(&v, &["colors"]).is_err());
    }
}
