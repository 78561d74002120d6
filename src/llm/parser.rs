use serde_json::{Map, Value};

use super::ModelError;

/// Extract a JSON object from a raw model completion.
///
/// The prompts ask for "ONLY the JSON object", but local models routinely wrap
/// the object in ```json fences or lead with prose. Tolerated layouts:
/// a ```json fenced block, a bare ``` fenced block, or a raw `{...}` body.
pub fn parse_json_object(response: &str) -> Result<Map<String, Value>, ModelError> {
    let candidate = extract_json_candidate(response)?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ModelError::MalformedResponse(format!("Invalid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::MalformedResponse(format!(
            "Expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn extract_json_candidate(response: &str) -> Result<&str, ModelError> {
    if let Some(inner) = fenced_block(response, "```json") {
        return Ok(inner);
    }
    if let Some(inner) = fenced_block(response, "```") {
        return Ok(inner);
    }

    // No fences: take the outermost brace span.
    let start = response
        .find('{')
        .ok_or_else(|| ModelError::MalformedResponse("No JSON object found".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| ModelError::MalformedResponse("Unclosed JSON object".into()))?;
    if end < start {
        return Err(ModelError::MalformedResponse("Unclosed JSON object".into()));
    }

    Ok(response[start..=end].trim())
}

fn fenced_block<'a>(response: &'a str, fence: &str) -> Option<&'a str> {
    let start = response.find(fence)? + fence.len();
    let end = response[start..].find("```")?;
    Some(response[start..start + end].trim())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_object() {
        let map = parse_json_object(r#"{"title": "Suez Crisis"}"#).unwrap();
        assert_eq!(map["title"], "Suez Crisis");
    }

    #[test]
    fn parses_json_fenced_block() {
        let response = "Here you go:\n```json\n{\"bias_score\": 12.5}\n```\nDone.";
        let map = parse_json_object(response).unwrap();
        assert_eq!(map["bias_score"], 12.5);
    }

    #[test]
    fn parses_anonymous_fenced_block() {
        let response = "```\n{\"keywords\": [\"Egypt\"]}\n```";
        let map = parse_json_object(response).unwrap();
        assert!(map["keywords"].is_array());
    }

    #[test]
    fn parses_object_with_leading_prose() {
        let response = "Sure! The card is: {\"title\": \"1956\"} hope that helps";
        let map = parse_json_object(response).unwrap();
        assert_eq!(map["title"], "1956");
    }

    #[test]
    fn rejects_response_without_object() {
        let err = parse_json_object("I could not produce a card.").unwrap_err();
        assert!(matches!(err, ModelError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_top_level_array() {
        let err = parse_json_object("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ModelError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_truncated_json() {
        let err = parse_json_object("{\"title\": \"Suez").unwrap_err();
        assert!(matches!(err, ModelError::MalformedResponse(_)));
    }
}
