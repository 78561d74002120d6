use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BiasValidationError {
    #[error("Bias response is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Failed to coerce bias field '{field}'")]
    CoercionError { field: &'static str },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Validate a bias judge response and extract `(score, explanation)`.
///
/// Check order is fixed: missing fields, then coercion, then range/length.
/// The score accepts a JSON number or a numeric string; the explanation
/// accepts a string, or a number/bool rendered to its text form.
pub fn validate_bias_response(
    data: &Map<String, Value>,
) -> Result<(f64, String), BiasValidationError> {
    let missing: Vec<String> = ["bias_score", "explanation"]
        .iter()
        .filter(|field| !data.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(BiasValidationError::MissingFields(missing));
    }

    let bias_score = coerce_number(&data["bias_score"])
        .ok_or(BiasValidationError::CoercionError { field: "bias_score" })?;
    let explanation = coerce_string(&data["explanation"])
        .ok_or(BiasValidationError::CoercionError { field: "explanation" })?;

    if !(0.0..=100.0).contains(&bias_score) {
        return Err(BiasValidationError::ConstraintViolation(format!(
            "Bias score out of range: {bias_score}"
        )));
    }

    if explanation.chars().count() < 10 {
        return Err(BiasValidationError::ConstraintViolation(
            "Bias explanation must be at least 10 characters".into(),
        ));
    }

    Ok((bias_score, explanation))
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn accepts_valid_response() {
        let data = payload(json!({
            "bias_score": 42.5,
            "explanation": "The framing leans toward one side."
        }));
        let (score, explanation) = validate_bias_response(&data).unwrap();
        assert_eq!(score, 42.5);
        assert_eq!(explanation, "The framing leans toward one side.");
    }

    #[test]
    fn coerces_numeric_string_score() {
        let data = payload(json!({
            "bias_score": "55",
            "explanation": "This passage leans toward one side."
        }));
        let (score, _) = validate_bias_response(&data).unwrap();
        assert_eq!(score, 55.0);
    }

    #[test]
    fn names_missing_fields() {
        let err = validate_bias_response(&Map::new()).unwrap_err();
        assert_eq!(
            err,
            BiasValidationError::MissingFields(vec![
                "bias_score".into(),
                "explanation".into()
            ])
        );
    }

    #[test]
    fn missing_check_precedes_coercion_check() {
        let data = payload(json!({ "bias_score": [1, 2] }));
        let err = validate_bias_response(&data).unwrap_err();
        assert_eq!(
            err,
            BiasValidationError::MissingFields(vec!["explanation".into()])
        );
    }

    #[test]
    fn uncoercible_score_fails() {
        let data = payload(json!({
            "bias_score": "not a number",
            "explanation": "A valid, sufficiently long explanation."
        }));
        assert_eq!(
            validate_bias_response(&data).unwrap_err(),
            BiasValidationError::CoercionError { field: "bias_score" }
        );
    }

    #[test]
    fn uncoercible_explanation_fails() {
        let data = payload(json!({
            "bias_score": 10.0,
            "explanation": {"text": "nested"}
        }));
        assert_eq!(
            validate_bias_response(&data).unwrap_err(),
            BiasValidationError::CoercionError { field: "explanation" }
        );
    }

    #[test]
    fn boundary_scores_are_accepted() {
        for score in [0.0, 100.0] {
            let data = payload(json!({
                "bias_score": score,
                "explanation": "Boundary value should be accepted."
            }));
            assert!(validate_bias_response(&data).is_ok());
        }
    }

    #[test]
    fn out_of_range_score_fails_regardless_of_explanation() {
        for score in [-1.0, 100.01] {
            let data = payload(json!({
                "bias_score": score,
                "explanation": "A perfectly valid explanation text."
            }));
            assert!(matches!(
                validate_bias_response(&data).unwrap_err(),
                BiasValidationError::ConstraintViolation(_)
            ));
        }
    }

    #[test]
    fn short_explanation_fails() {
        let data = payload(json!({
            "bias_score": 50.0,
            "explanation": "too short"
        }));
        assert!(matches!(
            validate_bias_response(&data).unwrap_err(),
            BiasValidationError::ConstraintViolation(_)
        ));
    }
}
