use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    #[error("Card is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Card field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Validate the structural and content contract of generated card data.
///
/// Check order is fixed so error messages are reproducible: missing fields
/// first (naming every one), then types, then content constraints. Callers
/// may only project `data` into a card draft after this returns `Ok`.
pub fn validate_card_structure(data: &Map<String, Value>) -> Result<(), CardValidationError> {
    let missing: Vec<String> = ["title", "description", "keywords"]
        .iter()
        .filter(|field| !data.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CardValidationError::MissingFields(missing));
    }

    let title = data["title"].as_str().ok_or(CardValidationError::WrongType {
        field: "title",
        expected: "a string",
    })?;

    let description = data["description"]
        .as_str()
        .ok_or(CardValidationError::WrongType {
            field: "description",
            expected: "a string",
        })?;

    let keywords = data["keywords"]
        .as_array()
        .ok_or(CardValidationError::WrongType {
            field: "keywords",
            expected: "a list",
        })?;

    if keywords.iter().any(|k| !k.is_string()) {
        return Err(CardValidationError::WrongType {
            field: "keywords",
            expected: "a list of strings",
        });
    }

    let title_len = title.chars().count();
    if !(1..=200).contains(&title_len) {
        return Err(CardValidationError::ConstraintViolation(
            "Card title must be between 1 and 200 characters".into(),
        ));
    }

    if description.chars().count() < 10 {
        return Err(CardValidationError::ConstraintViolation(
            "Card description must be at least 10 characters".into(),
        ));
    }

    if keywords.is_empty() {
        return Err(CardValidationError::ConstraintViolation(
            "Card must have at least one keyword".into(),
        ));
    }

    Ok(())
}
