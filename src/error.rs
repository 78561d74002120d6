use thiserror::Error;
use uuid::Uuid;

use crate::pipeline::generation::CardValidationError;

/// Public error taxonomy for every card operation.
///
/// Collaborator failures (store, model client, extractor) are logged at the
/// stage where they occur and then mapped to exactly one of these kinds, so a
/// serving layer can translate each kind to a stable response code. `NotFound`
/// is never wrapped into another kind by intermediate layers.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Card with id {0} not found")]
    NotFound(Uuid),

    #[error("Failed to parse document context: {0}")]
    ExtractionFailed(String),

    #[error("Failed to generate card: {0}")]
    GenerationFailed(String),

    #[error("Invalid AI response structure: {0}")]
    InvalidStructure(#[from] CardValidationError),

    #[error("Failed to save card: {0}")]
    PersistenceFailed(String),

    #[error("Failed to fetch card: {0}")]
    FetchFailed(String),

    #[error("Assist operation failed: {0}")]
    AssistFailed(String),
}
