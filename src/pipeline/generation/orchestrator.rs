use rusqlite::Connection;
use serde_json::{Map, Value};

use super::prompt::{build_generation_prompt, GENERATION_SYSTEM_PROMPT};
use super::validate::validate_card_structure;
use crate::db::repository::insert_card;
use crate::error::ServiceError;
use crate::llm::{parse_json_object, LlmClient};
use crate::models::{Card, CardDraft, GenerationRequest};
use crate::pipeline::extraction::DocumentExtractor;

/// Orchestrates the card generation pipeline:
/// extract context → build prompt → invoke model → validate → persist.
///
/// All-or-nothing: the first failing stage short-circuits the rest, and no
/// partially constructed card is ever returned or persisted. No retries —
/// retry policy belongs to the caller.
pub struct CardGenerator<'a> {
    llm: &'a (dyn LlmClient + Send + Sync),
    model: &'a str,
    extractor: &'a (dyn DocumentExtractor + Send + Sync),
}

impl<'a> CardGenerator<'a> {
    pub fn new(
        llm: &'a (dyn LlmClient + Send + Sync),
        model: &'a str,
        extractor: &'a (dyn DocumentExtractor + Send + Sync),
    ) -> Self {
        Self {
            llm,
            model,
            extractor,
        }
    }

    /// Run the full pipeline and return the persisted card.
    pub fn generate(
        &self,
        conn: &Connection,
        request: &GenerationRequest,
    ) -> Result<Card, ServiceError> {
        let _span =
            tracing::info_span!("create_card_from_ai", title = %request.title).entered();

        // Stage 1: context extraction (skipped without a document)
        let context_text = self.extract_context(request)?;

        // Stage 2: prompt construction (pure)
        let context = if context_text.is_empty() {
            None
        } else {
            Some(context_text.as_str())
        };
        let prompt = build_generation_prompt(
            &request.title,
            &request.system_prompt,
            &request.topics_to_cover,
            context,
        );

        // Stage 3: model invocation + JSON extraction
        let card_data = self.invoke_model(&prompt, &request.title)?;

        // Stage 4: structural validation, then projection
        let draft = validate_and_project(&card_data).map_err(|e| {
            tracing::error!(title = %request.title, error = %e, "AI response failed validation");
            e
        })?;

        // Stage 5: persistence
        let card = insert_card(conn, &draft).map_err(|e| {
            tracing::error!(title = %request.title, error = %e, "Database operation failed");
            ServiceError::PersistenceFailed(e.to_string())
        })?;

        tracing::info!(card_id = %card.id, "Card created successfully");
        Ok(card)
    }

    fn extract_context(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        let Some(bytes) = request.document.as_deref() else {
            return Ok(String::new());
        };

        tracing::debug!("Parsing document context");
        let text = self.extractor.extract_text(bytes).map_err(|e| {
            tracing::error!(title = %request.title, error = %e, "Failed to parse document context");
            ServiceError::ExtractionFailed(e.to_string())
        })?;

        if text.is_empty() {
            // Tolerated soft condition: a scanned PDF with no text layer.
            tracing::warn!(title = %request.title, "Document parsing returned empty text");
        } else {
            tracing::info!(chars = text.len(), "Document parsed successfully");
        }

        Ok(text)
    }

    fn invoke_model(
        &self,
        prompt: &str,
        title: &str,
    ) -> Result<Map<String, Value>, ServiceError> {
        tracing::debug!("Calling model for card generation");
        let response = self
            .llm
            .generate(self.model, prompt, GENERATION_SYSTEM_PROMPT)
            .map_err(|e| {
                tracing::error!(title = %title, error = %e, "AI generation failed");
                ServiceError::GenerationFailed(e.to_string())
            })?;

        parse_json_object(&response).map_err(|e| {
            tracing::error!(title = %title, error = %e, "AI returned unusable output");
            ServiceError::GenerationFailed(e.to_string())
        })
    }
}

/// Validate model output and project the three card fields into a draft.
fn validate_and_project(data: &Map<String, Value>) -> Result<CardDraft, ServiceError> {
    validate_card_structure(data)?;

    // Safe after validation: all three keys exist with the checked types.
    let keywords = data["keywords"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|k| k.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(CardDraft {
        title: data["title"].as_str().unwrap_or_default().to_string(),
        description: data["description"].as_str().unwrap_or_default().to_string(),
        keywords,
    })
}
