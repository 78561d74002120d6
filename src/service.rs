use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository;
use crate::error::ServiceError;
use crate::llm::LlmClient;
use crate::models::{BiasJudgment, Card, CopilotAnswer, GenerationRequest};
use crate::pipeline::assist::CardAssistant;
use crate::pipeline::extraction::DocumentExtractor;
use crate::pipeline::generation::CardGenerator;

/// Facade over the card operations: list, get, AI creation, copilot, bias.
///
/// Owns the injected collaborators; every method takes the connection for
/// the current request and holds no mutable state, so one service instance
/// can serve any number of request-scoped calls.
pub struct CardService {
    llm: Box<dyn LlmClient + Send + Sync>,
    model: String,
    extractor: Box<dyn DocumentExtractor + Send + Sync>,
}

impl CardService {
    pub fn new(
        llm: Box<dyn LlmClient + Send + Sync>,
        model: &str,
        extractor: Box<dyn DocumentExtractor + Send + Sync>,
    ) -> Self {
        tracing::info!(model = %model, "CardService initialized");
        Self {
            llm,
            model: model.to_string(),
            extractor,
        }
    }

    /// Retrieve cards, optionally filtered by title substring, with paging.
    pub fn list_cards(
        &self,
        conn: &Connection,
        title_filter: Option<&str>,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Card>, ServiceError> {
        match title_filter {
            Some(filter) => tracing::debug!(filter = %filter, "Fetching cards with title filter"),
            None => tracing::debug!("Fetching all cards"),
        }

        let cards = repository::list_cards(conn, title_filter, offset, limit).map_err(|e| {
            tracing::error!(error = %e, "Failed to retrieve cards");
            ServiceError::FetchFailed(e.to_string())
        })?;

        tracing::info!(count = cards.len(), "Retrieved cards");
        Ok(cards)
    }

    /// Retrieve a single card by id.
    pub fn get_card(&self, conn: &Connection, id: &Uuid) -> Result<Card, ServiceError> {
        tracing::debug!(card_id = %id, "Fetching card");
        match repository::get_card(conn, id) {
            Ok(Some(card)) => Ok(card),
            Ok(None) => {
                tracing::warn!(card_id = %id, "Card not found");
                Err(ServiceError::NotFound(*id))
            }
            Err(e) => {
                tracing::error!(card_id = %id, error = %e, "Failed to retrieve card");
                Err(ServiceError::FetchFailed(e.to_string()))
            }
        }
    }

    /// Create a new card from AI generation, optionally grounded in a PDF.
    pub fn create_card_from_ai(
        &self,
        conn: &Connection,
        request: &GenerationRequest,
    ) -> Result<Card, ServiceError> {
        CardGenerator::new(self.llm.as_ref(), &self.model, self.extractor.as_ref())
            .generate(conn, request)
    }

    /// Answer a question about a card's content.
    pub fn get_copilot_answer(
        &self,
        conn: &Connection,
        card_id: &Uuid,
        question: &str,
    ) -> Result<CopilotAnswer, ServiceError> {
        CardAssistant::new(self.llm.as_ref(), &self.model).copilot_answer(conn, card_id, question)
    }

    /// Analyze a card's content for potential bias.
    pub fn get_bias_analysis(
        &self,
        conn: &Connection,
        card_id: &Uuid,
    ) -> Result<BiasJudgment, ServiceError> {
        CardAssistant::new(self.llm.as_ref(), &self.model).bias_analysis(conn, card_id)
    }
}
