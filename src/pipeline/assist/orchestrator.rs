use rusqlite::Connection;
use uuid::Uuid;

use super::prompt::{
    build_bias_prompt, build_copilot_prompt, BIAS_SYSTEM_PROMPT, COPILOT_SYSTEM_PROMPT,
};
use super::validate::validate_bias_response;
use crate::db::repository::get_card;
use crate::error::ServiceError;
use crate::llm::{parse_json_object, LlmClient};
use crate::models::{BiasJudgment, Card, CopilotAnswer};

/// Orchestrates the read-then-augment operations on existing cards:
/// copilot Q&A and bias analysis.
///
/// Both share the fetch step (`NotFound` on miss, `FetchFailed` on any other
/// lookup error). Unlike generation, all downstream failures — model call,
/// JSON extraction, and bias validation — collapse into `AssistFailed`: the
/// caller asked about an existing card, not for a structured artifact, so the
/// finer-grained kinds stay internal here.
pub struct CardAssistant<'a> {
    llm: &'a (dyn LlmClient + Send + Sync),
    model: &'a str,
}

impl<'a> CardAssistant<'a> {
    pub fn new(llm: &'a (dyn LlmClient + Send + Sync), model: &'a str) -> Self {
        Self { llm, model }
    }

    /// Answer a question about one card, using its description as context.
    pub fn copilot_answer(
        &self,
        conn: &Connection,
        card_id: &Uuid,
        question: &str,
    ) -> Result<CopilotAnswer, ServiceError> {
        tracing::info!(card_id = %card_id, question = %question, "Copilot request");
        let card = self.fetch_card(conn, card_id)?;

        let prompt = build_copilot_prompt(question, &card.description);
        let answer = self
            .llm
            .generate(self.model, &prompt, COPILOT_SYSTEM_PROMPT)
            .map_err(|e| {
                tracing::error!(card_id = %card_id, error = %e, "Copilot generation failed");
                ServiceError::AssistFailed(e.to_string())
            })?;

        tracing::info!(card_id = %card_id, "Copilot answer generated");
        Ok(CopilotAnswer { answer })
    }

    /// Score one card's description for bias.
    pub fn bias_analysis(
        &self,
        conn: &Connection,
        card_id: &Uuid,
    ) -> Result<BiasJudgment, ServiceError> {
        tracing::info!(card_id = %card_id, "Bias analysis request");
        let card = self.fetch_card(conn, card_id)?;

        let prompt = build_bias_prompt(&card.description);
        let response = self
            .llm
            .generate(self.model, &prompt, BIAS_SYSTEM_PROMPT)
            .map_err(|e| {
                tracing::error!(card_id = %card_id, error = %e, "Bias judge call failed");
                ServiceError::AssistFailed(e.to_string())
            })?;

        let data = parse_json_object(&response).map_err(|e| {
            tracing::error!(card_id = %card_id, error = %e, "Bias judge returned unusable output");
            ServiceError::AssistFailed(e.to_string())
        })?;

        let (bias_score, explanation) = validate_bias_response(&data).map_err(|e| {
            tracing::error!(card_id = %card_id, error = %e, "Bias response failed validation");
            ServiceError::AssistFailed(e.to_string())
        })?;

        tracing::info!(card_id = %card_id, bias_score, "Bias analysis completed");
        Ok(BiasJudgment {
            bias_score,
            explanation,
        })
    }

    fn fetch_card(&self, conn: &Connection, card_id: &Uuid) -> Result<Card, ServiceError> {
        match get_card(conn, card_id) {
            Ok(Some(card)) => Ok(card),
            Ok(None) => {
                tracing::warn!(card_id = %card_id, "Card not found");
                Err(ServiceError::NotFound(*card_id))
            }
            Err(e) => {
                tracing::error!(card_id = %card_id, error = %e, "Failed to fetch card");
                Err(ServiceError::FetchFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::insert_card;
    use crate::llm::MockLlmClient;
    use crate::models::CardDraft;

    const MODEL: &str = "llama3.1";

    fn seeded_card(conn: &Connection) -> Card {
        insert_card(
            conn,
            &CardDraft {
                title: "Suez Crisis".into(),
                description: "## Background\nThe 1956 crisis over the canal.".into(),
                keywords: vec!["Egypt".into(), "Suez".into()],
            },
        )
        .unwrap()
    }

    #[test]
    fn copilot_wraps_raw_answer() {
        let conn = open_memory_database().unwrap();
        let card = seeded_card(&conn);
        let llm = MockLlmClient::new("It happened in 1956.");
        let assistant = CardAssistant::new(&llm, MODEL);

        let answer = assistant
            .copilot_answer(&conn, &card.id, "When did this happen?")
            .unwrap();
        assert_eq!(answer.answer, "It happened in 1956.");
    }

    #[test]
    fn copilot_missing_card_is_not_found() {
        let conn = open_memory_database().unwrap();
        let llm = MockLlmClient::new("unreachable");
        let assistant = CardAssistant::new(&llm, MODEL);

        let err = assistant
            .copilot_answer(&conn, &Uuid::new_v4(), "When?")
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn copilot_model_failure_is_assist_failed() {
        let conn = open_memory_database().unwrap();
        let card = seeded_card(&conn);
        let llm = MockLlmClient::failing("timeout");
        let assistant = CardAssistant::new(&llm, MODEL);

        let err = assistant
            .copilot_answer(&conn, &card.id, "When?")
            .unwrap_err();
        assert!(matches!(err, ServiceError::AssistFailed(_)));
    }

    #[test]
    fn bias_analysis_returns_judgment() {
        let conn = open_memory_database().unwrap();
        let card = seeded_card(&conn);
        let llm = MockLlmClient::new(
            r#"{"bias_score": 55, "explanation": "This passage leans toward one side."}"#,
        );
        let assistant = CardAssistant::new(&llm, MODEL);

        let judgment = assistant.bias_analysis(&conn, &card.id).unwrap();
        assert_eq!(judgment.bias_score, 55.0);
        assert_eq!(judgment.explanation, "This passage leans toward one side.");
    }

    #[test]
    fn bias_validation_failure_collapses_to_assist_failed() {
        let conn = open_memory_database().unwrap();
        let card = seeded_card(&conn);
        let llm = MockLlmClient::new(r#"{"bias_score": 120.0, "explanation": "Out of range score."}"#);
        let assistant = CardAssistant::new(&llm, MODEL);

        let err = assistant.bias_analysis(&conn, &card.id).unwrap_err();
        assert!(matches!(err, ServiceError::AssistFailed(_)));
    }

    #[test]
    fn bias_non_json_output_collapses_to_assist_failed() {
        let conn = open_memory_database().unwrap();
        let card = seeded_card(&conn);
        let llm = MockLlmClient::new("The content seems fairly neutral to me.");
        let assistant = CardAssistant::new(&llm, MODEL);

        let err = assistant.bias_analysis(&conn, &card.id).unwrap_err();
        assert!(matches!(err, ServiceError::AssistFailed(_)));
    }

    #[test]
    fn bias_missing_card_is_not_found() {
        let conn = open_memory_database().unwrap();
        let llm = MockLlmClient::new("unreachable");
        let assistant = CardAssistant::new(&llm, MODEL);

        let err = assistant.bias_analysis(&conn, &Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
