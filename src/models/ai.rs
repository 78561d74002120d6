use serde::{Deserialize, Serialize};

/// Input bundle for AI card generation. Not persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Event or topic title the card should cover.
    pub title: String,
    /// Perspective/instructions for the model.
    pub system_prompt: String,
    /// Specific aspects the card must address.
    pub topics_to_cover: String,
    /// Optional PDF whose text is used as additional context.
    pub document: Option<Vec<u8>>,
}

/// Result of a bias judgment over a card's description.
///
/// Never handed to a caller unless the score is within [0.0, 100.0] and the
/// explanation is at least 10 characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasJudgment {
    pub bias_score: f64,
    pub explanation: String,
}

/// Answer produced by the copilot for a question about one card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotAnswer {
    pub answer: String,
}
