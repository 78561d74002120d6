use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted historical-event card.
///
/// Cards are create-only: once a draft passes structural validation and is
/// inserted, the record is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    /// Markdown body, at least 10 characters.
    pub description: String,
    /// Non-empty, ordered, every entry non-empty.
    pub keywords: Vec<String>,
    pub created_at: NaiveDateTime,
}

/// A validated card candidate, ready for insertion.
///
/// Only constructed by projecting model output that has already passed
/// `validate_card_structure`; the id and timestamp are assigned at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDraft {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}
