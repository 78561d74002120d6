use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Card, CardDraft};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Insert a validated draft and return the persisted card.
///
/// Create-only: id and creation timestamp are assigned here, the row is
/// never updated afterwards.
pub fn insert_card(conn: &Connection, draft: &CardDraft) -> Result<Card, DatabaseError> {
    let card = Card {
        id: Uuid::new_v4(),
        title: draft.title.clone(),
        description: draft.description.clone(),
        keywords: draft.keywords.clone(),
        created_at: Utc::now().naive_utc(),
    };

    let keywords_json = serde_json::to_string(&card.keywords).map_err(|e| {
        DatabaseError::CorruptValue {
            field: "keywords".into(),
            value: e.to_string(),
        }
    })?;

    conn.execute(
        "INSERT INTO cards (id, title, description, keywords, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            card.id.to_string(),
            card.title,
            card.description,
            keywords_json,
            card.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    Ok(card)
}

/// Fetch a single card by id. `Ok(None)` when the id does not exist.
pub fn get_card(conn: &Connection, id: &Uuid) -> Result<Option<Card>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, keywords, created_at FROM cards WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(CardRow {
            id: row.get::<_, String>(0)?,
            title: row.get::<_, String>(1)?,
            description: row.get::<_, String>(2)?,
            keywords: row.get::<_, String>(3)?,
            created_at: row.get::<_, String>(4)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(card_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List cards, optionally filtered by a case-insensitive title substring,
/// newest first with an id tiebreak for stable paging.
pub fn list_cards(
    conn: &Connection,
    title_filter: Option<&str>,
    offset: u32,
    limit: u32,
) -> Result<Vec<Card>, DatabaseError> {
    let mut cards = Vec::new();

    match title_filter {
        Some(filter) => {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, keywords, created_at FROM cards
                 WHERE title LIKE '%' || ?1 || '%'
                 ORDER BY created_at DESC, id LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt.query_map(params![filter, limit, offset], map_card_row)?;
            for row in rows {
                cards.push(card_from_row(row?)?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, keywords, created_at FROM cards
                 ORDER BY created_at DESC, id LIMIT ?1 OFFSET ?2",
            )?;
            let rows = stmt.query_map(params![limit, offset], map_card_row)?;
            for row in rows {
                cards.push(card_from_row(row?)?);
            }
        }
    }

    Ok(cards)
}

struct CardRow {
    id: String,
    title: String,
    description: String,
    keywords: String,
    created_at: String,
}

fn map_card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        keywords: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn card_from_row(row: CardRow) -> Result<Card, DatabaseError> {
    let id = Uuid::parse_str(&row.id).map_err(|_| DatabaseError::CorruptValue {
        field: "id".into(),
        value: row.id.clone(),
    })?;

    let keywords: Vec<String> =
        serde_json::from_str(&row.keywords).map_err(|_| DatabaseError::CorruptValue {
            field: "keywords".into(),
            value: row.keywords.clone(),
        })?;

    let created_at = NaiveDateTime::parse_from_str(&row.created_at, TIMESTAMP_FORMAT)
        .map_err(|_| DatabaseError::CorruptValue {
            field: "created_at".into(),
            value: row.created_at.clone(),
        })?;

    Ok(Card {
        id,
        title: row.title,
        description: row.description,
        keywords,
        created_at,
    })
}
