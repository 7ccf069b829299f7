//! Like (reward) transaction model.
//!
//! Like rows are immutable once created (no `updated_at`).

use serde::{Deserialize, Serialize};
use spasibka_core::employee::display_name;
use spasibka_core::types::{BitrixId, DbId, Timestamp};
use sqlx::FromRow;

/// Shown for a party whose employee row is missing.
const UNKNOWN_PARTY: &str = "Unknown";

/// A row from the `like_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LikeTransaction {
    pub id: DbId,
    pub from_bitrix_id: BitrixId,
    pub to_bitrix_id: BitrixId,
    pub game_id: DbId,
    pub message: Option<String>,
    pub sticker_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a like inside the reward transaction.
#[derive(Debug, Clone)]
pub struct CreateLikeTransaction<'a> {
    pub from_bitrix_id: BitrixId,
    pub to_bitrix_id: BitrixId,
    pub game_id: DbId,
    pub message: Option<&'a str>,
    pub sticker_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Like row joined with both parties' names.
#[derive(Debug, Clone, FromRow)]
pub struct LikeHistoryRow {
    pub id: DbId,
    pub created_at: Timestamp,
    pub from_bitrix_id: BitrixId,
    pub to_bitrix_id: BitrixId,
    pub message: Option<String>,
    pub sticker_id: Option<DbId>,
    pub from_name: Option<String>,
    pub from_lastname: Option<String>,
    pub to_name: Option<String>,
    pub to_lastname: Option<String>,
}

/// Direction of a like relative to the employee whose history is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeDirection {
    Sent,
    Received,
}

/// One entry of an employee's like history.
#[derive(Debug, Clone, Serialize)]
pub struct LikeHistoryEntry {
    pub id: DbId,
    pub date: Timestamp,
    pub direction: LikeDirection,
    pub from_bitrix_id: BitrixId,
    pub to_bitrix_id: BitrixId,
    pub message: Option<String>,
    pub sticker_id: Option<DbId>,
    pub from_user_name: String,
    pub to_user_name: String,
}

impl LikeHistoryEntry {
    pub fn from_row(row: LikeHistoryRow, viewer: BitrixId) -> Self {
        let direction = if row.from_bitrix_id == viewer {
            LikeDirection::Sent
        } else {
            LikeDirection::Received
        };
        Self {
            id: row.id,
            date: row.created_at,
            direction,
            from_bitrix_id: row.from_bitrix_id,
            to_bitrix_id: row.to_bitrix_id,
            message: row.message,
            sticker_id: row.sticker_id,
            from_user_name: party_name(row.from_lastname, row.from_name),
            to_user_name: party_name(row.to_lastname, row.to_name),
        }
    }
}

fn party_name(lastname: Option<String>, name: Option<String>) -> String {
    match (lastname, name) {
        (None, None) => UNKNOWN_PARTY.to_string(),
        (lastname, name) => display_name(
            lastname.as_deref().unwrap_or_default(),
            name.as_deref().unwrap_or_default(),
        ),
    }
}

/// Paginated like history.
#[derive(Debug, Clone, Serialize)]
pub struct LikeHistoryPage {
    pub likes: Vec<LikeHistoryEntry>,
    pub total: i64,
    pub total_pages: i64,
}
