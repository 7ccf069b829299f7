//! Leaderboard read models.

use serde::Serialize;
use spasibka_core::employee::display_name;
use spasibka_core::types::BitrixId;
use sqlx::FromRow;

/// Aggregated counts for one employee, straight from SQL.
#[derive(Debug, Clone, FromRow)]
pub struct RatingRow {
    pub bitrix_id: BitrixId,
    pub name: String,
    pub lastname: String,
    pub received: i64,
    pub sent: i64,
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingEntry {
    pub bitrix_id: BitrixId,
    pub name: String,
    pub received: i64,
    pub sent: i64,
}

impl From<RatingRow> for RatingEntry {
    fn from(row: RatingRow) -> Self {
        Self {
            bitrix_id: row.bitrix_id,
            name: display_name(&row.lastname, &row.name),
            received: row.received,
            sent: row.sent,
        }
    }
}

/// One page of the all-games leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct RatingPage {
    pub items: Vec<RatingEntry>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}
