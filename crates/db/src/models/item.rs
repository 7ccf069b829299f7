//! Catalog item model and DTOs.

use serde::{Deserialize, Serialize};
use spasibka_core::types::{Coins, DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: Coins,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a catalog item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100000000))]
    pub price: Coins,
    #[serde(default)]
    #[validate(range(min = 0, max = 1000000))]
    pub stock: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for updating a catalog item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, deserialize_with = "super::deserialize_present")]
    #[validate(length(max = 500))]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0, max = 100000000))]
    pub price: Option<Coins>,
    #[validate(range(min = 0, max = 1000000))]
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}
