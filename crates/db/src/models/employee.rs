//! Employee entity model and DTOs.

use serde::{Deserialize, Serialize};
use spasibka_core::employee::display_name;
use spasibka_core::types::{BitrixId, Coins, DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub bitrix_id: BitrixId,
    pub name: String,
    pub lastname: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    /// Lifetime received likes.
    pub likes: i32,
    pub coins: Coins,
    pub is_gamer: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    pub fn display_name(&self) -> String {
        display_name(&self.lastname, &self.name)
    }
}

/// Roster fields supplied by the identity provider. Upserted by `bitrix_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertEmployee {
    pub bitrix_id: BitrixId,
    pub name: String,
    pub lastname: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Admin patch. Only these fields are editable; every change is audited.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(range(min = 0, max = 1000000000))]
    pub coins: Option<Coins>,
    pub is_gamer: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Query parameters for listing employees.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub only_gamers: bool,
    /// `None` returns every employee.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
