//! Employee audit trail model.
//!
//! Audit rows have no `updated_at` field (immutable records).

use serde::Serialize;
use spasibka_core::types::{BitrixId, DbId, Timestamp};
use sqlx::FromRow;

/// One changed field of an admin edit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeAuditEntry {
    pub id: DbId,
    pub employee_id: DbId,
    pub field_name: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub changed_by_bitrix_id: BitrixId,
    pub created_at: Timestamp,
}
