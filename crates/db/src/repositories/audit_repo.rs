//! Repository for the append-only `employee_audit` table.

use spasibka_core::employee::FieldChange;
use spasibka_core::types::{BitrixId, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::audit::EmployeeAuditEntry;

/// Column list for `employee_audit` queries.
const COLUMNS: &str =
    "id, employee_id, field_name, old_value, new_value, changed_by_bitrix_id, created_at";

pub struct EmployeeAuditRepo;

impl EmployeeAuditRepo {
    /// Record one changed field. Runs inside the transaction of the edit.
    pub async fn insert(
        conn: &mut PgConnection,
        employee_id: DbId,
        change: &FieldChange,
        changed_by: BitrixId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO employee_audit \
                (employee_id, field_name, old_value, new_value, changed_by_bitrix_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(employee_id)
        .bind(change.field)
        .bind(&change.old_value)
        .bind(&change.new_value)
        .bind(changed_by)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Audit trail for one employee, newest first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<EmployeeAuditEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employee_audit \
             WHERE employee_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EmployeeAuditEntry>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
