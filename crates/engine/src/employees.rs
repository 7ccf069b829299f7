//! Employee reads and the audited admin edit.

use spasibka_core::employee::{record_change, FieldChange};
use spasibka_core::error::CoreError;
use spasibka_core::types::BitrixId;
use spasibka_db::models::audit::EmployeeAuditEntry;
use spasibka_db::models::employee::{Employee, EmployeeListQuery, UpdateEmployee};
use spasibka_db::repositories::{EmployeeAuditRepo, EmployeeRepo};
use validator::Validate;

use crate::{Engine, EngineError};

/// Upper bound on an explicit employee page size.
const MAX_LIST_LIMIT: i64 = 1000;

impl Engine {
    pub async fn get_employee(&self, bitrix_id: BitrixId) -> Result<Employee, EngineError> {
        EmployeeRepo::find_by_bitrix_id(&self.pool, bitrix_id)
            .await?
            .ok_or_else(|| EngineError::not_found("employee", bitrix_id))
    }

    pub async fn list_employees(
        &self,
        params: &EmployeeListQuery,
    ) -> Result<Vec<Employee>, EngineError> {
        let params = EmployeeListQuery {
            limit: params.limit.map(|l| l.clamp(1, MAX_LIST_LIMIT)),
            ..params.clone()
        };
        Ok(EmployeeRepo::list(&self.pool, &params).await?)
    }

    /// Apply an admin edit. Each changed field gets its own audit row, written
    /// in the same transaction as the update.
    pub async fn update_employee(
        &self,
        actor: BitrixId,
        target: BitrixId,
        patch: &UpdateEmployee,
    ) -> Result<Employee, EngineError> {
        patch.validate()?;

        let mut tx = self.pool.begin().await?;

        let current = EmployeeRepo::lock_one(&mut tx, target)
            .await?
            .ok_or_else(|| EngineError::not_found("employee", target))?;
        let is_admin = if actor == target {
            current.is_admin
        } else {
            EmployeeRepo::find_by_bitrix_id(&mut *tx, actor)
                .await?
                .is_some_and(|e| e.is_admin)
        };
        if !is_admin {
            return Err(
                CoreError::Forbidden("Only administrators can edit employees".into()).into(),
            );
        }

        let changes = diff(&current, patch);
        if changes.is_empty() {
            return Ok(current);
        }

        let mut updated = current.clone();
        if let Some(name) = &patch.name {
            updated.name.clone_from(name);
        }
        if let Some(lastname) = &patch.lastname {
            updated.lastname.clone_from(lastname);
        }
        updated.coins = patch.coins.unwrap_or(current.coins);
        updated.is_gamer = patch.is_gamer.unwrap_or(current.is_gamer);
        updated.is_admin = patch.is_admin.unwrap_or(current.is_admin);

        let saved = EmployeeRepo::update_admin_fields(&mut tx, &updated).await?;
        for change in &changes {
            EmployeeAuditRepo::insert(&mut tx, current.id, change, actor).await?;
        }
        tx.commit().await?;

        tracing::info!(
            target_id = target,
            actor_id = actor,
            fields = changes.len(),
            "Employee updated"
        );
        Ok(saved)
    }

    /// Audit trail of one employee, newest first.
    pub async fn employee_audit(
        &self,
        bitrix_id: BitrixId,
    ) -> Result<Vec<EmployeeAuditEntry>, EngineError> {
        let employee = self.get_employee(bitrix_id).await?;
        Ok(EmployeeAuditRepo::list_for_employee(&self.pool, employee.id).await?)
    }
}

fn diff(current: &Employee, patch: &UpdateEmployee) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    record_change(&mut changes, "name", &current.name, patch.name.as_ref());
    record_change(&mut changes, "lastname", &current.lastname, patch.lastname.as_ref());
    record_change(&mut changes, "coins", &current.coins, patch.coins.as_ref());
    record_change(&mut changes, "is_gamer", &current.is_gamer, patch.is_gamer.as_ref());
    record_change(&mut changes, "is_admin", &current.is_admin, patch.is_admin.as_ref());
    changes
}
