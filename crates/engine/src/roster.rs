//! Employee roster sync.
//!
//! Upserts every employee reported by the [`RosterProvider`] by `bitrix_id`.
//! Nobody is ever deleted. The first employee inserted into an empty table
//! becomes an administrator; new employees join as gamers.
//!
//! Rows are upserted in ascending `bitrix_id`, the same order rewards lock
//! employees in, so a sync never deadlocks with concurrent rewards.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use spasibka_db::models::employee::UpsertEmployee;
use spasibka_db::repositories::employee_repo::UpsertOutcome;
use spasibka_db::repositories::EmployeeRepo;
use spasibka_events::{RosterEntry, RosterProvider};
use tokio_util::sync::CancellationToken;

use crate::{Engine, EngineError};

/// Counts from one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterSyncReport {
    pub processed: usize,
    pub inserted: usize,
}

fn to_upsert(entry: RosterEntry) -> UpsertEmployee {
    UpsertEmployee {
        bitrix_id: entry.bitrix_id,
        name: entry.name,
        lastname: entry.lastname,
        position: entry.position,
        email: entry.email,
        photo_url: entry.photo_url,
    }
}

/// Order by `bitrix_id` and keep the first record reported for each id.
fn sort_roster(entries: &mut Vec<RosterEntry>) {
    entries.sort_by_key(|entry| entry.bitrix_id);
    entries.dedup_by_key(|entry| entry.bitrix_id);
}

impl Engine {
    /// Pull the roster and upsert it in one transaction.
    pub async fn sync_roster(
        &self,
        provider: &dyn RosterProvider,
    ) -> Result<RosterSyncReport, EngineError> {
        let mut entries = provider.list_employees().await?;
        sort_roster(&mut entries);

        let mut tx = self.pool.begin().await?;
        EmployeeRepo::acquire_roster_lock(&mut tx).await?;
        let mut table_empty = EmployeeRepo::count(&mut *tx).await? == 0;

        let mut report = RosterSyncReport::default();
        for entry in entries {
            let input = to_upsert(entry);
            let outcome = EmployeeRepo::upsert_from_roster(&mut tx, &input, table_empty).await?;
            if outcome == UpsertOutcome::Inserted {
                if table_empty {
                    tracing::info!(bitrix_id = input.bitrix_id, "First employee granted admin");
                }
                table_empty = false;
                report.inserted += 1;
            }
            report.processed += 1;
        }
        tx.commit().await?;

        tracing::info!(
            processed = report.processed,
            inserted = report.inserted,
            "Roster synced"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// RosterSyncScheduler
// ---------------------------------------------------------------------------

/// Background task re-syncing the roster on a fixed interval.
pub struct RosterSyncScheduler {
    engine: Engine,
    provider: Arc<dyn RosterProvider>,
    interval: Duration,
}

impl RosterSyncScheduler {
    pub fn new(engine: Engine, provider: Arc<dyn RosterProvider>, interval: Duration) -> Self {
        Self {
            engine,
            provider,
            interval,
        }
    }

    /// Run until the cancellation token is triggered. The first sync happens
    /// immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        tracing::info!(interval_secs = self.interval.as_secs(), "Roster sync scheduler started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Roster sync scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.engine.sync_roster(self.provider.as_ref()).await {
                        tracing::error!(error = %e, "Roster sync failed");
                    }
                }
            }
        }
    }
}
