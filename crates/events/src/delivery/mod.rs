//! Outbound notification channels.

pub mod bitrix;

use async_trait::async_trait;
use spasibka_core::types::BitrixId;

use self::bitrix::BitrixError;

/// Sends a short text notification to one employee.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: BitrixId, text: &str) -> Result<(), BitrixError>;
}
