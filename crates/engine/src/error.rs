//! Engine error type.

use spasibka_core::eligibility::RewardRejection;
use spasibka_core::error::CoreError;
use spasibka_core::purchase::PurchaseRejection;
use spasibka_events::BitrixError;

/// Business rejections are kept apart from infrastructure failures so the
/// routing layer can report the former verbatim and hide the latter.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Reward(#[from] RewardRejection),

    #[error(transparent)]
    Purchase(#[from] PurchaseRejection),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The identity provider could not be reached or refused the call.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<BitrixError> for EngineError {
    fn from(err: BitrixError) -> Self {
        EngineError::Upstream(err.to_string())
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EngineError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        EngineError::Core(CoreError::NotFound { entity, id })
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        EngineError::Core(CoreError::Conflict(message.into()))
    }
}
