//! Caller extractor.
//!
//! The app runs inside the Bitrix24 portal frame, which supplies the current
//! user's Bitrix id on every request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use spasibka_core::types::BitrixId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's Bitrix24 user id.
pub const ACTOR_HEADER: &str = "x-bitrix-user-id";

/// The employee making the request.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub bitrix_id: BitrixId,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing X-Bitrix-User-Id header".into()))?;

        let bitrix_id = raw
            .trim()
            .parse::<BitrixId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Unauthorized("Invalid X-Bitrix-User-Id header".into()))?;

        Ok(Actor { bitrix_id })
    }
}
