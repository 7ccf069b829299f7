//! Reward Eligibility Engine and reward commit.
//!
//! A like is checked and written inside one transaction:
//!
//! 1. Resolve the active game (share-locking its row).
//! 2. Lock both party rows in ascending `bitrix_id` order.
//! 3. Count existing likes and evaluate [`check_transfer`].
//! 4. Credit the recipient and insert the like row.
//!
//! Locking the sender row serializes concurrent likes from one sender, so the
//! counts in step 3 cannot go stale before the insert in step 4.

use serde::{Deserialize, Serialize};
use spasibka_core::eligibility::{
    check_transfer, remaining_likes, LikesInfo, RewardRejection, TransferSnapshot,
};
use spasibka_core::pagination::{clamp_limit, clamp_offset, total_pages};
use spasibka_core::period::window_start;
use spasibka_core::types::{BitrixId, Coins, DbId, Timestamp};
use spasibka_db::models::like_transaction::{
    CreateLikeTransaction, LikeHistoryEntry, LikeHistoryPage,
};
use spasibka_db::repositories::{EmployeeRepo, LikeTransactionRepo};
use spasibka_events::bus::{PlatformEvent, RewardSent};
use validator::Validate;

use crate::resolver::{resolve_active_game, resolve_active_game_locked};
use crate::{Engine, EngineError};

/// Default page size for like history.
const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Maximum page size for like history.
const MAX_HISTORY_LIMIT: i64 = 100;

/// A proposed like.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RewardRequest {
    #[validate(range(min = 1))]
    pub sender_id: BitrixId,
    #[validate(range(min = 1))]
    pub recipient_id: BitrixId,
    #[validate(length(max = 280))]
    pub message: Option<String>,
    pub sticker_id: Option<DbId>,
}

/// Outcome of a committed like.
#[derive(Debug, Clone, Serialize)]
pub struct RewardReceipt {
    pub transaction_id: DbId,
    pub sender_id: BitrixId,
    pub recipient_id: BitrixId,
    pub game_id: DbId,
    pub coins_credited: Coins,
    pub created_at: Timestamp,
}

impl Engine {
    /// Validate and commit one like at `now`.
    pub async fn submit_reward(
        &self,
        request: &RewardRequest,
        now: Timestamp,
    ) -> Result<RewardReceipt, EngineError> {
        request.validate()?;
        let sender = request.sender_id;
        let recipient = request.recipient_id;

        let mut tx = self.pool.begin().await?;

        let game = resolve_active_game_locked(&mut tx, now, self.policy.game_end_grace)
            .await?
            .ok_or(RewardRejection::NoActiveGame)?;

        let parties = EmployeeRepo::lock_many(&mut tx, &[sender, recipient]).await?;
        let sender_row = parties.iter().find(|e| e.bitrix_id == sender);
        let recipient_exists = parties.iter().any(|e| e.bitrix_id == recipient);

        let sent_to_recipient =
            LikeTransactionRepo::count_between(&mut *tx, game.id, sender, recipient).await?;
        let since = window_start(game.limit_parameter, now);
        let sent_in_period =
            LikeTransactionRepo::count_sent_since(&mut *tx, game.id, sender, since).await?;

        let snapshot = TransferSnapshot {
            sender_id: sender,
            recipient_id: recipient,
            sent_to_recipient,
            sent_in_period,
            sender_exists: sender_row.is_some(),
            recipient_exists,
        };
        if let Err(rejection) = check_transfer(&game.limits(), &snapshot) {
            tracing::debug!(
                sender_id = sender,
                recipient_id = recipient,
                game_id = game.id,
                reason = rejection.code(),
                "Like rejected"
            );
            return Err(rejection.into());
        }
        let sender_name = sender_row.map(|e| e.display_name()).unwrap_or_default();

        let coins = self.policy.coins_per_like;
        EmployeeRepo::credit_reward(&mut tx, recipient, coins).await?;
        let like = LikeTransactionRepo::insert(
            &mut tx,
            &CreateLikeTransaction {
                from_bitrix_id: sender,
                to_bitrix_id: recipient,
                game_id: game.id,
                message: request.message.as_deref(),
                sticker_id: request.sticker_id,
                created_at: now,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            like_id = like.id,
            sender_id = sender,
            recipient_id = recipient,
            game_id = game.id,
            coins,
            "Like committed"
        );

        self.event_bus.publish(PlatformEvent::RewardSent(RewardSent {
            like_id: like.id,
            game_id: game.id,
            sender_id: sender,
            sender_name,
            recipient_id: recipient,
            message: like.message.clone(),
            coins,
            created_at: like.created_at,
        }));

        Ok(RewardReceipt {
            transaction_id: like.id,
            sender_id: sender,
            recipient_id: recipient,
            game_id: game.id,
            coins_credited: coins,
            created_at: like.created_at,
        })
    }

    /// Received / remaining likes of one employee in the active game.
    pub async fn likes_info(
        &self,
        bitrix_id: BitrixId,
        now: Timestamp,
    ) -> Result<LikesInfo, EngineError> {
        let Some(game) = resolve_active_game(&self.pool, now, self.policy.game_end_grace).await?
        else {
            return Ok(LikesInfo::without_game());
        };

        let since = window_start(game.limit_parameter, now);
        let sent = LikeTransactionRepo::count_sent_since(&self.pool, game.id, bitrix_id, since)
            .await?;
        let received = LikeTransactionRepo::count_received(&self.pool, game.id, bitrix_id).await?;

        Ok(LikesInfo {
            received_likes: received,
            remaining_likes: remaining_likes(&game.limits(), sent),
            game_id: Some(game.id),
            game_name: Some(game.name),
            has_active_game: true,
        })
    }

    /// Sent and received likes of one employee across every game.
    pub async fn like_history(
        &self,
        bitrix_id: BitrixId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<LikeHistoryPage, EngineError> {
        let limit = clamp_limit(limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
        let offset = clamp_offset(offset);

        let rows = LikeTransactionRepo::history(&self.pool, bitrix_id, limit, offset).await?;
        let total = LikeTransactionRepo::count_history(&self.pool, bitrix_id).await?;

        Ok(LikeHistoryPage {
            likes: rows
                .into_iter()
                .map(|row| LikeHistoryEntry::from_row(row, bitrix_id))
                .collect(),
            total,
            total_pages: history_pages(total, limit),
        })
    }
}

/// History listings always report at least one page.
pub(crate) fn history_pages(total: i64, limit: i64) -> i64 {
    total_pages(total, limit).max(1)
}
