//! Reward eligibility rules.
//!
//! The engine gathers a [`TransferSnapshot`] inside the reward transaction
//! (after the party rows are locked) and hands it to [`check_transfer`]
//! together with the active game's [`RewardLimits`]. The checks run in a fixed
//! order so the first failing rule decides the user-facing reason.

use serde::Serialize;

use crate::types::BitrixId;

/// Why a like was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RewardRejection {
    #[error("No active game: likes cannot be sent right now")]
    NoActiveGame,

    #[error("You cannot send a like to yourself")]
    SelfTransfer,

    #[error("You have reached the like limit for this colleague in the current game")]
    PerRecipientCapExceeded,

    #[error("You have used up your likes for the current period")]
    PeriodCapExhausted,

    #[error("Sender not found")]
    SenderNotFound,

    #[error("Recipient not found")]
    RecipientNotFound,
}

impl RewardRejection {
    /// Stable machine-readable code for API consumers.
    pub fn code(self) -> &'static str {
        match self {
            RewardRejection::NoActiveGame => "NO_ACTIVE_GAME",
            RewardRejection::SelfTransfer => "SELF_TRANSFER",
            RewardRejection::PerRecipientCapExceeded => "PER_RECIPIENT_CAP",
            RewardRejection::PeriodCapExhausted => "PERIOD_CAP",
            RewardRejection::SenderNotFound | RewardRejection::RecipientNotFound => {
                "PARTY_NOT_FOUND"
            }
        }
    }

    /// `true` for the "bad reference" class, `false` for validation failures.
    pub fn is_not_found(self) -> bool {
        matches!(
            self,
            RewardRejection::SenderNotFound | RewardRejection::RecipientNotFound
        )
    }
}

/// Rate-limit settings of the active game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardLimits {
    /// Max likes a sender may send per period window.
    pub limit_value: i32,
    /// Max likes one sender may send to one recipient over the whole game.
    pub limit_to_one_user: i32,
}

/// Facts observed inside the reward transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSnapshot {
    pub sender_id: BitrixId,
    pub recipient_id: BitrixId,
    /// Likes already sent from sender to recipient in this game.
    pub sent_to_recipient: i64,
    /// Likes already sent by the sender inside the current period window.
    pub sent_in_period: i64,
    pub sender_exists: bool,
    pub recipient_exists: bool,
}

/// Evaluate every rule after "an active game exists".
pub fn check_transfer(
    limits: &RewardLimits,
    snapshot: &TransferSnapshot,
) -> Result<(), RewardRejection> {
    if snapshot.sender_id == snapshot.recipient_id {
        return Err(RewardRejection::SelfTransfer);
    }
    if snapshot.sent_to_recipient >= i64::from(limits.limit_to_one_user) {
        return Err(RewardRejection::PerRecipientCapExceeded);
    }
    if snapshot.sent_in_period >= i64::from(limits.limit_value) {
        return Err(RewardRejection::PeriodCapExhausted);
    }
    if !snapshot.sender_exists {
        return Err(RewardRejection::SenderNotFound);
    }
    if !snapshot.recipient_exists {
        return Err(RewardRejection::RecipientNotFound);
    }
    Ok(())
}

/// Likes the sender may still send in the current window.
pub fn remaining_likes(limits: &RewardLimits, sent_in_period: i64) -> i64 {
    (i64::from(limits.limit_value) - sent_in_period).max(0)
}

/// Per-employee summary for the active game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikesInfo {
    pub received_likes: i64,
    pub remaining_likes: i64,
    pub game_id: Option<i64>,
    pub game_name: Option<String>,
    pub has_active_game: bool,
}

impl LikesInfo {
    pub fn without_game() -> Self {
        Self {
            received_likes: 0,
            remaining_likes: 0,
            game_id: None,
            game_name: None,
            has_active_game: false,
        }
    }
}
