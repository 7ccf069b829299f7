//! Game window rules.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Grace period (seconds) applied past `game_end` when none is configured.
pub const DEFAULT_GAME_END_GRACE_SECS: i64 = 0;

/// Upper bound accepted for the grace period: one year.
pub const MAX_GAME_END_GRACE_SECS: i64 = 366 * 24 * 60 * 60;

/// Reject windows where the start is not strictly before the end.
pub fn validate_window(game_start: Timestamp, game_end: Timestamp) -> Result<(), CoreError> {
    if game_start >= game_end {
        return Err(CoreError::Validation(
            "Game start must be earlier than game end".into(),
        ));
    }
    Ok(())
}

/// Whether a game accepts likes at `now`.
///
/// Both bounds are inclusive: a like sent exactly at `game_end + grace` is
/// still accepted. A grace that overflows the calendar leaves the end open.
pub fn is_live(
    is_active: bool,
    game_start: Timestamp,
    game_end: Timestamp,
    now: Timestamp,
    grace: Duration,
) -> bool {
    let within_end = game_end
        .checked_add_signed(grace)
        .map_or(true, |end| now <= end);
    is_active && game_start <= now && within_end
}
