//! Rate-limit windows for the per-sender period cap.
//!
//! A game's [`LimitParameter`] decides how far back the sender's like count
//! reaches. [`window_start`] turns the parameter and the current instant into
//! the inclusive lower bound used by the count query; `None` means the count
//! spans the whole game.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Reset window of the per-sender cap.
///
/// Stored as lowercase text (`day`, `week`, `month`, `game`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitParameter {
    Day,
    Week,
    Month,
    #[serde(rename = "game")]
    WholeGame,
}

impl LimitParameter {
    pub const ALL: [LimitParameter; 4] = [
        LimitParameter::Day,
        LimitParameter::Week,
        LimitParameter::Month,
        LimitParameter::WholeGame,
    ];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            LimitParameter::Day => "day",
            LimitParameter::Week => "week",
            LimitParameter::Month => "month",
            LimitParameter::WholeGame => "game",
        }
    }
}

impl fmt::Display for LimitParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimitParameter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LimitParameter::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown limit parameter '{s}'. Expected one of: day, week, month, game"
                ))
            })
    }
}

impl TryFrom<String> for LimitParameter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inclusive lower bound of the counting window for `parameter` at `now`.
///
/// - `Day`: midnight of the current UTC day.
/// - `Week`: midnight of the Monday of the current ISO week.
/// - `Month`: midnight of the first day of the current month.
/// - `WholeGame`: no lower bound.
pub fn window_start(parameter: LimitParameter, now: Timestamp) -> Option<Timestamp> {
    let today = now.date_naive();
    let first_day = match parameter {
        LimitParameter::Day => today,
        LimitParameter::Week => {
            today - Days::new(u64::from(now.weekday().num_days_from_monday()))
        }
        LimitParameter::Month => today - Days::new(u64::from(now.day0())),
        LimitParameter::WholeGame => return None,
    };
    Some(first_day.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn day_window_starts_at_midnight() {
        let now = at(2025, 3, 12, 15, 42);
        assert_eq!(
            window_start(LimitParameter::Day, now),
            Some(at(2025, 3, 12, 0, 0))
        );
    }

    #[test]
    fn week_window_starts_on_monday() {
        // 2025-03-12 is a Wednesday.
        let now = at(2025, 3, 12, 9, 0);
        assert_eq!(
            window_start(LimitParameter::Week, now),
            Some(at(2025, 3, 10, 0, 0))
        );
    }

    #[test]
    fn week_window_on_monday_is_same_day() {
        let now = at(2025, 3, 10, 23, 59);
        assert_eq!(
            window_start(LimitParameter::Week, now),
            Some(at(2025, 3, 10, 0, 0))
        );
    }

    #[test]
    fn week_window_crosses_month_boundary() {
        // 2025-10-01 is a Wednesday; its Monday is 2025-09-29.
        let now = at(2025, 10, 1, 8, 0);
        assert_eq!(
            window_start(LimitParameter::Week, now),
            Some(at(2025, 9, 29, 0, 0))
        );
    }

    #[test]
    fn month_window_starts_on_first() {
        let now = at(2024, 2, 29, 18, 30);
        assert_eq!(
            window_start(LimitParameter::Month, now),
            Some(at(2024, 2, 1, 0, 0))
        );
    }

    #[test]
    fn whole_game_has_no_lower_bound() {
        assert_eq!(window_start(LimitParameter::WholeGame, at(2025, 1, 1, 0, 0)), None);
    }

    #[test]
    fn parses_all_variants() {
        for p in LimitParameter::ALL {
            assert_eq!(p.as_str().parse::<LimitParameter>().unwrap(), p);
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        assert_matches!(
            "fortnight".parse::<LimitParameter>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&LimitParameter::WholeGame).unwrap();
        assert_eq!(json, "\"game\"");
        let parsed: LimitParameter = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(parsed, LimitParameter::Week);
    }
}
