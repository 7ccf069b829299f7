//! Game entity model and DTOs.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use spasibka_core::eligibility::RewardLimits;
use spasibka_core::game::is_live;
use spasibka_core::period::LimitParameter;
use spasibka_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub game_start: Timestamp,
    pub game_end: Timestamp,
    pub game_is_active: bool,
    #[sqlx(try_from = "String")]
    pub limit_parameter: LimitParameter,
    pub limit_value: i32,
    pub limit_to_one_user: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Game {
    pub fn limits(&self) -> RewardLimits {
        RewardLimits {
            limit_value: self.limit_value,
            limit_to_one_user: self.limit_to_one_user,
        }
    }

    /// Whether likes are accepted at `now` with the given end-of-game grace.
    pub fn is_live_at(&self, now: Timestamp, grace: Duration) -> bool {
        is_live(self.game_is_active, self.game_start, self.game_end, now, grace)
    }
}

/// DTO for creating a game.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub game_start: Timestamp,
    pub game_end: Timestamp,
    #[serde(default)]
    pub game_is_active: bool,
    pub limit_parameter: LimitParameter,
    #[serde(default = "default_limit_value")]
    #[validate(range(min = 1, max = 1000))]
    pub limit_value: i32,
    #[serde(default = "default_limit_to_one_user")]
    #[validate(range(min = 1, max = 100))]
    pub limit_to_one_user: i32,
}

fn default_limit_value() -> i32 {
    1
}

fn default_limit_to_one_user() -> i32 {
    2
}

/// DTO for updating a game. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGame {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, deserialize_with = "super::deserialize_present")]
    #[validate(length(max = 500))]
    pub description: Option<Option<String>>,
    pub game_start: Option<Timestamp>,
    pub game_end: Option<Timestamp>,
    pub game_is_active: Option<bool>,
    pub limit_parameter: Option<LimitParameter>,
    #[validate(range(min = 1, max = 1000))]
    pub limit_value: Option<i32>,
    #[validate(range(min = 1, max = 100))]
    pub limit_to_one_user: Option<i32>,
}

impl UpdateGame {
    /// Merge the patch onto the stored row, producing the values to write.
    pub fn apply_to(&self, game: &Game) -> CreateGame {
        CreateGame {
            name: self.name.clone().unwrap_or_else(|| game.name.clone()),
            description: match &self.description {
                Some(description) => description.clone(),
                None => game.description.clone(),
            },
            game_start: self.game_start.unwrap_or(game.game_start),
            game_end: self.game_end.unwrap_or(game.game_end),
            game_is_active: self.game_is_active.unwrap_or(game.game_is_active),
            limit_parameter: self.limit_parameter.unwrap_or(game.limit_parameter),
            limit_value: self.limit_value.unwrap_or(game.limit_value),
            limit_to_one_user: self.limit_to_one_user.unwrap_or(game.limit_to_one_user),
        }
    }
}

/// Query parameters for listing games.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameListQuery {
    /// `None` lists every game.
    pub is_active: Option<bool>,
}
