//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create / update DTOs where the entity is admin-editable
//! - Read-model rows for joined or aggregated queries

pub mod audit;
pub mod buy_transaction;
pub mod employee;
pub mod game;
pub mod item;
pub mod like_transaction;
pub mod rating;

use serde::{Deserialize, Deserializer};

/// For `Option<Option<T>>` patch fields: a present `null` becomes
/// `Some(None)` (clear), an absent field stays `None` (keep).
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
