//! Employee directory seam used by roster sync.

use async_trait::async_trait;
use serde::Deserialize;
use spasibka_core::types::BitrixId;

use crate::delivery::bitrix::BitrixError;

/// One active employee as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub bitrix_id: BitrixId,
    pub name: String,
    pub lastname: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub photo_url: Option<String>,
}

/// Lists every active employee.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<RosterEntry>, BitrixError>;
}

/// Raw `user.get` record. Bitrix24 encodes every scalar as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct BitrixUser {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub work_position: Option<String>,
    #[serde(default)]
    pub personal_photo: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl BitrixUser {
    /// `None` when the record carries no usable numeric id.
    pub(crate) fn into_entry(self) -> Option<RosterEntry> {
        let bitrix_id = self.id?.trim().parse::<BitrixId>().ok()?;
        Some(RosterEntry {
            bitrix_id,
            name: self.name.unwrap_or_default(),
            lastname: self.last_name.unwrap_or_default(),
            email: non_empty(self.email),
            position: non_empty(self.work_position),
            photo_url: non_empty(self.personal_photo),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_string_id_and_blank_fields() {
        let raw: BitrixUser = serde_json::from_value(json!({
            "ID": "17",
            "NAME": "Anna",
            "LAST_NAME": "Petrova",
            "EMAIL": "",
            "WORK_POSITION": "QA",
        }))
        .unwrap();
        let entry = raw.into_entry().unwrap();
        assert_eq!(entry.bitrix_id, 17);
        assert_eq!(entry.lastname, "Petrova");
        assert_eq!(entry.email, None);
        assert_eq!(entry.position.as_deref(), Some("QA"));
        assert_eq!(entry.photo_url, None);
    }

    #[test]
    fn record_without_id_is_skipped() {
        let raw: BitrixUser = serde_json::from_value(json!({"NAME": "Ghost"})).unwrap();
        assert!(raw.into_entry().is_none());

        let raw: BitrixUser = serde_json::from_value(json!({"ID": "abc"})).unwrap();
        assert!(raw.into_entry().is_none());
    }
}
