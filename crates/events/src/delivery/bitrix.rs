//! Bitrix24 REST client over an inbound webhook.
//!
//! Every call is a POST to `{base_url}/{method}.json` with a JSON body. The
//! same client serves notifications (`im.notify.system.add`) and roster
//! listing (`user.get`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use spasibka_core::types::BitrixId;

use super::Notifier;
use crate::roster::{BitrixUser, RosterEntry, RosterProvider};

/// Retry delays for notifications (exponential backoff: 1s, 2s).
const RETRY_DELAYS_SECS: [u64; 2] = [1, 2];

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `user.get` returns at most this many records per call.
const USER_PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BitrixError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The portal returned a non-2xx status code.
    #[error("Bitrix24 returned HTTP {0}")]
    HttpStatus(u16),

    /// The portal answered with an `error` object.
    #[error("Bitrix24 error {code}: {description}")]
    Api { code: String, description: String },

    /// The `result` payload did not have the expected shape.
    #[error("Unexpected {method} payload: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

// ---------------------------------------------------------------------------
// BitrixClient
// ---------------------------------------------------------------------------

pub struct BitrixClient {
    client: reqwest::Client,
    base_url: String,
    retry_delays: Vec<Duration>,
}

impl BitrixClient {
    /// Build a client for the webhook at `base_url`
    /// (e.g. `https://portal.bitrix24.ru/rest/1/secret`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, BitrixError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_delays: RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        })
    }

    /// Override the notification retry schedule.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Invoke a REST method and return its `result` field.
    pub async fn call(&self, method: &str, params: &Value) -> Result<Value, BitrixError> {
        let url = format!("{}/{method}.json", self.base_url);
        let response = self.client.post(&url).json(params).send().await?;
        let status = response.status();
        let envelope: Option<Envelope> = response.json().await.ok();

        if let Some(Envelope {
            error: Some(code),
            error_description,
            ..
        }) = envelope
        {
            return Err(BitrixError::Api {
                code,
                description: error_description.unwrap_or_default(),
            });
        }
        if !status.is_success() {
            return Err(BitrixError::HttpStatus(status.as_u16()));
        }
        Ok(envelope.and_then(|e| e.result).unwrap_or(Value::Null))
    }

    async fn send_notification(&self, recipient: BitrixId, text: &str) -> Result<(), BitrixError> {
        self.call(
            "im.notify.system.add",
            &json!({ "USER_ID": recipient, "MESSAGE": text }),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for BitrixClient {
    /// Retries on failure, then gives up and returns the last error.
    async fn notify(&self, recipient: BitrixId, text: &str) -> Result<(), BitrixError> {
        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.send_notification(recipient, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        recipient,
                        error = %e,
                        "Notification attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }
        self.send_notification(recipient, text).await
    }
}

#[async_trait]
impl RosterProvider for BitrixClient {
    async fn list_employees(&self) -> Result<Vec<RosterEntry>, BitrixError> {
        let mut entries = Vec::new();
        let mut start = 0usize;

        loop {
            let result = self
                .call(
                    "user.get",
                    &json!({ "start": start, "ACTIVE": true, "USER_TYPE": "employee" }),
                )
                .await?;
            let batch: Vec<BitrixUser> = match result {
                Value::Null => Vec::new(),
                page => serde_json::from_value(page).map_err(|source| BitrixError::Decode {
                    method: "user.get",
                    source,
                })?,
            };
            if batch.is_empty() {
                break;
            }

            let fetched = batch.len();
            entries.extend(batch.into_iter().filter_map(BitrixUser::into_entry));
            start += fetched;

            if fetched < USER_PAGE_SIZE {
                break;
            }
        }

        tracing::debug!(count = entries.len(), "Fetched Bitrix24 roster");
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
