use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::config::Settings;
use crate::watcher::errors::WatchError;

/// Seam between the poll loop and the homework review API, so the loop can be
/// driven by a scripted implementation in tests.
#[async_trait]
pub(crate) trait ReviewApi {
    /// Fetch homework records with timestamps at or after `from_date`.
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.poll().http_timeout_seconds);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .context("Failed to build homework API HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.practicum().endpoint.clone(),
            token: settings.practicum().token.clone(),
        })
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.to_string())])
            .send()
            .await
            .map_err(|err| WatchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Response(format!("homework API returned status {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| WatchError::Response(format!("failed to decode homework API payload: {err}")))
    }
}
