use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::core::config::Settings;
use crate::watcher::errors::WatchError;

/// Outbound message delivery, mockable for loop tests.
#[async_trait]
pub(crate) trait Notifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), WatchError>;
}

#[derive(Debug, Deserialize)]
struct TgOkResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TelegramNotifier {
    client: Client,
    token: String,
}

impl TelegramNotifier {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.poll().http_timeout_seconds);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .context("Failed to build Telegram HTTP client")?;

        Ok(Self { client, token: settings.telegram().token.clone() })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), WatchError> {
        let response = self
            .client
            .post(format!("https://api.telegram.org/bot{}/sendMessage", self.token))
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|err| classify_transport_error(&err))?;

        let payload: TgOkResponse = response.json().await.map_err(|err| {
            WatchError::Notification(format!("failed to decode Telegram sendMessage payload: {err}"))
        })?;

        if payload.ok {
            return Ok(());
        }

        let description =
            payload.description.unwrap_or_else(|| "unknown Telegram API error".to_string());
        Err(WatchError::Notification(format!(
            "Telegram sendMessage returned ok=false: {description}"
        )))
    }
}

// The loop retries every delivery failure the same way, so the kinds collapse
// into one variant; the cause survives in the message text.
fn classify_transport_error(err: &reqwest::Error) -> WatchError {
    if err.is_timeout() {
        return WatchError::Notification(format!("Telegram request timed out: {err}"));
    }
    if err.is_connect() {
        return WatchError::Notification(format!("failed to reach Telegram: {err}"));
    }
    WatchError::Notification(format!("unexpected Telegram transport error: {err}"))
}
