pub(crate) mod errors;
pub(crate) mod response;

use std::time::Duration;

use time::OffsetDateTime;
use tokio::time::sleep;

use crate::core::config::Settings;
use crate::services::practicum::ReviewApi;
use crate::services::telegram::Notifier;
use crate::watcher::errors::WatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    Notified,
    Unchanged,
}

/// The poll-evaluate-notify loop. One logical actor: fetches the review API,
/// validates the payload, diffs the derived summary against the last one sent
/// and forwards changes to the chat. Every recoverable failure is absorbed
/// here; only startup configuration errors terminate the process.
pub(crate) struct Watcher<A, N> {
    api: A,
    notifier: N,
    chat_id: String,
    retry_period: Duration,
    // Captured once at startup and never advanced, so every cycle re-requests
    // the full window since process start.
    from_date: i64,
    last_notified: Option<String>,
}

impl<A: ReviewApi, N: Notifier> Watcher<A, N> {
    pub(crate) fn new(settings: &Settings, api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            chat_id: settings.telegram().chat_id.clone(),
            retry_period: Duration::from_secs(settings.poll().retry_period_seconds),
            from_date: OffsetDateTime::now_utc().unix_timestamp(),
            last_notified: None,
        }
    }

    pub(crate) async fn run(mut self) -> anyhow::Result<()> {
        loop {
            metrics::counter!("homewatch_cycles_total").increment(1);
            match self.cycle().await {
                Ok(CycleOutcome::Notified) => {}
                Ok(CycleOutcome::Unchanged) => {
                    tracing::debug!("Homework status unchanged, nothing sent");
                }
                Err(error) => {
                    metrics::counter!("homewatch_cycle_failures_total").increment(1);
                    tracing::error!(error = %error, "Homework watch cycle failed");
                    self.report_failure(&error).await;
                }
            }
            // The sleep is unconditional: every branch above, success or
            // failure, waits the same fixed interval before the next poll.
            sleep(self.retry_period).await;
        }
    }

    async fn cycle(&mut self) -> Result<CycleOutcome, WatchError> {
        let payload = self.api.fetch(self.from_date).await?;
        let homework = response::check_response(&payload)?;
        let summary = response::parse_status(homework)?;

        if self.last_notified.as_deref() == Some(summary.as_str()) {
            return Ok(CycleOutcome::Unchanged);
        }

        // On delivery failure the summary stays unrecorded, so the next cycle
        // retries the same text.
        self.notifier.send(&self.chat_id, &summary).await?;
        metrics::counter!("homewatch_notifications_total").increment(1);
        tracing::debug!(message = %summary, "Sent homework status notification");
        self.last_notified = Some(summary);
        Ok(CycleOutcome::Notified)
    }

    /// Best-effort: forwards the cycle failure to the same chat. A failure of
    /// this secondary send is logged and swallowed, never escalated.
    async fn report_failure(&self, error: &WatchError) {
        let message = format!("Сбой в работе программы: {error}");
        if let Err(send_error) = self.notifier.send(&self.chat_id, &message).await {
            tracing::warn!(error = %send_error, "Failed to forward cycle failure to Telegram");
        }
    }
}
