pub(crate) mod core;
pub(crate) mod services;
pub(crate) mod watcher;

use crate::core::{config::Settings, telemetry};
use crate::services::practicum::PracticumClient;
use crate::services::telegram::TelegramNotifier;
use crate::watcher::Watcher;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let api = PracticumClient::from_settings(&settings)?;
    let notifier = TelegramNotifier::from_settings(&settings)?;

    tracing::info!(
        endpoint = %settings.practicum().endpoint,
        retry_period_seconds = settings.poll().retry_period_seconds,
        "Homework watcher started"
    );

    Watcher::new(&settings, api, notifier).run().await
}
