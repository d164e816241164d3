use metrics_exporter_prometheus::PrometheusBuilder;

use crate::core::config::Settings;

/// Installs the Prometheus exporter when enabled. Counters are recorded by the
/// watcher regardless; without the exporter they go nowhere.
pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    PrometheusBuilder::new().with_http_listener(settings.telemetry().prometheus_addr).install()?;
    Ok(())
}
