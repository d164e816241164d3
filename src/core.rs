pub(crate) mod config;
pub(crate) mod metrics;
pub(crate) mod telemetry;
