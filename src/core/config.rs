use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    practicum: PracticumSettings,
    telegram: TelegramSettings,
    poll: PollSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct PracticumSettings {
    pub(crate) token: String,
    pub(crate) endpoint: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TelegramSettings {
    pub(crate) token: String,
    pub(crate) chat_id: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PollSettings {
    pub(crate) retry_period_seconds: u64,
    pub(crate) http_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
    pub(crate) prometheus_addr: SocketAddr,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("missing required secret for {0}")]
    MissingSecret(&'static str),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let practicum_token = env_required("PRACTICUM_TOKEN")?;
        let telegram_token = env_required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = env_required("TELEGRAM_CHAT_ID")?;

        let endpoint = env_or_default("HOMEWORK_ENDPOINT", DEFAULT_ENDPOINT);

        let retry_period_seconds = parse_interval(
            "RETRY_PERIOD_SECONDS",
            env_or_default("RETRY_PERIOD_SECONDS", "600"),
        )?;
        let http_timeout_seconds = parse_interval(
            "HTTP_TIMEOUT_SECONDS",
            env_or_default("HTTP_TIMEOUT_SECONDS", "30"),
        )?;

        let log_level = env_or_default("HOMEWATCH_LOG_LEVEL", "debug");
        let json =
            env_optional("HOMEWATCH_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_addr =
            parse_socket_addr("PROMETHEUS_ADDR", env_or_default("PROMETHEUS_ADDR", "0.0.0.0:9184"))?;

        Ok(Self {
            practicum: PracticumSettings { token: practicum_token, endpoint },
            telegram: TelegramSettings { token: telegram_token, chat_id: telegram_chat_id },
            poll: PollSettings { retry_period_seconds, http_timeout_seconds },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled, prometheus_addr },
        })
    }

    pub(crate) fn practicum(&self) -> &PracticumSettings {
        &self.practicum
    }

    pub(crate) fn telegram(&self) -> &TelegramSettings {
        &self.telegram
    }

    pub(crate) fn poll(&self) -> &PollSettings {
        &self.poll
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env_optional(key).ok_or(ConfigError::MissingSecret(key))
}

fn parse_interval(field: &'static str, value: String) -> Result<u64, ConfigError> {
    let parsed: u64 =
        value.parse().map_err(|_| ConfigError::InvalidValue { field, value: value.clone() })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue { field, value });
    }
    Ok(parsed)
}

fn parse_socket_addr(field: &'static str, value: String) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    use super::*;

    // Settings::load reads the process environment, so these tests serialize.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_required_env() {
        env::set_var("PRACTICUM_TOKEN", "practicum-token");
        env::set_var("TELEGRAM_TOKEN", "telegram-token");
        env::set_var("TELEGRAM_CHAT_ID", "424242");
    }

    fn clear_optional_env() {
        env::remove_var("HOMEWORK_ENDPOINT");
        env::remove_var("RETRY_PERIOD_SECONDS");
        env::remove_var("HTTP_TIMEOUT_SECONDS");
        env::remove_var("HOMEWATCH_LOG_JSON");
        env::remove_var("PROMETHEUS_ENABLED");
        env::remove_var("PROMETHEUS_ADDR");
    }

    #[test]
    fn load_fails_without_each_required_secret() {
        let _guard = env_lock();
        clear_optional_env();

        for missing in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            set_required_env();
            env::remove_var(missing);
            let err = Settings::load().expect_err("load without secret");
            assert!(matches!(err, ConfigError::MissingSecret(name) if name == missing));
        }
    }

    #[test]
    fn load_treats_blank_secret_as_missing() {
        let _guard = env_lock();
        clear_optional_env();
        set_required_env();
        env::set_var("TELEGRAM_CHAT_ID", "   ");

        let err = Settings::load().expect_err("load with blank chat id");
        assert!(matches!(err, ConfigError::MissingSecret("TELEGRAM_CHAT_ID")));
    }

    #[test]
    fn load_applies_defaults() {
        let _guard = env_lock();
        clear_optional_env();
        set_required_env();

        let settings = Settings::load().expect("settings");
        assert_eq!(settings.practicum().endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.poll().retry_period_seconds, 600);
        assert_eq!(settings.poll().http_timeout_seconds, 30);
        assert_eq!(settings.telemetry().log_level, "debug");
        assert!(!settings.telemetry().json);
        assert!(!settings.telemetry().prometheus_enabled);
    }

    #[test]
    fn load_rejects_zero_retry_period() {
        let _guard = env_lock();
        clear_optional_env();
        set_required_env();
        env::set_var("RETRY_PERIOD_SECONDS", "0");

        let err = Settings::load().expect_err("load with zero interval");
        assert!(matches!(err, ConfigError::InvalidValue { field: "RETRY_PERIOD_SECONDS", .. }));
        env::remove_var("RETRY_PERIOD_SECONDS");
    }

    #[test]
    fn parse_interval_rejects_garbage() {
        let err = parse_interval("RETRY_PERIOD_SECONDS", "soon".to_string()).expect_err("garbage");
        assert!(matches!(err, ConfigError::InvalidValue { field: "RETRY_PERIOD_SECONDS", .. }));
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }
}
