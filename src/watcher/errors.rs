use serde_json::Value;
use thiserror::Error;

/// Everything a single watch cycle can fail with. None of these terminate the
/// process; the loop logs them, forwards a diagnostic and retries after the
/// fixed interval.
#[derive(Debug, Error)]
pub(crate) enum WatchError {
    #[error("homework API request failed: {0}")]
    Network(String),
    #[error("{0}")]
    Response(String),
    #[error("unexpected payload shape: {what} is {type_name}, not {expected}")]
    UnexpectedShape { what: &'static str, type_name: &'static str, expected: &'static str },
    #[error("failed to deliver Telegram message: {0}")]
    Notification(String),
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
