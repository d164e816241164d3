use serde_json::Value;

use crate::watcher::errors::{json_type_name, WatchError};

/// Review status codes and the verdict text forwarded to the chat. A status
/// outside this table is rejected rather than guessed at.
const HOMEWORK_VERDICTS: &[(&str, &str)] = &[
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Verifies the shape of a decoded API response and extracts the most recent
/// homework record. The `homeworks` list is newest-first, so index 0 is the
/// one evaluated this cycle; `current_date` must be present but is not
/// otherwise consumed.
pub(crate) fn check_response(response: &Value) -> Result<&Value, WatchError> {
    let Some(object) = response.as_object() else {
        return Err(WatchError::UnexpectedShape {
            what: "response body",
            type_name: json_type_name(response),
            expected: "object",
        });
    };

    let Some(homeworks) = object.get("homeworks") else {
        return Err(WatchError::Response(
            "homework API response has no homework records".to_string(),
        ));
    };

    if object.get("current_date").map_or(true, Value::is_null) {
        return Err(WatchError::Response("homework API response has no current_date".to_string()));
    }

    let Some(items) = homeworks.as_array() else {
        return Err(WatchError::UnexpectedShape {
            what: "homeworks",
            type_name: json_type_name(homeworks),
            expected: "array",
        });
    };

    items
        .first()
        .ok_or_else(|| WatchError::Response("homework records list is empty".to_string()))
}

/// Derives the notification text for one homework record. Equality of two of
/// these strings is the only "did anything change" signal the loop has.
pub(crate) fn parse_status(homework: &Value) -> Result<String, WatchError> {
    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| WatchError::Response("homework record has no homework_name".to_string()))?;

    let status = homework.get("status").and_then(Value::as_str);
    let verdict = status.and_then(verdict_for).ok_or_else(|| {
        WatchError::Response(format!(
            "unexpected homework status: {}",
            status.unwrap_or("<missing>")
        ))
    })?;

    Ok(format!("Изменился статус проверки работы \"{name}\". {verdict}"))
}

fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS.iter().find(|(code, _)| *code == status).map(|(_, verdict)| *verdict)
}
