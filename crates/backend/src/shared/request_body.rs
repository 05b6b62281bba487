//! Тело запроса как `serde_json::Value`: JSON или HTML-форма

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

/// Разобрать тело запроса
///
/// Пустое тело даёт пустой объект. `application/x-www-form-urlencoded`
/// превращается в объект со строковыми значениями, всё остальное читается как JSON.
pub fn parse(headers: &HeaderMap, body: &[u8]) -> anyhow::Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    if is_form(headers) {
        return parse_form(body);
    }
    Ok(serde_json::from_slice(body)?)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}

// Повторяющийся ключ: побеждает последнее значение
fn parse_form(body: &[u8]) -> anyhow::Result<Value> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
    let fields: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Ok(Value::Object(fields))
}
