//! Приведение значений из форм и JSON к булеву и строковому типам

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `true`/`false`, строки `"true"`/`"false"` и числа `1`/`0`
pub fn bool_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Для `#[serde(deserialize_with = ...)]` на полях `Option<bool>`
pub fn deserialize_option_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    bool_from_value(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected boolean, got {value}")))
}

/// Строка как есть; числа и bool приводятся к строке, как у String-полей документной БД
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Для `#[serde(deserialize_with = ...)]` на текстовых полях `Option<String>`
pub fn deserialize_option_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    text_from_value(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected text, got {value}")))
}
