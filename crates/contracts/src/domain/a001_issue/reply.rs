use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESULT_UPDATED: &str = "successfully updated";
pub const RESULT_DELETED: &str = "successfully deleted";

pub const ERROR_REQUIRED_FIELDS_MISSING: &str = "required field(s) missing";
pub const ERROR_COULD_NOT_CREATE: &str = "could not create";
pub const ERROR_MISSING_ID: &str = "missing _id";
pub const ERROR_NO_UPDATE_FIELDS: &str = "no update field(s) sent";
pub const ERROR_COULD_NOT_UPDATE: &str = "could not update";
pub const ERROR_COULD_NOT_DELETE: &str = "could not delete";
pub const ERROR_INVALID_BODY: &str = "invalid request body";

/// Ответ на PUT/DELETE, а также тело любой ошибки
///
/// `_id` повторяет значение клиента как есть (строка или любой другой JSON).
/// Если клиент `_id` не прислал, ключ в ответе отсутствует.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueActionReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl IssueActionReply {
    pub fn success(result: &str, id: Value) -> Self {
        Self {
            result: Some(result.to_string()),
            error: None,
            id: Some(id),
        }
    }

    pub fn failure(error: &str, id: Option<Value>) -> Self {
        Self {
            result: None,
            error: Some(error.to_string()),
            id,
        }
    }
}
