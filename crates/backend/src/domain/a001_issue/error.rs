use contracts::domain::a001_issue::reply::{
    IssueActionReply, ERROR_COULD_NOT_CREATE, ERROR_COULD_NOT_DELETE, ERROR_COULD_NOT_UPDATE, ERROR_INVALID_BODY,
    ERROR_MISSING_ID, ERROR_NO_UPDATE_FIELDS, ERROR_REQUIRED_FIELDS_MISSING,
};
use serde_json::Value;
use thiserror::Error;

/// Ошибки операций над задачами, каждая соответствует одному ответу клиенту
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    #[error("could not create")]
    CouldNotCreate,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: Value },

    #[error("could not update")]
    CouldNotUpdate { id: Value },

    #[error("could not delete")]
    CouldNotDelete { id: Option<Value> },

    #[error("invalid request body")]
    InvalidBody,
}

impl IssueError {
    /// Тело ответа `{error, _id?}`
    pub fn to_reply(&self) -> IssueActionReply {
        match self {
            IssueError::RequiredFieldsMissing => {
                IssueActionReply::failure(ERROR_REQUIRED_FIELDS_MISSING, None)
            }
            IssueError::CouldNotCreate => IssueActionReply::failure(ERROR_COULD_NOT_CREATE, None),
            IssueError::MissingId => IssueActionReply::failure(ERROR_MISSING_ID, None),
            IssueError::NoUpdateFields { id } => {
                IssueActionReply::failure(ERROR_NO_UPDATE_FIELDS, Some(id.clone()))
            }
            IssueError::CouldNotUpdate { id } => {
                IssueActionReply::failure(ERROR_COULD_NOT_UPDATE, Some(id.clone()))
            }
            IssueError::CouldNotDelete { id } => {
                IssueActionReply::failure(ERROR_COULD_NOT_DELETE, id.clone())
            }
            IssueError::InvalidBody => IssueActionReply::failure(ERROR_INVALID_BODY, None),
        }
    }
}
