use serde::{Deserialize, Serialize};

/// Поля задачи так, как они называются в JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueField {
    #[serde(rename = "_id")]
    Id,
    #[serde(rename = "issue_title")]
    IssueTitle,
    #[serde(rename = "issue_text")]
    IssueText,
    #[serde(rename = "created_by")]
    CreatedBy,
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "assigned_to")]
    AssignedTo,
    #[serde(rename = "status_text")]
    StatusText,
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "created_on")]
    CreatedOn,
    #[serde(rename = "updated_on")]
    UpdatedOn,
}

impl IssueField {
    pub const ALL: [IssueField; 10] = [
        IssueField::Id,
        IssueField::IssueTitle,
        IssueField::IssueText,
        IssueField::CreatedBy,
        IssueField::Project,
        IssueField::AssignedTo,
        IssueField::StatusText,
        IssueField::Open,
        IssueField::CreatedOn,
        IssueField::UpdatedOn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueField::Id => "_id",
            IssueField::IssueTitle => "issue_title",
            IssueField::IssueText => "issue_text",
            IssueField::CreatedBy => "created_by",
            IssueField::Project => "project",
            IssueField::AssignedTo => "assigned_to",
            IssueField::StatusText => "status_text",
            IssueField::Open => "open",
            IssueField::CreatedOn => "created_on",
            IssueField::UpdatedOn => "updated_on",
        }
    }

    /// Найти поле по ключу JSON / query string
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}
