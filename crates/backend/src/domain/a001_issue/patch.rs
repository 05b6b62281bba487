use contracts::domain::a001_issue::field::IssueField;
use contracts::shared::lenient;
use serde_json::{Map, Value};

/// Частичное обновление задачи (PUT)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssuePatch {
    /// Разобрать поля тела запроса (без `_id`)
    ///
    /// Ключи, которые не являются изменяемыми полями задачи, игнорируются.
    /// Значение неверного типа делает весь патч недействительным.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, String> {
        let mut patch = IssuePatch::default();
        for (key, value) in fields {
            let Some(field) = IssueField::from_key(key) else {
                tracing::debug!("Ignoring unknown field '{}'", key);
                continue;
            };
            match field {
                IssueField::Open => {
                    patch.open = Some(
                        lenient::bool_from_value(value)
                            .ok_or_else(|| format!("'{key}' must be a boolean, got {value}"))?,
                    );
                }
                IssueField::IssueTitle => patch.issue_title = Some(text(key, value)?),
                IssueField::IssueText => patch.issue_text = Some(text(key, value)?),
                IssueField::CreatedBy => patch.created_by = Some(text(key, value)?),
                IssueField::AssignedTo => patch.assigned_to = Some(text(key, value)?),
                IssueField::StatusText => patch.status_text = Some(text(key, value)?),
                IssueField::Id
                | IssueField::Project
                | IssueField::CreatedOn
                | IssueField::UpdatedOn => {
                    tracing::debug!("Ignoring read-only field '{}'", key);
                }
            }
        }
        Ok(patch)
    }
}

fn text(key: &str, value: &Value) -> Result<String, String> {
    lenient::text_from_value(value).ok_or_else(|| format!("'{key}' must be text, got {value}"))
}
