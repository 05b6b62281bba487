use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot};
use crate::shared::{lenient, timestamp};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор задачи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(pub Uuid);

impl IssueId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for IssueId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(IssueId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Задача (issue) в рамках проекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub project: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    #[serde(with = "timestamp")]
    pub created_on: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_on: DateTime<Utc>,
}

impl Issue {
    /// Создать новую задачу для вставки в БД
    ///
    /// Проект всегда берётся из пути запроса, а не из тела.
    pub fn new_for_insert(project: &str, dto: IssueDto) -> Result<Self, String> {
        let missing = dto.missing_required_fields();
        if !missing.is_empty() {
            return Err(format!("required field(s) missing: {}", missing.join(", ")));
        }

        let now = timestamp::now();
        Ok(Self {
            id: IssueId::new_v4(),
            issue_title: dto.issue_title.unwrap_or_default(),
            issue_text: dto.issue_text.unwrap_or_default(),
            created_by: dto.created_by.unwrap_or_default(),
            project: project.to_string(),
            assigned_to: dto.assigned_to.unwrap_or_default(),
            status_text: dto.status_text.unwrap_or_default(),
            open: dto.open.unwrap_or(true),
            created_on: now,
            updated_on: now,
        })
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }
}

impl AggregateRoot for Issue {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "issue"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания задачи (POST)
///
/// Обязательные поля опциональны на уровне типа: их отсутствие проверяется
/// `missing_required_fields`, чтобы ответить единой ошибкой.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IssueDto {
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_by: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_option_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub open: Option<bool>,
}

impl IssueDto {
    /// Имена обязательных полей, которые отсутствуют или пусты
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("issue_title", &self.issue_title),
            ("issue_text", &self.issue_text),
            ("created_by", &self.created_by),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}
