use std::collections::HashMap;

use contracts::domain::a001_issue::aggregate::{Issue, IssueDto, IssueId};
use contracts::domain::a001_issue::reply::{IssueActionReply, RESULT_DELETED, RESULT_UPDATED};
use contracts::domain::common::AggregateId;
use contracts::shared::one_or_many::OneOrMany;
use contracts::shared::timestamp;
use serde_json::{Map, Value};

use super::error::IssueError;
use super::filter::IssueFilter;
use super::patch::IssuePatch;
use super::repository::IssueStore;

/// Задачи проекта, отфильтрованные по query string
///
/// Неизвестный проект даёт пустой список. Ошибка хранилища тоже: она
/// логируется, а клиент получает `[]`.
pub async fn list(
    store: &dyn IssueStore,
    project: &str,
    query: &HashMap<String, String>,
) -> Vec<Issue> {
    let issues = match store.list_by_project(project).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to list issues for project '{}': {}", project, e);
            return Vec::new();
        }
    };
    IssueFilter::from_query(query).apply(issues)
}

/// Создание одной задачи или пачки задач (всё или ничего)
pub async fn create(
    store: &dyn IssueStore,
    project: &str,
    payload: Value,
) -> Result<OneOrMany<Issue>, IssueError> {
    let dtos: OneOrMany<IssueDto> =
        serde_json::from_value(payload).map_err(|_| IssueError::InvalidBody)?;

    // Валидация всей пачки до записи
    let issues = dtos
        .try_map(|dto| Issue::new_for_insert(project, dto))
        .map_err(|e| {
            tracing::info!("Rejected issue for project '{}': {}", project, e);
            IssueError::RequiredFieldsMissing
        })?;

    store.insert_all(issues.as_slice()).await.map_err(|e| {
        tracing::error!("Failed to insert issues into project '{}': {}", project, e);
        IssueError::CouldNotCreate
    })?;

    tracing::info!("Created {} issue(s) in project '{}'", issues.len(), project);
    Ok(issues)
}

/// Частичное обновление задачи, всегда обновляет `updated_on`
pub async fn update(store: &dyn IssueStore, body: Value) -> Result<IssueActionReply, IssueError> {
    let mut fields = into_fields(body)?;
    let id = fields.remove("_id").ok_or(IssueError::MissingId)?;
    if fields.is_empty() {
        return Err(IssueError::NoUpdateFields { id });
    }

    let Some(issue_id) = parse_id(&id) else {
        tracing::info!("Update rejected, malformed _id {}", id);
        return Err(IssueError::CouldNotUpdate { id });
    };
    let patch = match IssuePatch::from_fields(&fields) {
        Ok(p) => p,
        Err(e) => {
            tracing::info!("Update of {} rejected: {}", id, e);
            return Err(IssueError::CouldNotUpdate { id });
        }
    };

    match store.update(issue_id, &patch, timestamp::now()).await {
        Ok(true) => {
            tracing::info!("Updated issue {}", issue_id.as_string());
            Ok(IssueActionReply::success(RESULT_UPDATED, id))
        }
        Ok(false) => {
            tracing::info!("Update of {} failed: not found", id);
            Err(IssueError::CouldNotUpdate { id })
        }
        Err(e) => {
            tracing::error!("Update of {} failed: {}", id, e);
            Err(IssueError::CouldNotUpdate { id })
        }
    }
}

/// Удаление задачи; тело должно содержать только `_id`
pub async fn delete(store: &dyn IssueStore, body: Value) -> Result<IssueActionReply, IssueError> {
    let fields = into_fields(body)?;
    let id = fields.get("_id").cloned();
    if fields.len() > 1 {
        return Err(IssueError::CouldNotDelete { id });
    }
    let id = id.ok_or(IssueError::MissingId)?;

    let Some(issue_id) = parse_id(&id) else {
        tracing::info!("Delete rejected, malformed _id {}", id);
        return Err(IssueError::CouldNotDelete { id: Some(id) });
    };

    match store.delete(issue_id).await {
        Ok(true) => {
            tracing::info!("Deleted issue {}", issue_id.as_string());
            Ok(IssueActionReply::success(RESULT_DELETED, id))
        }
        Ok(false) => {
            tracing::info!("Delete of {} failed: not found", id);
            Err(IssueError::CouldNotDelete { id: Some(id) })
        }
        Err(e) => {
            tracing::error!("Delete of {} failed: {}", id, e);
            Err(IssueError::CouldNotDelete { id: Some(id) })
        }
    }
}

/// Очистка хранилища при старте (`database.reset_on_start`)
pub async fn reset(store: &dyn IssueStore) -> anyhow::Result<u64> {
    let removed = store.delete_all().await?;
    tracing::info!("Removed {} issue(s) on startup reset", removed);
    Ok(removed)
}

fn into_fields(body: Value) -> Result<Map<String, Value>, IssueError> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(IssueError::InvalidBody),
    }
}

// null, пустая строка и любое не-UUID значение дают None
fn parse_id(id: &Value) -> Option<IssueId> {
    id.as_str().and_then(|s| IssueId::from_string(s).ok())
}
