use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_issue::aggregate::Issue;
use contracts::domain::a001_issue::reply::IssueActionReply;
use contracts::shared::one_or_many::OneOrMany;
use serde_json::Value;

use crate::domain::a001_issue::error::IssueError;
use crate::domain::a001_issue::service;
use crate::routes::AppState;
use crate::shared::request_body;

// Логические ошибки отдаются телом `{error, _id?}` со статусом 200
impl IntoResponse for IssueError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.to_reply())).into_response()
    }
}

fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, IssueError> {
    request_body::parse(headers, body).map_err(|e| {
        tracing::info!("Invalid request body: {}", e);
        IssueError::InvalidBody
    })
}

/// GET /api/issues/:project
pub async fn list(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Issue>> {
    Json(service::list(state.issues.as_ref(), &project, &query).await)
}

/// POST /api/issues/:project
pub async fn create(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<OneOrMany<Issue>>, IssueError> {
    let payload = parse_body(&headers, &body)?;
    let created = service::create(state.issues.as_ref(), &project, payload).await?;
    Ok(Json(created))
}

/// PUT /api/issues/:project
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<IssueActionReply>, IssueError> {
    let payload = parse_body(&headers, &body)?;
    Ok(Json(service::update(state.issues.as_ref(), payload).await?))
}

/// DELETE /api/issues/:project
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<IssueActionReply>, IssueError> {
    let payload = parse_body(&headers, &body)?;
    Ok(Json(service::delete(state.issues.as_ref(), payload).await?))
}
