use std::sync::Arc;

use axum::{routing::get, Router};

use crate::domain::a001_issue::repository::IssueStore;
use crate::handlers;

/// Состояние роутера: зависимости обработчиков
#[derive(Clone)]
pub struct AppState {
    pub issues: Arc<dyn IssueStore>,
}

impl AppState {
    pub fn new(issues: impl IssueStore + 'static) -> Self {
        Self {
            issues: Arc::new(issues),
        }
    }
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/issues/:project",
            get(handlers::a001_issue::list)
                .post(handlers::a001_issue::create)
                .put(handlers::a001_issue::update)
                .delete(handlers::a001_issue::delete),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_issue::repository::SeaOrmIssueStore;
    use crate::shared::data::db::connect_in_memory;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let conn = connect_in_memory().await.unwrap();
        configure_routes(AppState::new(SeaOrmIssueStore::new(conn)))
    }

    async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Value) -> Value {
        let (status, value) =
            send_raw(app, method, uri, "application/json", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        value
    }

    async fn get_json(app: &Router, uri: &str) -> Value {
        send(app, Method::GET, uri, Value::Null).await
    }

    fn issue(title: &str, created_by: &str, assigned_to: &str) -> Value {
        json!({
            "issue_title": title,
            "issue_text": "Functional test",
            "created_by": created_by,
            "assigned_to": assigned_to
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_create_with_every_field() {
        let app = app().await;
        let every_field = json!({
            "issue_title": "Faux Issue Title",
            "issue_text": "Functional Test - Every field",
            "created_by": "fCC",
            "assigned_to": "Dom",
            "status_text": "In QA"
        });
        let created = send(&app, Method::POST, "/api/issues/apitest", every_field.clone()).await;

        for (key, value) in every_field.as_object().unwrap() {
            assert_eq!(&created[key], value, "field {key}");
        }
        assert_eq!(created["project"], "apitest");
        assert_eq!(created["open"], true);
        assert!(created["_id"].is_string());
        assert!(created["created_on"].is_string());
        assert_eq!(created["created_on"], created["updated_on"]);
    }

    #[tokio::test]
    async fn test_create_with_only_required_fields() {
        let app = app().await;
        let created = send(
            &app,
            Method::POST,
            "/api/issues/apitest",
            json!({"issue_title": "T", "issue_text": "X", "created_by": "C"}),
        )
        .await;
        assert_eq!(created["assigned_to"], "");
        assert_eq!(created["status_text"], "");
    }

    #[tokio::test]
    async fn test_create_casts_scalar_text_fields() {
        let app = app().await;
        let created = send(
            &app,
            Method::POST,
            "/api/issues/apitest",
            json!({"issue_title": 123, "issue_text": true, "created_by": "c", "assigned_to": 4.5}),
        )
        .await;
        assert_eq!(created["issue_title"], "123");
        assert_eq!(created["issue_text"], "true");
        assert_eq!(created["assigned_to"], "4.5");
        assert!(created["_id"].is_string());
    }

    #[tokio::test]
    async fn test_create_with_missing_required_fields() {
        let app = app().await;
        for body in [
            json!({"issue_title": "T", "issue_text": "X"}),
            json!({"issue_text": "X", "created_by": "C"}),
            json!({"issue_title": "", "issue_text": "X", "created_by": "C"}),
            json!([issue("ok", "Alice", ""), {"issue_title": "T"}]),
        ] {
            let reply = send(&app, Method::POST, "/api/issues/apitest", body).await;
            assert_eq!(reply, json!({"error": "required field(s) missing"}));
        }
        assert_eq!(get_json(&app, "/api/issues/apitest").await, json!([]));
    }

    #[tokio::test]
    async fn test_create_array_and_view_in_order() {
        let app = app().await;
        let created = send(
            &app,
            Method::POST,
            "/api/issues/apitest",
            json!([issue("one", "Alice", ""), issue("two", "Bob", "")]),
        )
        .await;
        assert_eq!(created.as_array().unwrap().len(), 2);

        send(&app, Method::POST, "/api/issues/other", issue("x", "Carol", "")).await;

        let listed = get_json(&app, "/api/issues/apitest").await;
        assert_eq!(listed, created);
        assert_eq!(get_json(&app, "/api/issues/unknown").await, json!([]));
    }

    #[tokio::test]
    async fn test_view_with_filters() {
        let app = app().await;
        send(
            &app,
            Method::POST,
            "/api/issues/apitest",
            json!([
                issue("a", "Alice", "Bob"),
                issue("b", "Alice", "Bob"),
                issue("c", "Alice", "Carol"),
                issue("d", "Dave", "Bob"),
            ]),
        )
        .await;

        let by_alice = get_json(&app, "/api/issues/apitest?created_by=Alice").await;
        assert_eq!(by_alice.as_array().unwrap().len(), 3);

        let both = get_json(&app, "/api/issues/apitest?created_by=Alice&assigned_to=Bob").await;
        let both = both.as_array().unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both[0]["issue_title"], "a");
        assert_eq!(both[1]["issue_title"], "b");

        let none = get_json(&app, "/api/issues/apitest?priority=high").await;
        assert_eq!(none, json!([]));
    }

    #[tokio::test]
    async fn test_view_open_false_matches_closed_only() {
        let app = app().await;
        let created = send(
            &app,
            Method::POST,
            "/api/issues/apitest",
            json!([issue("a", "Alice", ""), issue("b", "Alice", "")]),
        )
        .await;
        let closed_id = created[1]["_id"].clone();
        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"_id": closed_id, "open": false}),
        )
        .await;
        assert_eq!(reply["result"], "successfully updated");

        let closed = get_json(&app, "/api/issues/apitest?open=false").await;
        assert_eq!(closed.as_array().unwrap().len(), 1);
        assert_eq!(closed[0]["_id"], closed_id);
        assert_eq!(closed[0]["open"], false);

        let open = get_json(&app, "/api/issues/apitest?open=true").await;
        assert_eq!(open.as_array().unwrap().len(), 1);
        assert_eq!(open[0]["_id"], created[0]["_id"]);
    }

    #[tokio::test]
    async fn test_update_one_and_multiple_fields() {
        let app = app().await;
        let created = send(&app, Method::POST, "/api/issues/apitest", issue("a", "Alice", "")).await;
        let id = created["_id"].clone();

        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"_id": id, "issue_text": "updated"}),
        )
        .await;
        assert_eq!(reply, json!({"result": "successfully updated", "_id": id}));

        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"_id": id, "issue_title": "new title", "assigned_to": "Bob"}),
        )
        .await;
        assert_eq!(reply, json!({"result": "successfully updated", "_id": id}));

        let stored = &get_json(&app, "/api/issues/apitest").await[0];
        assert_eq!(stored["issue_text"], "updated");
        assert_eq!(stored["issue_title"], "new title");
        assert_eq!(stored["assigned_to"], "Bob");
        assert_eq!(stored["created_on"], created["created_on"]);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let app = app().await;
        let created = send(&app, Method::POST, "/api/issues/apitest", issue("a", "Alice", "")).await;
        let id = created["_id"].clone();

        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"issue_title": "no id"}),
        )
        .await;
        assert_eq!(reply, json!({"error": "missing _id"}));

        let reply = send(&app, Method::PUT, "/api/issues/apitest", json!({"_id": id})).await;
        assert_eq!(reply, json!({"error": "no update field(s) sent", "_id": id}));

        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"_id": "5", "issue_text": "x"}),
        )
        .await;
        assert_eq!(reply, json!({"error": "could not update", "_id": "5"}));

        for blank in [json!(""), json!(null)] {
            let reply = send(
                &app,
                Method::PUT,
                "/api/issues/apitest",
                json!({"_id": blank, "issue_text": "x"}),
            )
            .await;
            assert_eq!(reply, json!({"error": "could not update", "_id": blank}));
        }

        let reply = send(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            json!({"_id": id, "open": "sometimes"}),
        )
        .await;
        assert_eq!(reply, json!({"error": "could not update", "_id": id}));
    }

    #[tokio::test]
    async fn test_delete() {
        let app = app().await;
        let created = send(&app, Method::POST, "/api/issues/apitest", issue("a", "Alice", "")).await;
        let id = created["_id"].clone();

        let reply = send(
            &app,
            Method::DELETE,
            "/api/issues/apitest",
            json!({"_id": id, "issue_title": "a"}),
        )
        .await;
        assert_eq!(reply, json!({"error": "could not delete", "_id": id}));
        assert_eq!(get_json(&app, "/api/issues/apitest").await.as_array().unwrap().len(), 1);

        let reply = send(&app, Method::DELETE, "/api/issues/apitest", json!({})).await;
        assert_eq!(reply, json!({"error": "missing _id"}));

        let reply = send(&app, Method::DELETE, "/api/issues/apitest", json!({"_id": "5"})).await;
        assert_eq!(reply, json!({"error": "could not delete", "_id": "5"}));

        let reply = send(&app, Method::DELETE, "/api/issues/apitest", json!({"_id": id})).await;
        assert_eq!(reply, json!({"result": "successfully deleted", "_id": id}));
        assert_eq!(get_json(&app, "/api/issues/apitest").await, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_still_replies_200() {
        let app = app().await;
        let (status, reply) = send_raw(
            &app,
            Method::POST,
            "/api/issues/apitest",
            "application/json",
            "{\"issue_title\": ",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, json!({"error": "invalid request body"}));

        let reply = send(&app, Method::PUT, "/api/issues/apitest", json!([1, 2])).await;
        assert_eq!(reply, json!({"error": "invalid request body"}));
    }

    #[tokio::test]
    async fn test_form_encoded_create_and_update() {
        let app = app().await;
        let form = "application/x-www-form-urlencoded";
        let (_, created) = send_raw(
            &app,
            Method::POST,
            "/api/issues/apitest",
            form,
            "issue_title=Form+issue&issue_text=from%20a%20form&created_by=Eve",
        )
        .await;
        assert_eq!(created["issue_title"], "Form issue");
        assert_eq!(created["issue_text"], "from a form");
        let id = created["_id"].as_str().unwrap().to_string();

        let (_, reply) = send_raw(
            &app,
            Method::PUT,
            "/api/issues/apitest",
            form,
            format!("_id={id}&open=false"),
        )
        .await;
        assert_eq!(reply, json!({"result": "successfully updated", "_id": id}));

        let (_, reply) = send_raw(&app, Method::DELETE, "/api/issues/apitest", form, "_id=").await;
        assert_eq!(reply, json!({"error": "could not delete", "_id": ""}));

        let (_, reply) =
            send_raw(&app, Method::DELETE, "/api/issues/apitest", form, "issue_title=x").await;
        assert_eq!(reply, json!({"error": "missing _id"}));
    }
}
