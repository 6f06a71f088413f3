use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::questions::handlers;
use crate::features::questions::services::QuestionService;

/// Create routes for the questions feature
pub fn routes(service: Arc<QuestionService>) -> Router {
    Router::new()
        .route(
            "/api/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/api/questions/notify-checklists",
            post(handlers::notify_checklists),
        )
        .route(
            "/api/questions/{id}",
            get(handlers::get_question).put(handlers::revise_question),
        )
        .route(
            "/api/questions/{id}/versions",
            get(handlers::list_question_versions),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, test_server};
    use serde_json::json;
    use uuid::Uuid;

    fn app() -> Router {
        routes(Arc::new(QuestionService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let server = test_server(app());

        let response = server
            .post("/api/questions")
            .json(&json!({ "name": "", "type": "yes_no" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_requires_type() {
        let server = test_server(app());

        let response = server
            .post("/api/questions")
            .json(&json!({ "name": "Far ayarı kontrolü" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_revise_with_empty_body_is_rejected() {
        let server = test_server(app());

        let response = server
            .put(&format!("/api/questions/{}", Uuid::now_v7()))
            .json(&json!({}))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_revise_with_blank_name_is_rejected() {
        let server = test_server(app());

        let response = server
            .put(&format!("/api/questions/{}", Uuid::now_v7()))
            .json(&json!({ "name": "   ", "grade": "A" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "name must not be blank");
    }

    #[tokio::test]
    async fn test_notify_rejects_version_one_as_new_version() {
        let server = test_server(app());

        let response = server
            .post("/api/questions/notify-checklists")
            .json(&json!({
                "questionId": Uuid::now_v7(),
                "newVersion": 1,
                "prevVersion": 1
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_notify_rejects_decreasing_versions() {
        let server = test_server(app());

        let response = server
            .post("/api/questions/notify-checklists")
            .json(&json!({
                "questionId": Uuid::now_v7(),
                "newVersion": 2,
                "prevVersion": 3
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_get_rejects_invalid_id() {
        let server = test_server(app());

        let response = server.get("/api/questions/not-a-uuid/versions").await;

        response.assert_status_bad_request();
    }
}
