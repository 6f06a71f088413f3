use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::suggestions::handlers;
use crate::features::suggestions::services::SuggestionService;

/// Create routes for the suggestions feature
pub fn routes(service: Arc<SuggestionService>) -> Router {
    Router::new()
        .route("/api/suggest", post(handlers::suggest_categories))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::CategoryService;
    use crate::features::suggestions::SuggestionCache;
    use crate::shared::test_helpers::{lazy_pool, test_server};
    use serde_json::json;

    fn app() -> Router {
        let cache = Arc::new(SuggestionCache::new(8));
        let categories = Arc::new(CategoryService::new(lazy_pool(), Arc::clone(&cache)));
        routes(Arc::new(SuggestionService::new(categories, cache)))
    }

    #[tokio::test]
    async fn test_empty_description_returns_no_suggestions() {
        let server = test_server(app());

        let response = server
            .post("/api/suggest")
            .json(&json!({ "description": "" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["autoSuggestions"], json!([]));
    }

    #[tokio::test]
    async fn test_missing_description_is_rejected() {
        let server = test_server(app());

        let response = server.post("/api/suggest").json(&json!({})).await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_oversized_description_is_rejected() {
        let server = test_server(app());

        let response = server
            .post("/api/suggest")
            .json(&json!({ "description": "a".repeat(5001) }))
            .await;

        response.assert_status_bad_request();
    }
}
