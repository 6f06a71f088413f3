use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::checklists::handlers;
use crate::features::checklists::services::ChecklistService;

/// Create routes for the checklists feature
pub fn routes(service: Arc<ChecklistService>) -> Router {
    Router::new()
        .route(
            "/api/checklists",
            get(handlers::list_checklists).post(handlers::create_checklist),
        )
        .route("/api/checklists/{id}", get(handlers::get_checklist))
        .route(
            "/api/checklists/{id}/questions",
            post(handlers::attach_question),
        )
        .route(
            "/api/checklists/{id}/questions/{question_id}",
            delete(handlers::detach_question),
        )
        .with_state(service)
}
