pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/interviews", post(handlers::handle_create))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_view).delete(handlers::handle_delete),
        )
        .route(
            "/api/v1/interviews/:id/advance",
            post(handlers::handle_advance),
        )
        .route(
            "/api/v1/interviews/:id/answer",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/interviews/:id/report",
            get(handlers::handle_export_report),
        )
        .with_state(state)
}
