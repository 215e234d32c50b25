pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::notification::handlers as notification_handlers;
use crate::screening::handlers as screening_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/analyze", post(screening_handlers::handle_analyze))
        // Notification API
        .route(
            "/api/v1/candidates/rejection-email",
            post(notification_handlers::handle_rejection_email),
        )
        .with_state(state)
}
