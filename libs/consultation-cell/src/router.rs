use std::sync::Arc;

use axum::{routing::get, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn consultation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/consultations",
            get(handlers::list_consultations).post(handlers::submit_consultation),
        )
        .route("/admin/consultations", get(handlers::admin_consultations))
        .with_state(state)
}
