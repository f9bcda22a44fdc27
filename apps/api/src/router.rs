use std::sync::Arc;

use axum::{
    Json,
    Router,
    routing::get,
};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use consultation_cell::router::consultation_routes;
use doctor_cell::router::doctor_routes;
use shared_utils::AppState;
use video_conferencing_cell::router::video_conferencing_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Telemedicine API is running!" }))
        .route("/api/health", get(health_check))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(consultation_routes(state.clone()))
        .merge(video_conferencing_routes(state))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
