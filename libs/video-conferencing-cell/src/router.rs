use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_utils::AppState;

use crate::handlers::*;

pub fn video_conferencing_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get_video_token", post(get_video_token))
        .route("/video_call/{room_name}", get(video_call_page))
        .with_state(state)
}
