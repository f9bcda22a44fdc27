use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::JsonPayload;
use shared_utils::html::{preview, render_table};
use shared_utils::AppState;

use crate::models::ConsultationSubmittedResponse;
use crate::services::{room, ConsultationIntakeService};

const SYMPTOM_PREVIEW_CHARS: usize = 50;

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let intake_service = ConsultationIntakeService::new(&state);

    let consultations = intake_service.list_consultations().await?;

    Ok(Json(json!({
        "consultations": consultations
    })))
}

#[axum::debug_handler]
pub async fn submit_consultation(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<ConsultationSubmittedResponse>), AppError> {
    let intake_service = ConsultationIntakeService::new(&state);

    let submission = intake_service.validate_submission(&payload)?;
    let consultation = intake_service.submit_consultation(submission).await?;

    let room_name = consultation.room_name.clone();
    let room_url = room_name.as_deref().map(room::room_url);

    Ok((
        StatusCode::CREATED,
        Json(ConsultationSubmittedResponse {
            message: "Consultation submitted",
            id: consultation.id,
            consultation,
            room_name,
            room_url,
        }),
    ))
}

#[axum::debug_handler]
pub async fn admin_consultations(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let intake_service = ConsultationIntakeService::new(&state);

    let rows: Vec<Vec<String>> = intake_service
        .list_consultations()
        .await?
        .into_iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.patient_name,
                c.age.to_string(),
                c.mode.to_string(),
                c.room_name.unwrap_or_default(),
                preview(&c.symptoms, SYMPTOM_PREVIEW_CHARS),
                c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();

    Ok(Html(render_table(
        "Consultations",
        &["ID", "Patient", "Age", "Mode", "Room", "Symptoms", "Created"],
        &rows,
    )))
}
