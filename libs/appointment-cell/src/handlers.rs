use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::JsonPayload;
use shared_utils::html::render_table;
use shared_utils::AppState;

use crate::models::{AppointmentCreatedResponse, AppointmentListQuery};
use crate::services::AppointmentBookingService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service.list_appointments(query.city_filter()).await?;

    Ok(Json(json!({
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<AppointmentCreatedResponse>), AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let booking = booking_service.validate_booking(&payload)?;
    let appointment = booking_service.book_appointment(booking).await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentCreatedResponse {
            message: "Appointment confirmed",
            id: appointment.id,
            appointment,
        }),
    ))
}

// ==============================================================================
// ADMIN VIEWS
// ==============================================================================

#[axum::debug_handler]
pub async fn admin_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let rows: Vec<Vec<String>> = booking_service
        .list_appointments(None)
        .await?
        .into_iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.patient_name,
                a.city,
                a.doctor,
                a.date,
                a.time,
                a.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();

    Ok(Html(render_table(
        "Appointments",
        &["ID", "Patient", "City", "Doctor", "Date", "Time", "Created"],
        &rows,
    )))
}
