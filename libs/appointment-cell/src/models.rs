// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A stored booking. `doctor` is free text as submitted, not a reference to a doctor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_name: String,
    pub city: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// A booking that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_name: String,
    pub city: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
}

impl NewAppointment {
    pub const REQUIRED_FIELDS: [&'static str; 5] = ["patient_name", "city", "doctor", "date", "time"];
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentCreatedResponse {
    pub message: &'static str,
    pub id: i64,
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListQuery {
    pub city: Option<String>,
}

impl AppointmentListQuery {
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }
}
