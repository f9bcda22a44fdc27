use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the patient wants to be seen. Values outside the known modes are kept
/// verbatim as `Other` and never get a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsultationMode {
    InPerson,
    Video,
    Audio,
    Other(String),
}

impl ConsultationMode {
    pub const KNOWN: [ConsultationMode; 3] = [
        ConsultationMode::InPerson,
        ConsultationMode::Video,
        ConsultationMode::Audio,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ConsultationMode::InPerson => "in-person",
            ConsultationMode::Video => "video",
            ConsultationMode::Audio => "audio",
            ConsultationMode::Other(raw) => raw,
        }
    }

    /// Whether this mode runs over a live call and so needs its own room.
    pub fn needs_room(&self) -> bool {
        match self {
            ConsultationMode::Video | ConsultationMode::Audio => true,
            ConsultationMode::InPerson | ConsultationMode::Other(_) => false,
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConsultationMode {
    fn from(raw: &str) -> Self {
        match raw {
            "in-person" | "in_person" => ConsultationMode::InPerson,
            "video" => ConsultationMode::Video,
            "audio" => ConsultationMode::Audio,
            other => ConsultationMode::Other(other.to_string()),
        }
    }
}

impl From<String> for ConsultationMode {
    fn from(raw: String) -> Self {
        ConsultationMode::from(raw.as_str())
    }
}

impl From<ConsultationMode> for String {
    fn from(mode: ConsultationMode) -> Self {
        match mode {
            ConsultationMode::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A stored consultation. `room_name` is set exactly when `mode.needs_room()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub patient_name: String,
    pub age: i64,
    pub symptoms: String,
    pub mode: ConsultationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsultation {
    pub patient_name: String,
    pub age: i64,
    pub symptoms: String,
    pub mode: ConsultationMode,
}

impl NewConsultation {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["patient_name", "age", "symptoms", "mode"];
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationSubmittedResponse {
    pub message: &'static str,
    pub id: i64,
    pub consultation: Consultation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_url: Option<String>,
}
