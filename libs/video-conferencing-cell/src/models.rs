use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::validation::ValidationError;
use shared_utils::fields::{is_blank, require_fields, required_string};

// ==============================================================================
// REQUEST / RESPONSE
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTokenRequest {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl VideoTokenRequest {
    /// `identity` is required. A blank `room` means no room restriction.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        require_fields(payload, &["identity"])?;
        let identity = required_string(payload, "identity")?;

        let room = match payload.get("room") {
            Some(value) if !is_blank(value) => Some(required_string(payload, "room")?),
            _ => None,
        };

        Ok(Self { identity, room })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTokenResponse {
    pub token: String,
}

// ==============================================================================
// ACCESS TOKEN CLAIMS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAccessClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: VideoGrants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGrants {
    pub identity: String,
    pub video: VideoGrant,
}

/// An empty grant allows any room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum VideoConferencingError {
    #[error("Video service not configured")]
    NotConfigured,

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Failed to sign access token: {message}")]
    TokenSigning { message: String },
}

impl From<VideoConferencingError> for AppError {
    fn from(err: VideoConferencingError) -> Self {
        match err {
            VideoConferencingError::NotConfigured => AppError::ServiceUnavailable(err.to_string()),
            VideoConferencingError::ValidationError { message } => AppError::BadRequest(message),
            VideoConferencingError::TokenSigning { .. } => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn identity_is_required() {
        let err = VideoTokenRequest::from_payload(&payload(json!({ "room": "telemed_abc" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["identity".into()]));

        let err = VideoTokenRequest::from_payload(&payload(json!({ "identity": "  " }))).unwrap_err();
        assert_eq!(err.to_string(), "Missing fields: identity");
    }

    #[test]
    fn blank_room_is_unrestricted() {
        let request =
            VideoTokenRequest::from_payload(&payload(json!({ "identity": "doctor-7", "room": "" }))).unwrap();
        assert_eq!(request.room, None);
    }

    #[test]
    fn room_must_be_text() {
        let err =
            VideoTokenRequest::from_payload(&payload(json!({ "identity": "doctor-7", "room": 42 }))).unwrap_err();
        assert_eq!(err.to_string(), "room must be a string");
    }

    #[test]
    fn errors_map_to_http_statuses() {
        assert_matches!(
            AppError::from(VideoConferencingError::NotConfigured),
            AppError::ServiceUnavailable(ref m) if m == "Video service not configured"
        );
        assert_matches!(
            AppError::from(VideoConferencingError::ValidationError { message: "bad".into() }),
            AppError::BadRequest(_)
        );
        assert_matches!(
            AppError::from(VideoConferencingError::TokenSigning { message: "x".into() }),
            AppError::Internal(_)
        );
    }
}
