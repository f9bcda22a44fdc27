use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use shared_models::error::AppError;
use shared_models::validation::ValidationError;

/// A submitted JSON object.
///
/// Empty bodies, malformed JSON, non-object values and `{}` are all rejected
/// as `No data provided` before a handler runs.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Map<String, Value>);

impl JsonPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::NoData);
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) if !map.is_empty() => Ok(JsonPayload(map)),
            _ => Err(ValidationError::NoData),
        }
    }
}

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(Self::from_slice(&bytes)?)
    }
}
