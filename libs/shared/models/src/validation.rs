use thiserror::Error;

/// Rejections raised while checking a submitted payload, before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No data provided")]
    NoData,

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{message}")]
    InvalidType { field: String, message: String },
}

impl ValidationError {
    pub fn invalid_type(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidType {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
