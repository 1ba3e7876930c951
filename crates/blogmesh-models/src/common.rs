use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Length rule applied to the value as it will be stored, i.e. trimmed.
/// Counts characters, like the `length` rule.
pub fn trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.message = Some(message.into());
        return Err(error);
    }
    Ok(())
}
