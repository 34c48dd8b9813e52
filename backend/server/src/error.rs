use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::inference::InferenceError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No image provided")]
    MissingImage,

    #[error("Malformed image payload")]
    MalformedImage,

    #[error("Image too large")]
    PayloadTooLarge,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // caller only ever sees the generic message
    #[error("Failed to analyze mood")]
    Inference(#[from] InferenceError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(ValidationError::PayloadTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(source) => {
                warn!("Mood inference failed: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Secret {0} not found in environment or secrets directory")]
    MissingSecret(String),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status() {
        let response = AppError::from(ValidationError::MissingImage).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(ValidationError::PayloadTooLarge).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_inference_message_is_generic() {
        let error = AppError::from(InferenceError::Status {
            status: 429,
            body: "quota exceeded for key AIza...".to_string(),
        });

        assert_eq!(error.to_string(), "Failed to analyze mood");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
