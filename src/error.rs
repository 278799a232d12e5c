//! Error types and handling for the `SeaGuard` service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `SeaGuard` service
#[derive(Error, Debug)]
pub enum SeaGuardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Failures while scoring or aggregating a decision
    #[error("Evaluation error: {message}")]
    Evaluation { message: String },
}

impl SeaGuardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new evaluation error
    pub fn evaluation<S: Into<String>>(message: S) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SeaGuardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SeaGuardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SeaGuardError::Evaluation { message } => {
                format!("Unable to assess conditions: {message}")
            }
        }
    }

    /// HTTP status used when this error reaches the web layer
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            SeaGuardError::Validation { .. } => StatusCode::BAD_REQUEST,
            SeaGuardError::Evaluation { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SeaGuardError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SeaGuardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "detail": self.user_message() }))).into_response()
    }
}
