//! Typed errors and HTTP mapping.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing reference: {role} '{id}'")]
    MissingReference { role: &'static str, id: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("invalid setting {key}={value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("Not a JSON")]
    NotJson,
    #[error("Missing {0}")]
    MissingField(String),
    #[error("Invalid {0}")]
    InvalidField(String),
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("storage: {0}")]
    Store(#[from] StoreError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotJson | AppError::MissingField(_) | AppError::InvalidField(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_) | AppError::Store(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "Not found".to_string(),
            AppError::NotJson
            | AppError::MissingField(_)
            | AppError::InvalidField(_)
            | AppError::PayloadTooLarge => self.to_string(),
            AppError::Config(_) | AppError::Store(_) | AppError::Serialization(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
