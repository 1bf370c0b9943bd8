//! Error types for moodcover-gen
//!
//! `CoverError` is the taxonomy used by the clients and the core;
//! `ApiError` maps it onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the cover-generation flow
#[derive(Debug, Error)]
pub enum CoverError {
    /// Upstream unreachable or answered with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Preview audio could not be fetched
    #[error("Download failed: {0}")]
    Download(String),

    /// Downloaded bytes are not decodable audio
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Image endpoint answered with a non-200 status
    #[error("Image generation failed (status {status})")]
    Generation { status: u16 },

    /// No selected track yielded audio features
    #[error("Not enough audio data to analyze the selection")]
    EmptySelection,

    /// Missing credential or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<moodcover_common::Error> for CoverError {
    fn from(err: moodcover_common::Error) -> Self {
        match err {
            moodcover_common::Error::Config(msg) => CoverError::Config(msg),
            io @ moodcover_common::Error::Io(_) => CoverError::Config(io.to_string()),
        }
    }
}

pub type CoverResult<T> = Result<T, CoverError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Selection has no analyzable audio (422)
    #[error("{0}")]
    InsufficientData(String),

    /// Image service refused the prompt (502)
    #[error("{0}")]
    GenerationFailed(String),

    /// Catalog or preview service failed (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Credential missing (503)
    #[error("{0}")]
    NotConfigured(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CoverError> for ApiError {
    fn from(err: CoverError) -> Self {
        let message = err.to_string();
        match err {
            CoverError::EmptySelection => ApiError::InsufficientData(message),
            CoverError::Generation { .. } => ApiError::GenerationFailed(message),
            CoverError::Network(_) | CoverError::Download(_) => ApiError::Upstream(message),
            CoverError::Decode(_) => ApiError::Internal(message),
            CoverError::Config(_) => ApiError::NotConfigured(message),
            CoverError::InvalidInput(_) => ApiError::BadRequest(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::InsufficientData(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_DATA")
            }
            ApiError::GenerationFailed(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
