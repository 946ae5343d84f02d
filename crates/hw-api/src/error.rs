//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hw_core::VerifyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request (malformed signature header, undecodable payload).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthorized (missing authentication material).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request body's content type is not supported.
    #[error("Unsupported content type: {0}")]
    UnsupportedMediaType(String),

    /// Webhook signature verification failed.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidSignature => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            ApiError::InvalidSignature => "INVALID_SIGNATURE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::UnsupportedContentType(ct) => ApiError::UnsupportedMediaType(ct),
            VerifyError::MissingSignature => {
                ApiError::Unauthorized("missing signature header".to_string())
            }
            // The mismatch message stays generic so nothing about the
            // expected digest reaches the response.
            VerifyError::SignatureMismatch => ApiError::InvalidSignature,
            err @ (VerifyError::MalformedSignature(_)
            | VerifyError::UnsupportedAlgorithm(_)
            | VerifyError::BodyRead(_)) => ApiError::BadRequest(err.to_string()),
        }
    }
}
