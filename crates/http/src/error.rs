//! Error handling for the bookshelf HTTP layer.
//!
//! Every failure that escapes a handler ends up here and is rendered as the
//! shared error page. Caller-facing failures show their own message; anything
//! else shows [`UNEXPECTED_ERROR_MESSAGE`] and is only described in the logs.

use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::{Timestamp, Uuid};

use crate::view;

/// Message shown for every failure whose details must not reach the page.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "an unexpected error occurred";

/// Application error types that map to rendered error pages
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &str {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::BadRequest { code, .. } => code,
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Message that is safe to put on the error page.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation { message, .. } | AppError::NotFound { message, .. } => message,
            AppError::BadRequest { .. } | AppError::Internal(_) => UNEXPECTED_ERROR_MESSAGE,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let timestamp = OffsetDateTime::now_utc().to_string();

        match &self {
            AppError::Validation { .. } | AppError::NotFound { .. } => tracing::warn!(
                error_id = %error_id,
                error_code = %self.code(),
                error = %self,
                "Request rejected"
            ),
            AppError::BadRequest { .. } | AppError::Internal(_) => tracing::error!(
                error_id = %error_id,
                error_code = %self.code(),
                error = ?self,
                "Request error"
            ),
        }

        // Error pages are ordinary rendered views.
        let page = view::error_page(self.public_message(), &error_id.to_string(), &timestamp);
        (StatusCode::OK, page).into_response()
    }
}
