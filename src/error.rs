//! Error taxonomy shared by every layer of the service.
//!
//! Client input errors ([`AppError::InvalidUrl`], [`AppError::InvalidCode`],
//! [`AppError::InvalidRequest`]) are reported as-is. [`AppError::NotFound`] is an
//! expected outcome rather than a fault. [`AppError::StorageUnavailable`] keeps the
//! underlying cause as its source for logging, but its HTTP rendering never
//! exposes that text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Opaque cause attached to [`AppError::StorageUnavailable`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description embedded in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Code must be 6-8 letters or digits: {code:?}")]
    InvalidCode { code: String },

    #[error("Code already exists: {code}")]
    CodeConflict { code: String },

    #[error("Short link not found: {code}")]
    NotFound { code: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String, details: Value },

    #[error("Storage unavailable: {context}")]
    StorageUnavailable {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn invalid_code(code: impl Into<String>) -> Self {
        Self::InvalidCode { code: code.into() }
    }

    pub fn code_conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn invalid_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            details,
        }
    }

    /// Wraps a storage failure, naming the operation that was in flight.
    pub fn storage(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::StorageUnavailable {
            context,
            source: source.into(),
        }
    }

    /// Stable identifier of the error kind, used in response bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidCode { .. } => "invalid_code",
            AppError::CodeConflict { .. } => "code_conflict",
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidRequest { .. } => "validation_error",
            AppError::StorageUnavailable { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidCode { .. }
            | AppError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing description of this error.
    ///
    /// Storage failures collapse to a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidUrl { url } => ("Invalid URL".to_string(), json!({ "url": url })),
            AppError::InvalidCode { code } => (
                "Code must be 6-8 letters/numbers".to_string(),
                json!({ "code": code }),
            ),
            AppError::CodeConflict { code } => {
                ("Code already exists".to_string(), json!({ "code": code }))
            }
            AppError::NotFound { code } => ("Not found".to_string(), json!({ "code": code })),
            AppError::InvalidRequest { message, details } => (message.clone(), details.clone()),
            AppError::StorageUnavailable { .. } => ("Server error".to_string(), json!({})),
        };

        ErrorInfo {
            code: self.kind(),
            message,
            details,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or(Value::Null);
        AppError::invalid_request("Request validation failed", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::StorageUnavailable { context, source } = &self {
            tracing::error!(error = %source, context, "Storage operation failed");
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
