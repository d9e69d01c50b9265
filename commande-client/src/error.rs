//! Client error types

use http::StatusCode;
use shared::ValidationReport;
use shared::models::StatutRetour;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    // ---- Raised locally ----
    /// Pre-flight validation found blocking errors; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// The response held no entity with a uuid
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create call accepted but no created entity came back
    #[error("Creation failed: {0}")]
    Creation(String),

    /// Return status change not allowed from the current status
    #[error("Invalid return transition: {from} -> {to}")]
    InvalidTransition { from: StatutRetour, to: StatutRetour },

    // ---- Transport, propagated unchanged ----
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Structured error body returned by the API
    #[error("API error {status}: {message}")]
    Api {
        status: StatusCode,
        code: Option<i32>,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Any other non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    // ---- Decoding ----
    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Failure of the request itself rather than of this layer's checks
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_)
                | ClientError::Unauthorized(_)
                | ClientError::Api { .. }
                | ClientError::Status { .. }
                | ClientError::Internal(_)
        )
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status { status, .. } => Some(*status),
            ClientError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Report carried by a validation failure
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            ClientError::Validation(report) => Some(report),
            _ => None,
        }
    }
}

/// Error body format of the API
#[derive(serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<i32>,
    pub message: String,
    #[serde(default, alias = "errors")]
    pub details: Option<serde_json::Value>,
}

/// Map a non-2xx response to an error
pub(crate) fn error_from_status(status: StatusCode, text: String) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized(text);
    }
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
        return ClientError::Api {
            status,
            code: api_err.code,
            message: api_err.message,
            details: api_err.details,
        };
    }
    ClientError::Status { status, body: text }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
