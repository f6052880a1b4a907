use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Database errors might contain sensitive schema information
            Error::Database(_) => "Database operation failed".to_string(),
            Error::Migration(_) => "Database migration failed".to_string(),

            // HTTP errors might contain internal URLs
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password") || lower.contains("secret") || lower.contains("token")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Json(_) => "Malformed JSON".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::Cancelled => "Search cancelled".to_string(),
        }
    }

    /// Whether the failure was caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound(_) | Error::Json(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::debug!("Request rejected: {}", self.log_safe());
        } else {
            tracing::error!("Request error: {}", self.log_safe());
        }

        let (status, error_message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Json(_) => (StatusCode::BAD_REQUEST, "Malformed JSON".to_string()),
            Error::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Search timed out".to_string(),
            ),
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Error::Http(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
