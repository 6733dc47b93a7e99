use thiserror::Error;

use crate::types::ErrorResult;

/// Message surfaced when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Error, Debug)]
pub enum BankError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Failure reported by the service in an `{"error": ...}` body.
    #[error("{0}")]
    Service(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

impl From<BankError> for ErrorResult {
    fn from(err: BankError) -> Self {
        let message = match err {
            BankError::Service(message) => message,
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            ErrorResult::new(UNKNOWN_ERROR)
        } else {
            ErrorResult::new(message)
        }
    }
}
