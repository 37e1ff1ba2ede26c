//! Error types for the reminder store and client.

use thiserror::Error;

/// A reminder form that cannot be sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

impl ValidationError {
    /// Short heading for the popup that reports this error.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "Missing Fields",
            ValidationError::InvalidDate(_) => "Invalid Date",
            ValidationError::InvalidTime(_) => "Invalid Time",
        }
    }
}

/// Failures talking to the remote reminder service.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request timed out")]
    Timeout,

    #[error("Could not connect to {0}")]
    Connect(String),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("HTTP request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_connect() {
            StoreError::Connect(
                e.url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "server".to_string()),
            )
        } else if let Some(status) = e.status() {
            StoreError::Status(status.as_u16())
        } else if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

/// Outcome of a client operation that did not go through.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
