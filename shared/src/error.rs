//! Failure taxonomy for customer store operations.
//!
//! HTTP statuses are classified into a handful of kinds so the view can show
//! guidance instead of a raw status dump. The original status and message
//! stay available for logging.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable classification of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    AccessDenied,
    NotFound,
    InvalidSchema,
    GenericHttp,
    Network,
    InvalidResponse,
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AccessDenied => "access-denied",
            ErrorKind::NotFound => "not-found",
            ErrorKind::InvalidSchema => "invalid-schema",
            ErrorKind::GenericHttp => "generic-http",
            ErrorKind::Network => "network",
            ErrorKind::InvalidResponse => "invalid-response",
            ErrorKind::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a customer store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// HTTP 401 or 403
    #[error("Access denied. Please check your API token and base permissions.")]
    AccessDenied { status: u16, message: String },

    /// HTTP 404
    #[error("Base or table not found. Please verify your base ID and table name.")]
    NotFound { status: u16, message: String },

    /// HTTP 422
    #[error("Invalid table structure. Please check that the table and its fields exist.")]
    InvalidSchema { status: u16, message: String },

    /// Any other non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// No response was received
    #[error("Network error: {0}")]
    Transport(String),

    /// A response arrived but could not be decoded
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// Rejected client-side before any request
    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    /// Classify a non-2xx status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => StoreError::AccessDenied { status, message },
            404 => StoreError::NotFound { status, message },
            422 => StoreError::InvalidSchema { status, message },
            _ => StoreError::Http { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::AccessDenied { .. } => ErrorKind::AccessDenied,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::InvalidSchema { .. } => ErrorKind::InvalidSchema,
            StoreError::Http { .. } => ErrorKind::GenericHttp,
            StoreError::Transport(_) => ErrorKind::Network,
            StoreError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            StoreError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// HTTP status when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::AccessDenied { status, .. }
            | StoreError::NotFound { status, .. }
            | StoreError::InvalidSchema { status, .. }
            | StoreError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message as reported by the remote side or the transport
    pub fn message(&self) -> &str {
        match self {
            StoreError::AccessDenied { message, .. }
            | StoreError::NotFound { message, .. }
            | StoreError::InvalidSchema { message, .. }
            | StoreError::Http { message, .. } => message,
            StoreError::Transport(message)
            | StoreError::InvalidResponse(message)
            | StoreError::Validation(message) => message,
        }
    }
}
