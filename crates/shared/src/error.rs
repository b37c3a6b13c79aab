//! Shared error types: the server's error envelope and the client-side `ApiError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error envelope returned by every non-2xx `/api/*` reply.
///
/// Clients do not parse it (only the status code is surfaced), but it keeps the
/// server's failures readable in logs and tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered outside the 200..=299 range.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    /// The body could not be encoded or decoded as the expected JSON shape.
    #[error("Invalid response: {0}")]
    Decode(String),
    /// A 2xx reply carrying `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for inline display on a screen.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Нет соединения с сервером".to_string(),
            ApiError::Http { status: 403 } => "Требуется Premium подписка".to_string(),
            ApiError::Http { status: 404 } => "Не найдено".to_string(),
            ApiError::Rejected(msg) if msg.trim().is_empty() => "Произошла ошибка".to_string(),
            ApiError::Rejected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
