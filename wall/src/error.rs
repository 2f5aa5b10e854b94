//! Error types for the wall client
//!
//! This module defines error types for each collaborator:
//! - `PostError`: Tweet creation endpoint errors
//! - `FeedError`: Feed service errors (history reads and live subscriptions)
//! - `HistoryError`: A failed history read, tagged with its feed
//! - `ConfigError`: Missing or malformed configuration

use thiserror::Error;

use crate::domain::entities::{FeedKind, PostFailure};

/// Tweet creation errors
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} {status_text}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl PostError {
    /// Diagnostics to log for a failed post
    pub fn diagnostics(&self) -> PostFailure {
        match self {
            PostError::Request(e) => {
                let status_text = if e.is_timeout() { "timeout" } else { "error" };
                PostFailure {
                    response: None,
                    status_text: status_text.to_string(),
                    error: e.to_string(),
                }
            }
            PostError::Api {
                status_text, body, ..
            } => PostFailure {
                response: Some(body.clone()),
                status_text: status_text.clone(),
                error: self.to_string(),
            },
        }
    }
}

/// Feed service errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid feed token")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Subscription rejected: {0}")]
    Rejected(String),

    #[error("Connection closed")]
    Closed,

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),
}

/// A failed history read
#[derive(Debug, Error)]
#[error("Failed to load {kind} feed history: {source}")]
pub struct HistoryError {
    pub kind: FeedKind,
    #[source]
    pub source: FeedError,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
