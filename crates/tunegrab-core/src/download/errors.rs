//! Error types for queue submissions and batch dispatch.
//!
//! These errors are serializable so a host (CLI, desktop shell, web) can
//! forward them to its presentation layer unchanged. None of them is fatal:
//! each leaves the queue intact for the caller to retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of a URL submitted to the queue.
///
/// The queue is unchanged whenever one of these is returned.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty or only whitespace.
    #[error("URL is empty")]
    EmptyInput,

    /// The input does not look like a supported video platform URL.
    #[error("Unsupported host: {url}")]
    UnsupportedHost {
        /// The rejected input (trimmed).
        url: String,
    },

    /// The URL is already in the queue.
    #[error("Already queued: {url}")]
    DuplicateUrl {
        /// The URL that's already in the queue.
        url: String,
    },
}

impl ValidationError {
    /// Create an unsupported host error.
    pub fn unsupported_host(url: impl Into<String>) -> Self {
        Self::UnsupportedHost { url: url.into() }
    }

    /// Create a duplicate URL error.
    pub fn duplicate(url: impl Into<String>) -> Self {
        Self::DuplicateUrl { url: url.into() }
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Please enter a URL.".to_string(),
            Self::UnsupportedHost { url } => {
                format!("'{url}' is not a valid YouTube URL.")
            }
            Self::DuplicateUrl { url } => {
                format!("'{url}' has already been added.")
            }
        }
    }
}

/// Failure of a whole batch dispatch.
///
/// Per-item failures are not reported here; they arrive as progress events.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DispatchError {
    /// Nothing to dispatch; the engine was not called.
    #[error("Queue is empty")]
    EmptyQueue,

    /// A previous batch has not finished; the engine was not called.
    #[error("A batch is already in flight")]
    AlreadyInFlight,

    /// The engine rejected the batch as a whole.
    #[error("Engine failure: {0}")]
    EngineFailure(String),
}

impl DispatchError {
    /// Create an engine failure error.
    pub fn engine_failure(message: impl Into<String>) -> Self {
        Self::EngineFailure(message.into())
    }

    /// Check if the caller could succeed by simply trying again later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::AlreadyInFlight | Self::EngineFailure(_))
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQueue => "Please add at least one URL.".to_string(),
            Self::AlreadyInFlight => {
                "A download batch is already running. Wait for it to finish.".to_string()
            }
            Self::EngineFailure(message) => format!("Error: {message}"),
        }
    }
}
