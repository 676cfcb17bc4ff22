//! Execution engine trait definition.
//!
//! This port is the request/response half of the engine boundary: one call
//! per batch, resolved once the engine is done with the whole batch.
//! Per-item progress never travels through it; the engine reports that
//! through a [`ProgressEmitterPort`](super::ProgressEmitterPort) it was
//! constructed with.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::download::DownloadOptions;

/// Batch-level engine failure.
///
/// Anything that makes the whole batch impossible lands here: the engine is
/// not installed, could not be started, or hit a systemic fault. A single
/// URL failing is not an `EngineError`.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum EngineError {
    /// The engine program is missing.
    #[error("{0}")]
    Unavailable(String),

    /// The engine process could not be started.
    #[error("Failed to start engine: {0}")]
    SpawnFailed(String),

    /// I/O error while talking to the engine.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// General/uncategorized error.
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create an I/O error from a `std::io::Error`.
    ///
    /// This captures the error kind name and message for serialization.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }
}

/// The out-of-process component that retrieves and converts media.
///
/// # Design Rules
///
/// - `dispatch_batch` must accept any non-empty URL list
/// - It resolves only when the engine considers the batch finished
/// - `Err` means the batch as a whole failed, never a single URL
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// Run one batch covering `urls` with a snapshot of `options`.
    async fn dispatch_batch(
        &self,
        urls: Vec<String>,
        options: DownloadOptions,
    ) -> Result<(), EngineError>;

    /// Whether the engine is installed.
    ///
    /// Only used to warn the user at startup; a `false` here does not block
    /// queueing or dispatch attempts.
    async fn is_available(&self) -> bool;
}
