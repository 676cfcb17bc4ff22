//! Progress events coming in from the engine, and change notifications
//! going out of the queue.

use serde::{Deserialize, Serialize};

use super::types::{COMPLETED_LABEL, QueueItem};

/// Channel name progress payloads are delivered on.
pub const PROGRESS_CHANNEL: &str = "download-progress";

/// Label the engine reports before any progress is known.
pub const STARTING_LABEL: &str = "Starting download...";

/// Label the engine reports for a failed item.
pub const FAILED_LABEL: &str = "Failed";

/// Snapshot of one item's state as reported by the engine.
///
/// Each event is authoritative for its URL at the instant it was sent: it
/// replaces `progress`, status and `error` wholesale.
///
/// Wire shape:
///
/// ```json
/// { "url": "https://youtu.be/abc123", "progress": 42.0, "status": "Downloading... 42%" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// URL of the item this event belongs to.
    pub url: String,
    /// Percentage in `[0, 100]`.
    pub progress: f32,
    /// Free-form status label.
    pub status: String,
    /// Error message; its presence marks the item failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    /// Create an event without an error.
    pub fn new(url: impl Into<String>, progress: f32, status: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            progress,
            status: status.into(),
            error: None,
        }
    }

    /// The engine picked up this URL.
    pub fn starting(url: impl Into<String>) -> Self {
        Self::new(url, 0.0, STARTING_LABEL)
    }

    /// Intermediate progress.
    pub fn downloading(url: impl Into<String>, percent: f32) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "percent is clamped to 0..=100 before the cast"
        )]
        let whole = percent.clamp(0.0, 100.0) as u32;
        Self::new(url, percent, format!("Downloading... {whole}%"))
    }

    /// The URL finished successfully.
    pub fn completed(url: impl Into<String>) -> Self {
        Self::new(url, 100.0, COMPLETED_LABEL)
    }

    /// The URL failed.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            progress: 0.0,
            status: FAILED_LABEL.to_string(),
            error: Some(error.into()),
        }
    }

    /// Parse a serialized payload.
    ///
    /// Anything that does not have the expected shape yields `None`; callers
    /// drop such payloads instead of treating them as errors.
    #[must_use]
    pub fn from_json(payload: &str) -> Option<Self> {
        serde_json::from_str::<Self>(payload)
            .ok()
            .filter(Self::is_well_formed)
    }

    /// Whether the payload carries a usable percentage.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.progress.is_finite()
    }
}

/// Notification published by the queue after each mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueChange {
    /// An item was appended.
    Added {
        /// The new item.
        item: QueueItem,
    },
    /// An item's progress, status or error changed.
    Updated {
        /// The item after the update.
        item: QueueItem,
    },
    /// An item was removed.
    Removed {
        /// Key of the removed item.
        url: String,
    },
    /// The queue was emptied.
    Cleared,
}

impl QueueChange {
    /// URL affected by this change, if it concerns a single item.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Added { item } | Self::Updated { item } => Some(&item.url),
            Self::Removed { url } => Some(url),
            Self::Cleared => None,
        }
    }
}
