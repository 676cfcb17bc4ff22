//! Queue item types.

use serde::{Deserialize, Serialize};

use super::events::ProgressEvent;

/// Status label given to freshly queued items.
pub const PENDING_LABEL: &str = "Pending";

/// Status label the engine reports for a finished item.
pub const COMPLETED_LABEL: &str = "Completed";

/// Display state of a queued item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Queued, no progress reported yet.
    Pending,
    /// The engine is working on it.
    Downloading,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
}

impl ItemStatus {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// `Completed` or `Failed`.
    ///
    /// Terminal items are not expected to change again, but nothing here
    /// prevents a later event from moving them.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Derive the status from an engine report.
    ///
    /// An error payload is the only way into `Failed`. Without one, the exact
    /// labels `"Completed"` and `"Pending"` map to their variants and every
    /// other label (`"Starting download..."`, `"Downloading... 42%"`) means
    /// the item is in progress.
    #[must_use]
    pub fn from_report(label: &str, error: Option<&str>) -> Self {
        if error.is_some() {
            return Self::Failed;
        }
        match label.trim() {
            COMPLETED_LABEL => Self::Completed,
            PENDING_LABEL => Self::Pending,
            _ => Self::Downloading,
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single URL in the queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique key; also correlates out-of-band progress events.
    pub url: String,

    /// Percentage in `[0, 100]`. Not guaranteed to be monotonic.
    pub progress: f32,

    /// Derived display state.
    pub status: ItemStatus,

    /// Label as last reported by the engine.
    pub status_text: String,

    /// Error message; present only when `status` is `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueueItem {
    /// Create a new item in the `Pending` state.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            progress: 0.0,
            status: ItemStatus::Pending,
            status_text: PENDING_LABEL.to_string(),
            error: None,
        }
    }

    /// Overwrite the mutable fields with `patch`.
    pub fn apply(&mut self, patch: &ItemPatch) {
        self.progress = patch.progress;
        self.status = patch.status;
        self.status_text.clone_from(&patch.status_text);
        self.error.clone_from(&patch.error);
    }

    /// Whether the item reached `Completed` or `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Full replacement for the mutable part of a [`QueueItem`].
///
/// Built from a progress event; every field is written, none are merged.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemPatch {
    pub progress: f32,
    pub status: ItemStatus,
    pub status_text: String,
    pub error: Option<String>,
}

impl ItemPatch {
    /// Build a patch from a progress event, clamping the percentage.
    #[must_use]
    pub fn from_event(event: &ProgressEvent) -> Self {
        Self {
            progress: event.progress.clamp(0.0, 100.0),
            status: ItemStatus::from_report(&event.status, event.error.as_deref()),
            status_text: event.status.clone(),
            error: event.error.clone(),
        }
    }
}

impl From<&ProgressEvent> for ItemPatch {
    fn from(event: &ProgressEvent) -> Self {
        Self::from_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_pending() {
        let item = QueueItem::new("https://youtu.be/abc123");
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.status_text, "Pending");
        assert!(item.progress.abs() < f32::EPSILON);
        assert!(item.error.is_none());
    }

    #[test]
    fn test_status_from_report() {
        assert_eq!(
            ItemStatus::from_report("Downloading...", None),
            ItemStatus::Downloading
        );
        assert_eq!(
            ItemStatus::from_report("Starting download...", None),
            ItemStatus::Downloading
        );
        assert_eq!(
            ItemStatus::from_report("Completed", None),
            ItemStatus::Completed
        );
        assert_eq!(ItemStatus::from_report("Pending", None), ItemStatus::Pending);
        assert_eq!(
            ItemStatus::from_report("Failed", Some("Download failed")),
            ItemStatus::Failed
        );
        // No error payload, no failure
        assert_eq!(
            ItemStatus::from_report("Failed", None),
            ItemStatus::Downloading
        );
    }

    #[test]
    fn test_apply_overwrites_error() {
        let mut item = QueueItem::new("u");
        item.apply(&ItemPatch::from_event(&ProgressEvent::failed("u", "boom")));
        assert_eq!(item.status, ItemStatus::Failed);
        assert_eq!(item.error.as_deref(), Some("boom"));

        item.apply(&ItemPatch::from_event(&ProgressEvent::downloading("u", 12.0)));
        assert_eq!(item.status, ItemStatus::Downloading);
        assert!(item.error.is_none());
        assert!((item.progress - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_patch_clamps_progress() {
        let patch = ItemPatch::from_event(&ProgressEvent::new("u", 140.0, "Downloading..."));
        assert!((patch.progress - 100.0).abs() < f32::EPSILON);

        let patch = ItemPatch::from_event(&ProgressEvent::new("u", -3.0, "Downloading..."));
        assert!(patch.progress.abs() < f32::EPSILON);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ItemStatus::Completed.is_terminal());
        assert!(ItemStatus::Failed.is_terminal());
        assert!(!ItemStatus::Pending.is_terminal());
        assert!(!ItemStatus::Downloading.is_terminal());
    }
}
