//! Queue snapshot DTO.
//!
//! This type is "UI safe" - Clone + Debug + Serialize + Deserialize with no
//! infrastructure dependencies. It is what the dispatcher reads and what a
//! presentation layer renders.

use serde::{Deserialize, Serialize};

use super::types::{ItemStatus, QueueItem};

/// Immutable, ordered copy of the queue at one instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Items in insertion order.
    pub items: Vec<QueueItem>,
}

impl QueueSnapshot {
    /// Create a snapshot from items already in order.
    #[must_use]
    pub const fn new(items: Vec<QueueItem>) -> Self {
        Self { items }
    }

    /// Check if the queue was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Get an item by its URL.
    pub fn get(&self, url: &str) -> Option<&QueueItem> {
        self.items.iter().find(|item| item.url == url)
    }

    /// URLs in queue order.
    pub fn urls(&self) -> Vec<String> {
        self.items.iter().map(|item| item.url.clone()).collect()
    }

    /// Number of items currently in `status`.
    pub fn count(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    /// Check if every item reached a terminal status.
    pub fn all_terminal(&self) -> bool {
        self.items.iter().all(QueueItem::is_terminal)
    }
}
