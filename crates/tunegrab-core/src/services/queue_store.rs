//! The authoritative queue.
//!
//! Items are keyed by URL and kept in insertion order. Every operation is
//! synchronous and holds the write lock for exactly one mutation, so readers
//! see either the state before or after it, never a half-applied item.
//! A [`QueueChange`] is published after each mutation, while the lock is
//! still held, so subscribers observe changes in mutation order.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tokio::sync::broadcast;

use crate::download::{ItemPatch, QueueChange, QueueItem, QueueSnapshot, ValidationError};
use crate::validation::{can_add, normalize_candidate};

/// Number of change notifications buffered per subscriber.
///
/// Slow subscribers that fall further behind miss notifications and should
/// resynchronize from [`QueueStore::snapshot`].
pub const DEFAULT_CHANGE_CAPACITY: usize = 256;

/// Ordered, URL-keyed collection of queue items.
#[derive(Debug)]
pub struct QueueStore {
    items: RwLock<IndexMap<String, QueueItem>>,
    changes: broadcast::Sender<QueueChange>,
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueStore {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_change_capacity(DEFAULT_CHANGE_CAPACITY)
    }

    /// Create an empty queue with a custom notification buffer.
    #[must_use]
    pub fn with_change_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity.max(1));
        Self {
            items: RwLock::new(IndexMap::new()),
            changes,
        }
    }

    // A panic mid-mutation cannot leave the map inconsistent: every mutation
    // is a single IndexMap call, so a poisoned lock is safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, QueueItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, QueueItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, change: QueueChange) {
        // No subscribers is fine
        let _ = self.changes.send(change);
    }

    /// Subscribe to change notifications.
    ///
    /// Only changes made after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueChange> {
        self.changes.subscribe()
    }

    /// Validate a user-supplied URL and append it.
    ///
    /// Validation and insertion happen under one lock, so two concurrent
    /// submissions of the same URL cannot both succeed. Returns the stored
    /// (trimmed) key.
    pub fn submit(&self, candidate: &str) -> Result<String, ValidationError> {
        let mut items = self.write();
        can_add(candidate, items.keys())?;

        let url = normalize_candidate(candidate).to_string();
        let item = QueueItem::new(url.clone());
        items.insert(url.clone(), item.clone());
        tracing::debug!(target: "tunegrab.queue", url = %url, position = items.len(), "Queued");
        self.publish(QueueChange::Added { item });
        Ok(url)
    }

    /// Append a new `Pending` item.
    ///
    /// Callers are expected to have run the validator; the store only
    /// re-asserts key uniqueness.
    pub fn add(&self, url: impl Into<String>) -> Result<(), ValidationError> {
        let url = url.into();
        let mut items = self.write();
        if items.contains_key(&url) {
            return Err(ValidationError::duplicate(url));
        }

        let item = QueueItem::new(url.clone());
        items.insert(url, item.clone());
        self.publish(QueueChange::Added { item });
        Ok(())
    }

    /// Remove the item with this URL.
    ///
    /// Idempotent: removing an absent URL is a no-op and publishes nothing.
    /// Returns whether an item was removed.
    pub fn remove(&self, url: &str) -> bool {
        let mut items = self.write();
        if items.shift_remove(url).is_none() {
            return false;
        }

        tracing::debug!(target: "tunegrab.queue", url = %url, "Removed");
        self.publish(QueueChange::Removed {
            url: url.to_string(),
        });
        true
    }

    /// Remove every item. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut items = self.write();
        let removed = items.len();
        items.clear();

        tracing::debug!(target: "tunegrab.queue", removed, "Cleared");
        self.publish(QueueChange::Cleared);
        removed
    }

    /// Overwrite progress, status and error of the item with this URL.
    ///
    /// Silently ignored when the URL is not queued (it may have been removed
    /// while the engine was still working on it). Returns whether an item
    /// was updated.
    pub fn update_by_url(&self, url: &str, patch: &ItemPatch) -> bool {
        let mut items = self.write();
        let Some(item) = items.get_mut(url) else {
            return false;
        };

        item.apply(patch);
        let item = item.clone();
        self.publish(QueueChange::Updated { item });
        true
    }

    /// Immutable ordered copy of the queue.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot::new(self.read().values().cloned().collect())
    }

    /// Get a copy of the item with this URL.
    pub fn get(&self, url: &str) -> Option<QueueItem> {
        self.read().get(url).cloned()
    }

    /// Check if the URL is queued.
    pub fn contains(&self, url: &str) -> bool {
        self.read().contains_key(url)
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
