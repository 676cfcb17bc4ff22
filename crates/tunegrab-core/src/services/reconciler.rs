//! Applies the engine's progress stream to the queue.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::download::{ItemPatch, PROGRESS_CHANNEL, ProgressEvent};
use crate::ports::ProgressReceiver;
use crate::services::QueueStore;

/// Consumer of inbound progress events.
///
/// Events are applied one at a time in delivery order, each as a single
/// `update_by_url` call. Events for URLs that are no longer queued are
/// discarded.
pub struct ProgressReconciler;

impl ProgressReconciler {
    /// Apply one event to the store.
    ///
    /// Returns `false` when the event was discarded (unknown URL or
    /// non-finite progress).
    pub fn apply(store: &QueueStore, event: &ProgressEvent) -> bool {
        if !event.is_well_formed() {
            tracing::debug!(
                target: "tunegrab.reconciler",
                url = %event.url,
                "Dropping malformed progress event"
            );
            return false;
        }

        let applied = store.update_by_url(&event.url, &ItemPatch::from_event(event));
        if !applied {
            tracing::trace!(
                target: "tunegrab.reconciler",
                url = %event.url,
                status = %event.status,
                "Event for unknown url discarded"
            );
        }
        applied
    }

    /// Start the long-lived reconciliation task.
    ///
    /// Must be called from within a tokio runtime. The task ends when the
    /// handle is shut down (or dropped) or when every emitter is gone.
    /// Events already buffered at shutdown are still applied.
    pub fn spawn(store: Arc<QueueStore>, receiver: ProgressReceiver) -> ReconcilerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(Self::run(store, receiver, cancel.clone()));
        ReconcilerHandle {
            cancel,
            task: Some(task),
        }
    }

    async fn run(store: Arc<QueueStore>, mut receiver: ProgressReceiver, cancel: CancellationToken) {
        tracing::debug!(target: "tunegrab.reconciler", channel = PROGRESS_CHANNEL, "Reconciler started");
        let mut applied: u64 = 0;

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    // Apply what was already delivered, accept nothing new
                    receiver.close();
                    while let Some(event) = receiver.try_recv() {
                        if Self::apply(&store, &event) {
                            applied += 1;
                        }
                    }
                    break;
                }

                event = receiver.recv() => {
                    let Some(event) = event else { break };
                    if Self::apply(&store, &event) {
                        applied += 1;
                    }
                }
            }
        }

        tracing::debug!(target: "tunegrab.reconciler", applied, "Reconciler stopped");
    }
}

/// Owner of a running reconciliation task.
///
/// Dropping the handle cancels the task without waiting for it.
#[derive(Debug)]
pub struct ReconcilerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ReconcilerHandle {
    /// Stop the task and wait for it to release the channel.
    ///
    /// Every event emitted before this call has been applied once it
    /// returns.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(target: "tunegrab.reconciler", error = %e, "Reconciler task panicked");
            }
        }
    }

    /// Whether the task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for ReconcilerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::ItemStatus;

    #[test]
    fn test_apply_known_url() {
        let store = QueueStore::new();
        store.add("https://youtu.be/a").unwrap();

        assert!(ProgressReconciler::apply(
            &store,
            &ProgressEvent::downloading("https://youtu.be/a", 12.5)
        ));
        assert_eq!(
            store.get("https://youtu.be/a").unwrap().status,
            ItemStatus::Downloading
        );
    }

    #[test]
    fn test_apply_unknown_url_is_discarded() {
        let store = QueueStore::new();
        assert!(!ProgressReconciler::apply(
            &store,
            &ProgressEvent::completed("https://youtu.be/gone")
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_drops_nan_progress() {
        let store = QueueStore::new();
        store.add("https://youtu.be/a").unwrap();

        assert!(!ProgressReconciler::apply(
            &store,
            &ProgressEvent::new("https://youtu.be/a", f32::NAN, "Downloading...")
        ));
        assert_eq!(
            store.get("https://youtu.be/a").unwrap().status,
            ItemStatus::Pending
        );
    }
}
