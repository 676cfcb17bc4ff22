//! Batch dispatch.
//!
//! A batch is the set of URLs in the queue at the moment of dispatch. The
//! coordinator hands that snapshot and a snapshot of the options to the
//! engine in one call and waits for it. Per-item outcomes are not its
//! concern; they come back through the progress channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::download::DispatchError;
use crate::ports::DownloadEngine;
use crate::services::{QueueStore, SettingsStore};

/// Sends the queue to the engine, one batch at a time.
pub struct DispatchCoordinator {
    queue: Arc<QueueStore>,
    settings: Arc<SettingsStore>,
    engine: Arc<dyn DownloadEngine>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for DispatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchCoordinator")
            .field("in_flight", &self.is_in_flight())
            .finish_non_exhaustive()
    }
}

impl DispatchCoordinator {
    /// Create a coordinator over the given queue, settings and engine.
    pub fn new(
        queue: Arc<QueueStore>,
        settings: Arc<SettingsStore>,
        engine: Arc<dyn DownloadEngine>,
    ) -> Self {
        Self {
            queue,
            settings,
            engine,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a batch is currently with the engine.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Dispatch every queued URL as one batch.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::EmptyQueue`] if nothing is queued
    /// - [`DispatchError::AlreadyInFlight`] if a previous batch is unfinished
    /// - [`DispatchError::EngineFailure`] if the engine rejected the batch
    ///
    /// The engine is not called in the first two cases. The queue is left
    /// untouched in every case, so a failed batch can simply be retried.
    pub async fn dispatch_all(&self) -> Result<(), DispatchError> {
        let snapshot = self.queue.snapshot();
        if snapshot.is_empty() {
            return Err(DispatchError::EmptyQueue);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!(target: "tunegrab.dispatch", "Dispatch rejected, batch in flight");
            return Err(DispatchError::AlreadyInFlight);
        };

        let urls = snapshot.urls();
        let options = self.settings.current();
        tracing::info!(
            target: "tunegrab.dispatch",
            count = urls.len(),
            format = %options.audio_format,
            quality = %options.audio_quality,
            "Dispatching batch"
        );

        match self.engine.dispatch_batch(urls, options).await {
            Ok(()) => {
                tracing::info!(target: "tunegrab.dispatch", "Batch finished");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(target: "tunegrab.dispatch", error = %e, "Batch failed");
                Err(DispatchError::engine_failure(e.to_string()))
            }
        }
    }
}

/// Holds the in-flight flag for the lifetime of one dispatch.
///
/// The flag is released on drop, which also covers a dispatch future that
/// is dropped before the engine answers.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
