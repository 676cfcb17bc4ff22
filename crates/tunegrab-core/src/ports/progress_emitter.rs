//! Progress event emitter port.
//!
//! This port is the push half of the engine boundary. The engine emits
//! [`ProgressEvent`]s without knowing who listens; the host decides the
//! transport. The default transport is an unbounded in-process channel whose
//! receiving end is handed to the `ProgressReconciler`.

use tokio::sync::mpsc;

use crate::download::ProgressEvent;

/// Port for emitting progress events.
pub trait ProgressEmitterPort: Send + Sync {
    /// Emit a progress event.
    ///
    /// This method should not block. Events emitted after the listener has
    /// gone away are dropped.
    fn emit(&self, event: ProgressEvent);

    /// Clone this emitter into a boxed trait object.
    ///
    /// This enables cloning of `Arc<dyn ProgressEmitterPort>` without
    /// requiring the underlying type to implement Clone.
    fn clone_box(&self) -> Box<dyn ProgressEmitterPort>;
}

/// A no-op progress emitter for tests and contexts without a listener.
#[derive(Debug, Clone, Default)]
pub struct NoopProgressEmitter;

impl NoopProgressEmitter {
    /// Create a new no-op progress emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProgressEmitterPort for NoopProgressEmitter {
    fn emit(&self, _event: ProgressEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn ProgressEmitterPort> {
        Box::new(self.clone())
    }
}

/// Emitter backed by an unbounded mpsc channel.
///
/// Delivery order on the receiving side equals emission order.
#[derive(Debug, Clone)]
pub struct ChannelProgressEmitter {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgressEmitter {
    /// Check if the receiving side has been dropped or shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl ProgressEmitterPort for ChannelProgressEmitter {
    fn emit(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!(
                target: "tunegrab.progress",
                "Progress listener gone, dropping event"
            );
        }
    }

    fn clone_box(&self) -> Box<dyn ProgressEmitterPort> {
        Box::new(self.clone())
    }
}

/// Receiving end of a progress channel.
#[derive(Debug)]
pub struct ProgressReceiver {
    inner: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl ProgressReceiver {
    /// Wait for the next event; `None` once every emitter is dropped.
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        self.inner.recv().await
    }

    /// Take the next event if one is already buffered.
    pub fn try_recv(&mut self) -> Option<ProgressEvent> {
        self.inner.try_recv().ok()
    }

    /// Stop accepting new events; buffered ones can still be read.
    pub fn close(&mut self) {
        self.inner.close();
    }
}

/// Create a connected emitter/receiver pair.
#[must_use]
pub fn progress_channel() -> (ChannelProgressEmitter, ProgressReceiver) {
    let (sender, inner) = mpsc::unbounded_channel();
    (
        ChannelProgressEmitter { sender },
        ProgressReceiver { inner },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopProgressEmitter::new();

        // Should not panic
        emitter.emit(ProgressEvent::starting("https://youtu.be/abc123"));
        let _boxed: Box<dyn ProgressEmitterPort> = emitter.clone_box();
    }

    #[test]
    fn test_channel_preserves_order() {
        let (emitter, mut rx) = progress_channel();
        let emitter: Arc<dyn ProgressEmitterPort> = Arc::new(emitter);

        emitter.emit(ProgressEvent::starting("u"));
        emitter.emit(ProgressEvent::downloading("u", 50.0));
        emitter.clone_box().emit(ProgressEvent::completed("u"));

        let labels: Vec<String> = std::iter::from_fn(|| rx.try_recv())
            .map(|event| event.status)
            .collect();
        assert_eq!(
            labels,
            vec!["Starting download...", "Downloading... 50%", "Completed"]
        );
    }

    #[test]
    fn test_emit_after_close_is_dropped() {
        let (emitter, mut rx) = progress_channel();
        rx.close();
        assert!(emitter.is_closed());

        // Should not panic
        emitter.emit(ProgressEvent::starting("u"));
        assert!(rx.try_recv().is_none());
    }
}
