//! Stateful services built on the pure download types.
//!
//! - `QueueStore` - authoritative ordered queue with change notifications
//! - `SettingsStore` - live `DownloadOptions` for the next batch
//! - `ProgressReconciler` - applies the engine's progress stream to the queue
//! - `DispatchCoordinator` - snapshot-then-send batch dispatch with an in-flight gate

mod dispatch;
mod queue_store;
mod reconciler;
mod settings_store;

pub use dispatch::DispatchCoordinator;
pub use queue_store::{DEFAULT_CHANGE_CAPACITY, QueueStore};
pub use reconciler::{ProgressReconciler, ReconcilerHandle};
pub use settings_store::SettingsStore;
