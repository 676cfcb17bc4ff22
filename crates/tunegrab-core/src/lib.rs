//! Core of tunegrab: the download queue and everything that keeps it honest.
//!
//! This crate owns the authoritative queue state, the output settings applied
//! to the next batch, the reconciliation of asynchronous progress events onto
//! queue items, and the dispatch of a batch to an external engine. It performs
//! no network or process I/O itself; the engine is reached through the
//! [`ports::DownloadEngine`] trait and reports back through
//! [`ports::ProgressEmitterPort`].
//!
//! # Structure
//!
//! - `download` - Pure data types (`QueueItem`, `DownloadOptions`, events, errors)
//! - `validation` - URL acceptance and duplicate checks
//! - `settings` - Option updates and validation
//! - `ports` - Engine and progress-channel abstractions
//! - `services` - `QueueStore`, `SettingsStore`, `ProgressReconciler`, `DispatchCoordinator`
#![deny(unused_crate_dependencies)]

pub mod download;
pub mod ports;
pub mod services;
pub mod settings;
pub mod validation;

// Re-export commonly used types for convenience
pub use download::{
    AudioFormat, AudioQuality, DispatchError, DownloadOptions, ItemPatch, ItemStatus,
    PROGRESS_CHANNEL, ProgressEvent, QueueChange, QueueItem, QueueSnapshot, ValidationError,
};
pub use ports::{
    ChannelProgressEmitter, DownloadEngine, EngineError, NoopProgressEmitter,
    ProgressEmitterPort, ProgressReceiver, progress_channel,
};
pub use services::{
    DispatchCoordinator, ProgressReconciler, QueueStore, ReconcilerHandle, SettingsStore,
};
pub use settings::{OptionsUpdate, SettingsError, validate_options};
pub use validation::{can_add, normalize_candidate};

// Dev-dependencies only exercised by the integration suites
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
