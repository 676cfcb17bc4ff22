//! Download domain types, events and errors.
//!
//! This module contains pure data types for the queue and the batch engine
//! boundary. No I/O, locking or runtime dependencies allowed.
//!
//! # Structure
//!
//! - `types` - Queue items and their status (`QueueItem`, `ItemStatus`, `ItemPatch`)
//! - `options` - Output preferences (`DownloadOptions`, `AudioFormat`, `AudioQuality`)
//! - `events` - Inbound progress payloads and outbound queue notifications
//! - `errors` - Validation and dispatch errors
//! - `queue` - Immutable queue snapshot DTO

pub mod errors;
pub mod events;
pub mod options;
pub mod queue;
pub mod types;

// Re-export commonly used types
pub use errors::{DispatchError, ValidationError};
pub use events::{PROGRESS_CHANNEL, ProgressEvent, QueueChange};
pub use options::{AudioFormat, AudioQuality, DownloadOptions};
pub use queue::QueueSnapshot;
pub use types::{ItemPatch, ItemStatus, QueueItem};
