//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from the execution engine
//! and from the host's event delivery. They contain no implementation
//! details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem details in any signature
//! - The batch request and the progress stream are two independent paths

pub mod engine;
pub mod progress_emitter;

pub use engine::{DownloadEngine, EngineError};
pub use progress_emitter::{
    ChannelProgressEmitter, NoopProgressEmitter, ProgressEmitterPort, ProgressReceiver,
    progress_channel,
};
