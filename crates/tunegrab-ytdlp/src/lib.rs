//! yt-dlp download engine for tunegrab.
//!
//! Implements [`tunegrab_core::DownloadEngine`] by running one `yt-dlp`
//! process per URL and translating its `--newline` console output into
//! [`tunegrab_core::ProgressEvent`]s.
//!
//! # Structure
//!
//! - `config` - Program location, output directory, progress rate
//! - `paths` - Output directory resolution
//! - `args` - Command-line construction
//! - `parse` - Console output parsing
//! - `throttle` - Per-URL progress rate limiting
//! - `engine` - `YtDlpEngine`
#![deny(unused_crate_dependencies)]

mod args;
mod config;
mod engine;
mod error;
mod parse;
mod paths;
mod throttle;

pub use args::build_args;
pub use config::{DEFAULT_PROGRAM, DEFAULT_PROGRESS_INTERVAL, YtDlpConfig};
pub use engine::YtDlpEngine;
pub use error::YtDlpError;
pub use parse::{failure_reason, parse_destination, parse_progress_line};
pub use paths::{OutputDirResolution, OutputDirSource, default_output_dir, resolve_output_dir};
pub use throttle::ProgressThrottle;
