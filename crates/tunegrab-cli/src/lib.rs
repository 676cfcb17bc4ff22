//! Command-line front end for tunegrab.
//!
//! `main.rs` parses arguments, builds a [`CliConfig`], calls [`bootstrap`]
//! and routes the command to a handler. Handlers only talk to the core
//! services held by [`CliContext`].
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration suite
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary target only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, DownloadArgs};
pub use error::CliError;
pub use parser::Cli;
