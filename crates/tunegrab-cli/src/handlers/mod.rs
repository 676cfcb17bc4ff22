//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<_, CliError>`
//! - Thin wrappers that:
//!   1. Turn CLI input into core calls
//!   2. Call the core services in `CliContext`
//!   3. Format output for the terminal
//!
//! Handlers should NOT run yt-dlp themselves or mutate queue items directly.

pub mod check;
pub mod download;
