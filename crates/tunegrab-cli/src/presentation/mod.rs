//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no queue mutations, no engine calls.

pub mod progress;
pub mod tables;

// Re-export commonly used items
pub use progress::{QueueProgressView, ViewHandle, plain_line, spawn_view};
pub use tables::{
    print_separator, print_summary, status_marker, summary_row, summary_totals, truncate_string,
};
