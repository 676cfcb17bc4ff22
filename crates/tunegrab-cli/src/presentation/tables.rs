//! Table formatting utilities for CLI output.

use tunegrab_core::{ItemStatus, QueueItem, QueueSnapshot};

const URL_WIDTH: usize = 48;

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// Counts characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use tunegrab_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Short marker for a status column.
pub const fn status_marker(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Pending => "·",
        ItemStatus::Downloading => "…",
        ItemStatus::Completed => "✓",
        ItemStatus::Failed => "✗",
    }
}

/// One summary row.
pub fn summary_row(item: &QueueItem) -> String {
    let mut row = format!(
        "{} {:<11} {:>5.1}%  {}",
        status_marker(item.status),
        item.status.as_str(),
        item.progress,
        truncate_string(&item.url, URL_WIDTH),
    );
    if let Some(error) = &item.error {
        row.push_str("\n    ");
        row.push_str(error);
    }
    row
}

/// Totals line, e.g. `2 completed, 1 failed, 0 unfinished`.
pub fn summary_totals(snapshot: &QueueSnapshot) -> String {
    let completed = snapshot.count(ItemStatus::Completed);
    let failed = snapshot.count(ItemStatus::Failed);
    let unfinished = snapshot.len() - completed - failed;
    format!("{completed} completed, {failed} failed, {unfinished} unfinished")
}

/// Print the final state of every queued item.
pub fn print_summary(snapshot: &QueueSnapshot) {
    println!();
    print_separator(URL_WIDTH + 22);
    for item in &snapshot.items {
        println!("{}", summary_row(item));
    }
    print_separator(URL_WIDTH + 22);
    println!("{}", summary_totals(snapshot));
}
