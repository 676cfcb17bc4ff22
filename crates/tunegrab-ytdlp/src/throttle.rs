//! Progress throttling.
//!
//! yt-dlp prints several progress lines per second. Each URL gets its own
//! throttle so the host is not flooded with events.

use std::time::{Duration, Instant};

/// Rate-limiter for the progress events of one URL.
///
/// The first report always passes, and so does a report of 100%, so a
/// listener never misses the start or the end of a transfer.
#[derive(Debug)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a new throttle with the specified minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Check if a report of `percent` should become an event.
    pub fn should_emit(&mut self, percent: f32) -> bool {
        let now = Instant::now();
        let due = match self.last_emit {
            Some(last) => percent >= 100.0 || now.duration_since(last) >= self.min_interval,
            None => true,
        };
        if due {
            self.last_emit = Some(now);
        }
        due
    }
}
