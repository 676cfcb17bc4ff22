//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Program looked up on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "yt-dlp";

/// Minimum spacing between two progress events for the same URL.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for [`YtDlpEngine`](crate::YtDlpEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlpConfig {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments placed before any yt-dlp argument, e.g. `["-m", "yt_dlp"]`
    /// when `program` is a Python interpreter.
    pub program_args: Vec<String>,
    /// Where files land. `None` means the platform downloads directory.
    pub output_dir: Option<PathBuf>,
    pub progress_interval: Duration,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            program_args: Vec::new(),
            output_dir: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl YtDlpConfig {
    /// Set the executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the leading arguments.
    #[must_use]
    pub fn with_program_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the progress event interval.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}
