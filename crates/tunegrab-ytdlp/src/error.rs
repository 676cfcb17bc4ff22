//! Adapter errors.

use std::path::PathBuf;

use thiserror::Error;
use tunegrab_core::EngineError;

/// Install hint shown when the program cannot be run.
pub const INSTALL_HINT: &str =
    "yt-dlp is not installed. Please install it first: https://github.com/yt-dlp/yt-dlp#installation";

/// Errors that abort a whole batch.
#[derive(Error, Debug)]
pub enum YtDlpError {
    #[error("{}", INSTALL_HINT)]
    NotInstalled,

    #[error("Could not determine downloads directory")]
    NoOutputDir,

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to start yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),
}

impl From<YtDlpError> for EngineError {
    fn from(err: YtDlpError) -> Self {
        match err {
            YtDlpError::NotInstalled => Self::Unavailable(err.to_string()),
            YtDlpError::Spawn(ref source) => Self::SpawnFailed(source.to_string()),
            YtDlpError::NoOutputDir | YtDlpError::NotADirectory(_) => Self::Other(err.to_string()),
        }
    }
}
