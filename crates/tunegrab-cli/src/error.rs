//! CLI-specific error types and mappings.
//!
//! Maps core and adapter errors to exit codes and user-facing messages.

use thiserror::Error;
use tunegrab_core::{DispatchError, SettingsError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid download options.
    #[error("Invalid options: {0}")]
    Options(#[from] SettingsError),

    /// The batch could not be dispatched or the engine rejected it.
    #[error("{}", .0.user_message())]
    Dispatch(#[from] DispatchError),

    /// The engine program is missing.
    #[error("{0}")]
    EngineUnavailable(String),

    /// The batch ran but some items failed.
    #[error("{failed} of {total} downloads failed")]
    ItemsFailed { failed: usize, total: usize },
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Options(_) | Self::Dispatch(DispatchError::EmptyQueue) => 2, // EX_USAGE
            Self::Dispatch(_) | Self::ItemsFailed { .. } => 1,
            Self::EngineUnavailable(_) => 69, // EX_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::from(SettingsError::EmptyOutputTemplate).exit_code(), 2);
        assert_eq!(CliError::from(DispatchError::EmptyQueue).exit_code(), 2);
        assert_eq!(CliError::from(DispatchError::AlreadyInFlight).exit_code(), 1);
        assert_eq!(
            CliError::from(DispatchError::engine_failure("boom")).exit_code(),
            1
        );
        assert_eq!(CliError::EngineUnavailable("missing".into()).exit_code(), 69);
        assert_eq!(CliError::ItemsFailed { failed: 1, total: 3 }.exit_code(), 1);
    }

    #[test]
    fn test_dispatch_message_is_user_facing() {
        let err = CliError::from(DispatchError::EmptyQueue);
        assert_eq!(err.to_string(), "Please add at least one URL.");

        let err = CliError::from(DispatchError::engine_failure("yt-dlp exploded"));
        assert_eq!(err.to_string(), "Error: yt-dlp exploded");
    }

    #[test]
    fn test_items_failed_message() {
        let err = CliError::ItemsFailed { failed: 2, total: 5 };
        assert_eq!(err.to_string(), "2 of 5 downloads failed");
    }
}
