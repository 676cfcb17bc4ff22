//! Output directory resolution.

use std::path::{Path, PathBuf};

use crate::error::YtDlpError;

/// How the output directory was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDirSource {
    /// Configured explicitly (CLI flag or env var).
    Explicit,
    /// The platform's downloads directory.
    Platform,
    /// `~/Downloads`, used when the platform reports none.
    HomeFallback,
}

/// Resolution result for the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirResolution {
    pub path: PathBuf,
    pub source: OutputDirSource,
}

/// Return the default output directory and where it came from.
pub fn default_output_dir() -> Result<OutputDirResolution, YtDlpError> {
    if let Some(path) = dirs::download_dir() {
        return Ok(OutputDirResolution {
            path,
            source: OutputDirSource::Platform,
        });
    }

    let home = dirs::home_dir().ok_or(YtDlpError::NoOutputDir)?;
    Ok(OutputDirResolution {
        path: home.join("Downloads"),
        source: OutputDirSource::HomeFallback,
    })
}

/// Resolve the output directory from an explicit override or the default.
///
/// A path that exists but is not a directory is rejected. A missing
/// directory is fine; yt-dlp creates it.
pub fn resolve_output_dir(explicit: Option<&Path>) -> Result<OutputDirResolution, YtDlpError> {
    let resolution = match explicit {
        Some(path) => OutputDirResolution {
            path: path.to_path_buf(),
            source: OutputDirSource::Explicit,
        },
        None => default_output_dir()?,
    };

    if resolution.path.exists() && !resolution.path.is_dir() {
        return Err(YtDlpError::NotADirectory(resolution.path));
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let dir = std::env::temp_dir();
        let resolved = resolve_output_dir(Some(&dir)).unwrap();
        assert_eq!(resolved.source, OutputDirSource::Explicit);
        assert_eq!(resolved.path, dir);
    }

    #[test]
    fn test_missing_explicit_dir_is_accepted() {
        let dir = std::env::temp_dir().join("tunegrab-does-not-exist-yet");
        let resolved = resolve_output_dir(Some(&dir)).unwrap();
        assert_eq!(resolved.path, dir);
    }

    #[test]
    fn test_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let result = resolve_output_dir(Some(&file));
        assert!(matches!(result, Err(YtDlpError::NotADirectory(path)) if path == file));
    }

    #[test]
    fn test_default_ends_with_downloads_dir() {
        // Depends on the host; only check shape when one is available
        if let Ok(resolved) = default_output_dir() {
            assert_ne!(resolved.source, OutputDirSource::Explicit);
            assert!(resolved.path.is_absolute());
        }
    }
}
