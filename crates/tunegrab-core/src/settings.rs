//! Option updates and validation.
//!
//! `DownloadOptions` itself lives in `download::options`; this module holds
//! the partial-update type the settings store accepts and the rules a value
//! must satisfy before it becomes live.

use serde::{Deserialize, Serialize};

use crate::download::{AudioFormat, AudioQuality, DownloadOptions};

/// Partial options update.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsUpdate {
    pub audio_format: Option<AudioFormat>,
    pub audio_quality: Option<AudioQuality>,
    pub output_template: Option<String>,
    pub embed_thumbnail: Option<bool>,
    pub add_metadata: Option<bool>,
}

impl OptionsUpdate {
    /// Check if the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.audio_format.is_none()
            && self.audio_quality.is_none()
            && self.output_template.is_none()
            && self.embed_thumbnail.is_none()
            && self.add_metadata.is_none()
    }
}

impl DownloadOptions {
    /// Merge an update into these options, only updating fields that are Some.
    pub fn merge(&mut self, update: &OptionsUpdate) {
        if let Some(format) = update.audio_format {
            self.audio_format = format;
        }
        if let Some(quality) = update.audio_quality {
            self.audio_quality = quality;
        }
        if let Some(ref template) = update.output_template {
            self.output_template.clone_from(template);
        }
        if let Some(embed) = update.embed_thumbnail {
            self.embed_thumbnail = embed;
        }
        if let Some(add) = update.add_metadata {
            self.add_metadata = add;
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Unsupported audio format '{0}' (expected one of mp3, m4a, opus, vorbis, wav, flac)")]
    InvalidAudioFormat(String),

    #[error("Unsupported audio quality '{0}' (expected 0, 2, 5, 7, 9 or best/high/medium/low/lowest)")]
    InvalidAudioQuality(String),

    #[error("Output template cannot be empty")]
    EmptyOutputTemplate,
}

/// Validate option values.
pub fn validate_options(options: &DownloadOptions) -> Result<(), SettingsError> {
    if options.output_template.trim().is_empty() {
        return Err(SettingsError::EmptyOutputTemplate);
    }

    Ok(())
}
