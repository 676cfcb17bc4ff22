//! Output preferences applied to a batch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

/// Default filename pattern handed to the engine.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Target audio container/codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    M4a,
    Opus,
    Vorbis,
    Wav,
    Flac,
}

impl AudioFormat {
    /// Every supported format, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Mp3,
        Self::M4a,
        Self::Opus,
        Self::Vorbis,
        Self::Wav,
        Self::Flac,
    ];

    /// Name passed to the engine.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Opus => "opus",
            Self::Vorbis => "vorbis",
            Self::Wav => "wav",
            Self::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| SettingsError::InvalidAudioFormat(s.to_string()))
    }
}

/// Named quality tier.
///
/// The engine receives the tier's ordinal (`0` = best … `9` = lowest); the
/// bitrate it ends up targeting is the engine's decision. Variants are
/// declared best first, so `Best < Lowest` in the derived ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AudioQuality {
    /// Ordinal 0, roughly 320kbps.
    #[default]
    Best,
    /// Ordinal 2, roughly 256kbps.
    High,
    /// Ordinal 5, roughly 192kbps.
    Medium,
    /// Ordinal 7, roughly 128kbps.
    Low,
    /// Ordinal 9, roughly 64kbps.
    Lowest,
}

impl AudioQuality {
    /// Every tier, best first.
    pub const ALL: [Self; 5] = [Self::Best, Self::High, Self::Medium, Self::Low, Self::Lowest];

    /// Ordinal passed to the engine.
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Best => 0,
            Self::High => 2,
            Self::Medium => 5,
            Self::Low => 7,
            Self::Lowest => 9,
        }
    }

    /// Tier for an exact ordinal.
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Best),
            2 => Some(Self::High),
            5 => Some(Self::Medium),
            7 => Some(Self::Low),
            9 => Some(Self::Lowest),
            _ => None,
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Lowest => "lowest",
        }
    }

    /// Human-readable label with the nominal bitrate.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Best => "Best (320kbps)",
            Self::High => "High (256kbps)",
            Self::Medium => "Medium (192kbps)",
            Self::Low => "Low (128kbps)",
            Self::Lowest => "Lowest (64kbps)",
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl FromStr for AudioQuality {
    type Err = SettingsError;

    /// Accepts the ordinal (`"5"`) or the tier name (`"medium"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let by_level = trimmed.parse::<u8>().ok().and_then(Self::from_level);
        by_level
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|tier| tier.name().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| SettingsError::InvalidAudioQuality(s.to_string()))
    }
}

impl TryFrom<String> for AudioQuality {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AudioQuality> for String {
    fn from(quality: AudioQuality) -> Self {
        quality.to_string()
    }
}

/// Output preferences for a batch.
///
/// A clone of the live value is captured when a batch is dispatched, so edits
/// made afterwards only affect the next batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOptions {
    pub audio_format: AudioFormat,
    pub audio_quality: AudioQuality,
    /// Filename pattern with engine placeholders such as `%(title)s`,
    /// `%(uploader)s` and `%(ext)s`. Passed through verbatim.
    pub output_template: String,
    pub embed_thumbnail: bool,
    pub add_metadata: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            audio_format: AudioFormat::default(),
            audio_quality: AudioQuality::default(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            embed_thumbnail: true,
            add_metadata: true,
        }
    }
}

impl DownloadOptions {
    /// Set the audio format.
    #[must_use]
    pub const fn with_format(mut self, format: AudioFormat) -> Self {
        self.audio_format = format;
        self
    }

    /// Set the quality tier.
    #[must_use]
    pub const fn with_quality(mut self, quality: AudioQuality) -> Self {
        self.audio_quality = quality;
        self
    }

    /// Set the output template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = template.into();
        self
    }

    /// Toggle thumbnail embedding.
    #[must_use]
    pub const fn with_thumbnail(mut self, embed: bool) -> Self {
        self.embed_thumbnail = embed;
        self
    }

    /// Toggle metadata tagging.
    #[must_use]
    pub const fn with_metadata(mut self, add: bool) -> Self {
        self.add_metadata = add;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DownloadOptions::default();
        assert_eq!(options.audio_format, AudioFormat::Mp3);
        assert_eq!(options.audio_quality, AudioQuality::Best);
        assert_eq!(options.output_template, "%(title)s.%(ext)s");
        assert!(options.embed_thumbnail);
        assert!(options.add_metadata);
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let json = r#"{
            "audioFormat": "flac",
            "audioQuality": "5",
            "outputTemplate": "%(uploader)s - %(title)s.%(ext)s",
            "embedThumbnail": false,
            "addMetadata": true
        }"#;

        let options: DownloadOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.audio_format, AudioFormat::Flac);
        assert_eq!(options.audio_quality, AudioQuality::Medium);
        assert!(!options.embed_thumbnail);

        let back = serde_json::to_value(&options).unwrap();
        assert_eq!(back["audioQuality"], "5");
        assert_eq!(back["audioFormat"], "flac");
    }

    #[test]
    fn test_quality_parsing() {
        assert_eq!("0".parse::<AudioQuality>().unwrap(), AudioQuality::Best);
        assert_eq!("lowest".parse::<AudioQuality>().unwrap(), AudioQuality::Lowest);
        assert_eq!("High".parse::<AudioQuality>().unwrap(), AudioQuality::High);
        assert!("3".parse::<AudioQuality>().is_err());
        assert!("loud".parse::<AudioQuality>().is_err());
    }

    #[test]
    fn test_quality_ordering() {
        assert!(AudioQuality::Best < AudioQuality::High);
        assert!(AudioQuality::Low < AudioQuality::Lowest);
        let levels: Vec<u8> = AudioQuality::ALL.iter().map(AudioQuality::level).collect();
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(" OPUS ".parse::<AudioFormat>().unwrap(), AudioFormat::Opus);
        assert!(matches!(
            "aac".parse::<AudioFormat>(),
            Err(SettingsError::InvalidAudioFormat(v)) if v == "aac"
        ));
    }
}
