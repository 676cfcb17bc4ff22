//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use tunegrab_core::{AudioFormat, AudioQuality, OptionsUpdate};

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Queue one or more URLs and download their audio
    Download(DownloadArgs),

    /// Check that yt-dlp is installed and show where files will go
    Check,
}

/// Arguments of `tunegrab download`.
///
/// Every option left unset keeps its default from `DownloadOptions`.
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// YouTube URLs (youtube.com or youtu.be)
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Audio format: mp3, m4a, opus, vorbis, wav or flac
    #[arg(short = 'f', long, env = "TUNEGRAB_AUDIO_FORMAT")]
    pub audio_format: Option<AudioFormat>,

    /// Audio quality: 0, 2, 5, 7, 9 or best, high, medium, low, lowest
    #[arg(short = 'q', long, env = "TUNEGRAB_AUDIO_QUALITY")]
    pub audio_quality: Option<AudioQuality>,

    /// Filename template, e.g. "%(uploader)s - %(title)s.%(ext)s"
    #[arg(short = 'o', long, env = "TUNEGRAB_OUTPUT_TEMPLATE")]
    pub output_template: Option<String>,

    /// Directory to save files in (defaults to the Downloads folder)
    #[arg(short = 'd', long, env = "TUNEGRAB_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not embed the thumbnail as cover art
    #[arg(long, env = "TUNEGRAB_NO_THUMBNAIL")]
    pub no_thumbnail: bool,

    /// Do not write metadata tags
    #[arg(long, env = "TUNEGRAB_NO_METADATA")]
    pub no_metadata: bool,
}

impl DownloadArgs {
    /// Options update carrying only what was given on the command line.
    pub fn options_update(&self) -> OptionsUpdate {
        OptionsUpdate {
            audio_format: self.audio_format,
            audio_quality: self.audio_quality,
            output_template: self.output_template.clone(),
            embed_thumbnail: self.no_thumbnail.then_some(false),
            add_metadata: self.no_metadata.then_some(false),
        }
    }
}
