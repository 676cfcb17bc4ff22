//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Download audio from YouTube with yt-dlp.
#[derive(Parser, Debug)]
#[command(name = "tunegrab")]
#[command(about = "Queue YouTube URLs and download their audio with yt-dlp")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// yt-dlp executable to run
    #[arg(long = "ytdlp", env = "TUNEGRAB_YTDLP", default_value = "yt-dlp", global = true)]
    pub ytdlp: PathBuf,

    /// Extra argument placed before the yt-dlp arguments (repeatable),
    /// e.g. `--ytdlp python3 --ytdlp-arg=-m --ytdlp-arg=yt_dlp`
    #[arg(
        long = "ytdlp-arg",
        global = true,
        allow_hyphen_values = true,
        value_name = "ARG"
    )]
    pub ytdlp_args: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
