//! yt-dlp command-line construction.

use std::ffi::OsString;
use std::path::Path;

use tunegrab_core::DownloadOptions;

/// Build the yt-dlp arguments for one URL.
///
/// Produces `-x --audio-format <fmt> --audio-quality <n> -o <dir>/<template>
/// [--add-metadata] [--embed-thumbnail] --newline <url>`. The template is
/// passed through untouched; yt-dlp expands its placeholders.
pub fn build_args(url: &str, options: &DownloadOptions, output_dir: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-x".into(),
        "--audio-format".into(),
        options.audio_format.as_str().into(),
        "--audio-quality".into(),
        options.audio_quality.level().to_string().into(),
        "-o".into(),
        output_dir.join(&options.output_template).into_os_string(),
    ];

    if options.add_metadata {
        args.push("--add-metadata".into());
    }
    if options.embed_thumbnail {
        args.push("--embed-thumbnail".into());
    }

    // One progress report per line
    args.push("--newline".into());
    args.push(url.into());
    args
}
