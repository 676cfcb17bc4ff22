//! `tunegrab check`.

use tunegrab_ytdlp::{OutputDirSource, resolve_output_dir};

use crate::bootstrap::CliContext;
use crate::error::CliError;

const fn describe_source(source: OutputDirSource) -> &'static str {
    match source {
        OutputDirSource::Explicit => "configured",
        OutputDirSource::Platform => "platform default",
        OutputDirSource::HomeFallback => "home fallback",
    }
}

/// Report the yt-dlp version and the output directory.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let config = ctx.engine.config();
    let version = ctx
        .engine
        .version()
        .await
        .map_err(|e| CliError::EngineUnavailable(e.to_string()))?;
    println!("yt-dlp {version} ({})", config.program.display());

    match resolve_output_dir(config.output_dir.as_deref()) {
        Ok(dir) => println!(
            "Output directory: {} ({})",
            dir.path.display(),
            describe_source(dir.source)
        ),
        Err(e) => println!("Output directory: {e}"),
    }
    Ok(())
}
