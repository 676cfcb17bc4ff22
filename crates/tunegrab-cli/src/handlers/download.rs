//! `tunegrab download`.

use tunegrab_core::{DownloadEngine, ItemStatus, QueueSnapshot, QueueStore, ValidationError};
use tunegrab_ytdlp::YtDlpError;

use crate::bootstrap::CliContext;
use crate::commands::DownloadArgs;
use crate::error::CliError;
use crate::presentation::{QueueProgressView, print_summary, spawn_view};

/// Submit every URL, keeping the ones the queue rejected.
pub fn submit_all(queue: &QueueStore, urls: &[String]) -> Vec<(String, ValidationError)> {
    urls.iter()
        .filter_map(|url| queue.submit(url).err().map(|err| (url.clone(), err)))
        .collect()
}

/// Queue the URLs, run one batch and report the outcome.
///
/// Returns the final queue snapshot unless some item ended `Failed`.
pub async fn execute(ctx: &mut CliContext, args: &DownloadArgs) -> Result<QueueSnapshot, CliError> {
    let options = ctx.settings.apply(&args.options_update())?;
    tracing::debug!(
        target: "tunegrab.cli",
        format = %options.audio_format,
        quality = %options.audio_quality,
        template = %options.output_template,
        "Download options"
    );

    if !ctx.engine.is_available().await {
        eprintln!("Warning: {}", YtDlpError::NotInstalled);
    }

    let view = spawn_view(QueueProgressView::new(), ctx.queue.subscribe());
    for (url, err) in submit_all(&ctx.queue, &args.urls) {
        eprintln!("Skipping {url:?}: {}", err.user_message());
    }

    let result = ctx.coordinator.dispatch_all().await;
    ctx.settle().await;
    view.finish().await;
    result?;

    let snapshot = ctx.queue.snapshot();
    print_summary(&snapshot);

    let failed = snapshot.count(ItemStatus::Failed);
    if failed > 0 {
        return Err(CliError::ItemsFailed {
            failed,
            total: snapshot.len(),
        });
    }
    Ok(snapshot)
}
