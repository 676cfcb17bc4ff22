//! yt-dlp process orchestration.
//!
//! A batch runs one yt-dlp process per URL, strictly one after another.
//! Stdout is streamed line by line for progress; stderr is drained in a
//! separate task and only consulted when a process fails. A URL that fails
//! is reported through the emitter and the batch moves on to the next one.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tunegrab_core::{DownloadEngine, DownloadOptions, EngineError, ProgressEmitterPort, ProgressEvent};

use crate::args::build_args;
use crate::config::YtDlpConfig;
use crate::error::YtDlpError;
use crate::parse::{failure_reason, parse_destination, parse_progress_line};
use crate::paths::resolve_output_dir;
use crate::throttle::ProgressThrottle;

const VERSION_TIMEOUT: Duration = Duration::from_secs(15);
const FAILED_PREFIX: &str = "Download failed";

/// [`DownloadEngine`] backed by the yt-dlp executable.
pub struct YtDlpEngine {
    config: YtDlpConfig,
    emitter: Arc<dyn ProgressEmitterPort>,
}

impl std::fmt::Debug for YtDlpEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YtDlpEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YtDlpEngine {
    /// Create an engine reporting progress to `emitter`.
    pub fn new(config: YtDlpConfig, emitter: Arc<dyn ProgressEmitterPort>) -> Self {
        Self { config, emitter }
    }

    /// Get the engine configuration.
    pub const fn config(&self) -> &YtDlpConfig {
        &self.config
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.program_args).kill_on_drop(true);
        cmd
    }

    /// Run `--version` and return what it printed.
    pub async fn version(&self) -> Result<String, YtDlpError> {
        let mut cmd = self.command();
        cmd.arg("--version");

        let output = match tokio::time::timeout(VERSION_TIMEOUT, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::debug!(target: "tunegrab.ytdlp", error = %e, "Version probe failed to run");
                return Err(YtDlpError::NotInstalled);
            }
            Err(_) => {
                tracing::debug!(target: "tunegrab.ytdlp", "Version probe timed out");
                return Err(YtDlpError::NotInstalled);
            }
        };

        if !output.status.success() {
            return Err(YtDlpError::NotInstalled);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Download a single URL. `Ok(false)` means yt-dlp reported a failure.
    async fn download_one(
        &self,
        url: &str,
        options: &DownloadOptions,
        output_dir: &Path,
    ) -> Result<bool, YtDlpError> {
        self.emitter.emit(ProgressEvent::starting(url));

        let mut child = self
            .command()
            .args(build_args(url, options, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(YtDlpError::Spawn)?;

        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buf).await;
            }
            buf
        });

        if let Some(stdout) = child.stdout.take() {
            let mut throttle = ProgressThrottle::new(self.config.progress_interval);
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            // Titles and paths are not always UTF-8; decode lossily and keep
            // reading so yt-dlp never writes into a closed pipe.
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf);
                        self.handle_line(url, line.trim_end(), &mut throttle);
                    }
                    Err(e) => {
                        tracing::warn!(target: "tunegrab.ytdlp", url = %url, error = %e, "Lost yt-dlp output");
                        break;
                    }
                }
            }
        }

        let status = child.wait().await;
        let stderr_buf = stderr_task.await.unwrap_or_default();

        let reason = match status {
            Ok(status) if status.success() => {
                self.emitter.emit(ProgressEvent::completed(url));
                tracing::info!(target: "tunegrab.ytdlp", url = %url, "Download completed");
                return Ok(true);
            }
            Ok(status) => {
                let stderr_text = String::from_utf8_lossy(&stderr_buf);
                failure_reason(&stderr_text)
                    .map_or_else(|| format!("yt-dlp {status}"), ToString::to_string)
            }
            Err(e) => e.to_string(),
        };

        tracing::warn!(target: "tunegrab.ytdlp", url = %url, reason = %reason, "Download failed");
        self.emitter
            .emit(ProgressEvent::failed(url, format!("{FAILED_PREFIX}: {reason}")));
        Ok(false)
    }

    fn handle_line(&self, url: &str, line: &str, throttle: &mut ProgressThrottle) {
        if let Some(percent) = parse_progress_line(line) {
            if throttle.should_emit(percent) {
                self.emitter.emit(ProgressEvent::downloading(url, percent));
            }
        } else if let Some(path) = parse_destination(line) {
            tracing::debug!(target: "tunegrab.ytdlp", url = %url, destination = %path, "Destination");
        }
    }
}

#[async_trait]
impl DownloadEngine for YtDlpEngine {
    async fn dispatch_batch(
        &self,
        urls: Vec<String>,
        options: DownloadOptions,
    ) -> Result<(), EngineError> {
        let version = self.version().await?;
        let output_dir = resolve_output_dir(self.config.output_dir.as_deref())?;
        tracing::info!(
            target: "tunegrab.ytdlp",
            version = %version,
            output_dir = %output_dir.path.display(),
            source = ?output_dir.source,
            count = urls.len(),
            "Starting batch"
        );

        let mut completed = 0usize;
        let mut failed = 0usize;
        for url in &urls {
            match self.download_one(url, &options, &output_dir.path).await {
                Ok(true) => completed += 1,
                Ok(false) => failed += 1,
                Err(e) => {
                    self.emitter
                        .emit(ProgressEvent::failed(url.as_str(), format!("{FAILED_PREFIX}: {e}")));
                    return Err(e.into());
                }
            }
        }

        tracing::info!(target: "tunegrab.ytdlp", completed, failed, "Batch finished");
        Ok(())
    }

    async fn is_available(&self) -> bool {
        self.version().await.is_ok()
    }
}
