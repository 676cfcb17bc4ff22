//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the CLI wires concrete types
//! together:
//! - `QueueStore` and `SettingsStore` (tunegrab-core)
//! - the progress channel and its `ProgressReconciler` task
//! - `YtDlpEngine` (tunegrab-ytdlp) as the `DownloadEngine`
//! - `DispatchCoordinator` over all of the above
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tunegrab_core::{
    DispatchCoordinator, ProgressReconciler, QueueStore, ReconcilerHandle, SettingsStore,
    progress_channel,
};
use tunegrab_ytdlp::{DEFAULT_PROGRESS_INTERVAL, YtDlpConfig, YtDlpEngine};

use crate::commands::Commands;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// yt-dlp executable.
    pub ytdlp: PathBuf,
    /// Arguments placed before the yt-dlp arguments.
    pub ytdlp_args: Vec<String>,
    /// Output directory override.
    pub output_dir: Option<PathBuf>,
    /// Minimum spacing between progress events per URL.
    pub progress_interval: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ytdlp: PathBuf::from(tunegrab_ytdlp::DEFAULT_PROGRAM),
            ytdlp_args: Vec::new(),
            output_dir: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl CliConfig {
    /// Build the configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let output_dir = match &cli.command {
            Some(Commands::Download(args)) => args.output_dir.clone(),
            _ => None,
        };
        Self {
            ytdlp: cli.ytdlp.clone(),
            ytdlp_args: cli.ytdlp_args.clone(),
            output_dir,
            ..Self::default()
        }
    }

    fn engine_config(&self) -> YtDlpConfig {
        let mut config = YtDlpConfig::default()
            .with_program(self.ytdlp.clone())
            .with_program_args(self.ytdlp_args.iter().cloned())
            .with_progress_interval(self.progress_interval);
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        config
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The authoritative queue.
    pub queue: Arc<QueueStore>,
    /// Options for the next batch.
    pub settings: Arc<SettingsStore>,
    /// The yt-dlp engine, also reachable through `coordinator`.
    pub engine: Arc<YtDlpEngine>,
    /// Batch dispatch.
    pub coordinator: DispatchCoordinator,
    reconciler: Option<ReconcilerHandle>,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext")
            .field("queue_len", &self.queue.len())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl CliContext {
    /// Stop reconciling progress.
    ///
    /// Every event the engine emitted before this call is reflected in the
    /// queue afterwards. Later events are dropped. Calling it twice is a
    /// no-op.
    pub async fn settle(&mut self) {
        if let Some(reconciler) = self.reconciler.take() {
            reconciler.shutdown().await;
        }
    }
}

/// Bootstrap the CLI application.
///
/// Must be called from within the tokio runtime: it starts the progress
/// reconciliation task.
pub fn bootstrap(config: &CliConfig) -> CliContext {
    let queue = Arc::new(QueueStore::new());
    let settings = Arc::new(SettingsStore::default());

    let (emitter, receiver) = progress_channel();
    let reconciler = ProgressReconciler::spawn(Arc::clone(&queue), receiver);

    let engine = Arc::new(YtDlpEngine::new(config.engine_config(), Arc::new(emitter)));
    let coordinator = DispatchCoordinator::new(
        Arc::clone(&queue),
        Arc::clone(&settings),
        engine.clone(),
    );

    tracing::debug!(
        target: "tunegrab.cli",
        ytdlp = %config.ytdlp.display(),
        "Bootstrapped"
    );

    CliContext {
        queue,
        settings,
        engine,
        coordinator,
        reconciler: Some(reconciler),
    }
}
