//! Live queue rendering.
//!
//! An observer on `QueueStore::subscribe()`. On a terminal every queued URL
//! gets an indicatif bar; otherwise a line is printed whenever an item
//! changes status.

use std::collections::HashMap;
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tunegrab_core::{ItemStatus, QueueChange, QueueItem};

use super::tables::{status_marker, truncate_string};

const LABEL_WIDTH: usize = 40;

/// Renders queue changes as they happen.
pub struct QueueProgressView {
    render: Render,
}

enum Render {
    Bars {
        multi: MultiProgress,
        bars: HashMap<String, ProgressBar>,
    },
    Plain {
        last: HashMap<String, ItemStatus>,
    },
}

impl QueueProgressView {
    /// Create a view, auto-detecting terminal capability.
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self::bars()
        } else {
            Self::plain()
        }
    }

    /// Create a view that prints one line per status change.
    pub fn plain() -> Self {
        Self {
            render: Render::Plain {
                last: HashMap::new(),
            },
        }
    }

    fn bars() -> Self {
        Self {
            render: Render::Bars {
                multi: MultiProgress::with_draw_target(ProgressDrawTarget::stdout()),
                bars: HashMap::new(),
            },
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {prefix:40} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    /// Apply one change notification.
    pub fn apply(&mut self, change: &QueueChange) {
        match &mut self.render {
            Render::Bars { multi, bars } => match change {
                QueueChange::Added { item } => {
                    let bar = multi.add(ProgressBar::new(100));
                    bar.set_style(Self::bar_style());
                    bar.set_prefix(truncate_string(&item.url, LABEL_WIDTH));
                    bar.set_message(item.status_text.clone());
                    bar.enable_steady_tick(Duration::from_millis(120));
                    bars.insert(item.url.clone(), bar);
                }
                QueueChange::Updated { item } => {
                    if let Some(bar) = bars.get(&item.url) {
                        update_bar(bar, item);
                    }
                }
                QueueChange::Removed { url } => {
                    if let Some(bar) = bars.remove(url) {
                        bar.finish_and_clear();
                        multi.remove(&bar);
                    }
                }
                QueueChange::Cleared => {
                    for (_, bar) in bars.drain() {
                        bar.finish_and_clear();
                        multi.remove(&bar);
                    }
                }
            },
            Render::Plain { last } => match change {
                QueueChange::Added { item } => {
                    println!("queued      {}", item.url);
                    last.insert(item.url.clone(), item.status);
                }
                QueueChange::Updated { item } => {
                    if last.insert(item.url.clone(), item.status) != Some(item.status) {
                        println!("{}", plain_line(item));
                    }
                }
                QueueChange::Removed { url } => {
                    last.remove(url);
                }
                QueueChange::Cleared => last.clear(),
            },
        }
    }

    /// Stop animations, leaving finished bars on screen.
    pub fn finish(&mut self) {
        if let Render::Bars { bars, .. } = &mut self.render {
            for bar in bars.values() {
                if !bar.is_finished() {
                    bar.abandon();
                }
            }
        }
    }
}

impl Default for QueueProgressView {
    fn default() -> Self {
        Self::new()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "progress is clamped to [0, 100]"
)]
fn update_bar(bar: &ProgressBar, item: &QueueItem) {
    bar.set_position(item.progress.clamp(0.0, 100.0).round() as u64);
    match item.status {
        ItemStatus::Completed => {
            bar.finish_with_message(format!("{} {}", status_marker(item.status), item.status_text));
        }
        ItemStatus::Failed => {
            let reason = item.error.as_deref().unwrap_or(&item.status_text);
            bar.abandon_with_message(format!("{} {reason}", status_marker(item.status)));
        }
        ItemStatus::Pending | ItemStatus::Downloading => bar.set_message(item.status_text.clone()),
    }
}

/// Line printed by the plain renderer for a status change.
pub fn plain_line(item: &QueueItem) -> String {
    match &item.error {
        Some(error) => format!("{:<11} {}: {error}", item.status.as_str(), item.url),
        None => format!("{:<11} {}", item.status.as_str(), item.url),
    }
}

/// Apply every buffered change, skipping over a lag gap.
fn drain(view: &mut QueueProgressView, changes: &mut broadcast::Receiver<QueueChange>) {
    loop {
        match changes.try_recv() {
            Ok(change) => view.apply(&change),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                tracing::debug!(target: "tunegrab.cli", missed, "Progress view lagged");
            }
            Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                break;
            }
        }
    }
}

/// A view running on its own task.
pub struct ViewHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ViewHandle {
    /// Render what was already published, then stop.
    pub async fn finish(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::debug!(target: "tunegrab.cli", error = %e, "Progress view task failed");
        }
    }
}

/// Run `view` against a change subscription until [`ViewHandle::finish`].
pub fn spawn_view(
    mut view: QueueProgressView,
    mut changes: broadcast::Receiver<QueueChange>,
) -> ViewHandle {
    let (stop, mut stop_rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                _ = &mut stop_rx => {
                    drain(&mut view, &mut changes);
                    break;
                }

                change = changes.recv() => match change {
                    Ok(change) => view.apply(&change),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::debug!(target: "tunegrab.cli", missed, "Progress view lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        view.finish();
    });
    ViewHandle { stop, task }
}
