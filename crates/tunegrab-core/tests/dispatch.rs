//! Integration tests for `DispatchCoordinator`.
//!
//! Simple expectations (call counts, canned errors) use a `mockall` engine.
//! Tests that need a batch to stay in flight use `GatedEngine`, which parks
//! inside `dispatch_batch` until the test releases it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::Notify;
use tokio_test::{assert_err, assert_ok};
use tunegrab_core::{
    AudioFormat, DispatchCoordinator, DispatchError, DownloadEngine, DownloadOptions,
    EngineError, ItemStatus, OptionsUpdate, ProgressEvent, ProgressReconciler, QueueStore,
    SettingsStore,
};

mock! {
    pub Engine {}

    #[async_trait]
    impl DownloadEngine for Engine {
        async fn dispatch_batch(
            &self,
            urls: Vec<String>,
            options: DownloadOptions,
        ) -> Result<(), EngineError>;

        async fn is_available(&self) -> bool;
    }
}

/// Engine that blocks in `dispatch_batch` until released.
#[derive(Default)]
struct GatedEngine {
    calls: AtomicUsize,
    started: Notify,
    release: Notify,
    received: Mutex<Vec<(Vec<String>, DownloadOptions)>>,
}

impl GatedEngine {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn received(&self) -> Vec<(Vec<String>, DownloadOptions)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadEngine for GatedEngine {
    async fn dispatch_batch(
        &self,
        urls: Vec<String>,
        options: DownloadOptions,
    ) -> Result<(), EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push((urls, options));
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

struct Fixture {
    queue: Arc<QueueStore>,
    settings: Arc<SettingsStore>,
    coordinator: Arc<DispatchCoordinator>,
}

fn fixture(engine: Arc<dyn DownloadEngine>, urls: &[&str]) -> Fixture {
    let queue = Arc::new(QueueStore::new());
    for url in urls {
        queue.submit(url).unwrap();
    }
    let settings = Arc::new(SettingsStore::default());
    let coordinator = Arc::new(DispatchCoordinator::new(
        Arc::clone(&queue),
        Arc::clone(&settings),
        engine,
    ));
    Fixture {
        queue,
        settings,
        coordinator,
    }
}

// ── mockall engine ─────────────────────────────────────────────────

#[tokio::test]
async fn empty_queue_never_reaches_engine() {
    let mut engine = MockEngine::new();
    engine.expect_dispatch_batch().times(0);
    let f = fixture(Arc::new(engine), &[]);

    let err = assert_err!(f.coordinator.dispatch_all().await);
    assert_eq!(err, DispatchError::EmptyQueue);
    assert!(!f.coordinator.is_in_flight());
}

#[tokio::test]
async fn batch_carries_queue_order_and_options() {
    let mut engine = MockEngine::new();
    engine
        .expect_dispatch_batch()
        .withf(|urls, options| {
            urls == &["https://youtu.be/a", "https://youtu.be/b"]
                && options == &DownloadOptions::default()
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let f = fixture(Arc::new(engine), &["https://youtu.be/a", "https://youtu.be/b"]);

    assert_ok!(f.coordinator.dispatch_all().await);
    assert!(!f.coordinator.is_in_flight());
}

#[tokio::test]
async fn success_does_not_force_terminal_status() {
    let mut engine = MockEngine::new();
    engine.expect_dispatch_batch().returning(|_, _| Ok(()));
    let f = fixture(Arc::new(engine), &["https://youtu.be/a", "https://youtu.be/b"]);

    ProgressReconciler::apply(&f.queue, &ProgressEvent::downloading("https://youtu.be/a", 40.0));
    assert_ok!(f.coordinator.dispatch_all().await);

    let snapshot = f.queue.snapshot();
    assert_eq!(snapshot.items[0].status, ItemStatus::Downloading);
    assert_eq!(snapshot.items[1].status, ItemStatus::Pending);
}

#[tokio::test]
async fn scenario_f_engine_failure_keeps_queue() {
    let mut engine = MockEngine::new();
    engine
        .expect_dispatch_batch()
        .times(1)
        .returning(|_, _| Err(EngineError::Unavailable("yt-dlp is not installed".to_string())));
    let f = fixture(Arc::new(engine), &["https://youtu.be/a", "https://youtu.be/b"]);

    let err = assert_err!(f.coordinator.dispatch_all().await);
    assert_eq!(err, DispatchError::engine_failure("yt-dlp is not installed"));
    assert!(err.is_retryable());

    let snapshot = f.queue.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.count(ItemStatus::Pending), 2);
    assert!(!f.coordinator.is_in_flight());
}

#[tokio::test]
async fn failed_batch_can_be_retried() {
    let mut engine = MockEngine::new();
    let mut seq = mockall::Sequence::new();
    engine
        .expect_dispatch_batch()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(EngineError::SpawnFailed("busy".to_string())));
    engine
        .expect_dispatch_batch()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    let f = fixture(Arc::new(engine), &["https://youtu.be/a"]);

    assert_err!(f.coordinator.dispatch_all().await);
    assert_ok!(f.coordinator.dispatch_all().await);
}

// ── gated engine ───────────────────────────────────────────────────

#[tokio::test]
async fn second_dispatch_while_in_flight_is_rejected() {
    let engine = Arc::new(GatedEngine::default());
    let f = fixture(engine.clone(), &["https://youtu.be/a"]);

    let first = tokio::spawn({
        let coordinator = Arc::clone(&f.coordinator);
        async move { coordinator.dispatch_all().await }
    });
    engine.started.notified().await;
    assert!(f.coordinator.is_in_flight());

    let err = assert_err!(f.coordinator.dispatch_all().await);
    assert_eq!(err, DispatchError::AlreadyInFlight);

    engine.release.notify_one();
    assert_ok!(first.await.unwrap());
    assert_eq!(engine.calls(), 1);
    assert!(!f.coordinator.is_in_flight());
}

#[tokio::test]
async fn dropped_dispatch_clears_flag() {
    let engine = Arc::new(GatedEngine::default());
    let f = fixture(engine.clone(), &["https://youtu.be/a"]);

    let task = tokio::spawn({
        let coordinator = Arc::clone(&f.coordinator);
        async move { coordinator.dispatch_all().await }
    });
    engine.started.notified().await;
    assert!(f.coordinator.is_in_flight());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert!(!f.coordinator.is_in_flight());
}

#[tokio::test]
async fn settings_edit_does_not_reach_in_flight_batch() {
    let engine = Arc::new(GatedEngine::default());
    let f = fixture(engine.clone(), &["https://youtu.be/a"]);

    let task = tokio::spawn({
        let coordinator = Arc::clone(&f.coordinator);
        async move { coordinator.dispatch_all().await }
    });
    engine.started.notified().await;

    f.settings
        .apply(&OptionsUpdate {
            audio_format: Some(AudioFormat::Flac),
            ..Default::default()
        })
        .unwrap();
    engine.release.notify_one();
    assert_ok!(task.await.unwrap());

    let received = engine.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1.audio_format, AudioFormat::Mp3);
    assert_eq!(f.settings.current().audio_format, AudioFormat::Flac);
}

#[tokio::test]
async fn queue_edits_mid_batch_do_not_change_the_batch() {
    let engine = Arc::new(GatedEngine::default());
    let f = fixture(engine.clone(), &["https://youtu.be/a"]);

    let task = tokio::spawn({
        let coordinator = Arc::clone(&f.coordinator);
        async move { coordinator.dispatch_all().await }
    });
    engine.started.notified().await;

    f.queue.submit("https://youtu.be/late").unwrap();
    f.queue.clear();
    ProgressReconciler::apply(&f.queue, &ProgressEvent::completed("https://youtu.be/a"));
    assert!(f.queue.is_empty());

    engine.release.notify_one();
    assert_ok!(task.await.unwrap());
    assert_eq!(engine.received()[0].0, vec!["https://youtu.be/a".to_string()]);
}
