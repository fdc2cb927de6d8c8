use super::*;
use crate::error::{DatabaseError, Error, NotificationError};
use crate::types::{
    BatchId, BatchStatus, DownloadStatus, Event, NotificationDisposition, NotificationInformation,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceCall {
    Dismiss,
    Stack,
    StackNotDismissible,
    Update,
}

/// Records every service call in order
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingService {
    fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationService for RecordingService {
    async fn dismiss_stacked_notification(
        &self,
        _notification: &NotificationInformation,
    ) -> crate::Result<()> {
        self.calls.lock().unwrap().push(ServiceCall::Dismiss);
        Ok(())
    }

    async fn stack_notification(
        &self,
        _notification: &NotificationInformation,
    ) -> crate::Result<()> {
        self.calls.lock().unwrap().push(ServiceCall::Stack);
        Ok(())
    }

    async fn stack_notification_not_dismissible(
        &self,
        _notification: &NotificationInformation,
    ) -> crate::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(ServiceCall::StackNotDismissible);
        Ok(())
    }

    async fn update_notification(
        &self,
        _notification: &NotificationInformation,
    ) -> crate::Result<()> {
        self.calls.lock().unwrap().push(ServiceCall::Update);
        Ok(())
    }
}

/// Creator that always yields the same disposition and counts invocations
struct FixedCreator {
    disposition: NotificationDisposition,
    created: AtomicUsize,
}

impl FixedCreator {
    fn new(disposition: NotificationDisposition) -> Self {
        Self {
            disposition,
            created: AtomicUsize::new(0),
        }
    }
}

impl NotificationCreator for FixedCreator {
    fn create_notification(
        &self,
        batch_status: &BatchStatus,
    ) -> crate::Result<NotificationInformation> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(NotificationInformation {
            batch_id: batch_status.batch_id,
            title: batch_status.title.clone(),
            body: format!("{:?}", batch_status.status),
            disposition: self.disposition,
        })
    }
}

/// In-memory seen store, optionally failing every write
#[derive(Default)]
struct MemorySeenStore {
    writes: Mutex<Vec<(BatchId, bool)>>,
    fail: bool,
}

impl MemorySeenStore {
    fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn writes(&self) -> Vec<(BatchId, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSeenStore for MemorySeenStore {
    async fn update_notification_seen(&self, batch_id: BatchId, seen: bool) -> crate::Result<()> {
        if self.fail {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk full".to_string(),
            )));
        }
        self.writes.lock().unwrap().push((batch_id, seen));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn batch_status(id: i64, status: DownloadStatus, notification_seen: bool) -> BatchStatus {
    BatchStatus {
        batch_id: BatchId(id),
        title: format!("Batch {}", id),
        status,
        notification_seen,
    }
}

struct Fixture {
    dispatcher: Arc<NotificationDispatcher>,
    service: Arc<RecordingService>,
    creator: Arc<FixedCreator>,
    seen_store: Arc<MemorySeenStore>,
    events: broadcast::Receiver<Event>,
}

fn fixture(disposition: NotificationDisposition) -> Fixture {
    fixture_with_store(disposition, MemorySeenStore::default())
}

fn fixture_with_store(disposition: NotificationDisposition, store: MemorySeenStore) -> Fixture {
    let (event_tx, events) = broadcast::channel(16);
    let creator = Arc::new(FixedCreator::new(disposition));
    let seen_store = Arc::new(store);
    let service = Arc::new(RecordingService::default());

    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::clone(&creator) as Arc<dyn NotificationCreator>,
        Arc::clone(&seen_store) as Arc<dyn NotificationSeenStore>,
        event_tx,
        Duration::from_secs(5),
    ));
    dispatcher.set_service(Arc::clone(&service) as Arc<dyn NotificationService>);

    Fixture {
        dispatcher,
        service,
        creator,
        seen_store,
        events,
    }
}

/// Wait until the detached seen-persist task has written, bounded
async fn wait_for_seen_write(store: &MemorySeenStore) -> Vec<(BatchId, bool)> {
    for _ in 0..100 {
        let writes = store.writes();
        if !writes.is_empty() {
            return writes;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    store.writes()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_seen_batch_suppresses_all_service_actions() {
    let mut f = fixture(NotificationDisposition::StackDismissible);

    let status = batch_status(1, DownloadStatus::Downloaded, true);
    f.dispatcher.update_notification(&status).await.unwrap();

    assert!(f.service.calls().is_empty());
    assert_eq!(f.creator.created.load(Ordering::SeqCst), 0);
    assert!(f.seen_store.writes().is_empty());

    let event = f.events.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::NotificationSuppressed { batch_id } if batch_id == BatchId(1)
    ));
}

#[tokio::test]
async fn test_dismiss_always_precedes_terminal_action() {
    let f = fixture(NotificationDisposition::SingleUpdate);

    let status = batch_status(2, DownloadStatus::Downloading, false);
    f.dispatcher.update_notification(&status).await.unwrap();

    assert_eq!(f.service.calls(), vec![ServiceCall::Dismiss, ServiceCall::Update]);
}

#[tokio::test]
async fn test_disposition_routes_to_exactly_one_terminal_action() {
    let cases = [
        (NotificationDisposition::StackDismissible, ServiceCall::Stack),
        (
            NotificationDisposition::StackNotDismissible,
            ServiceCall::StackNotDismissible,
        ),
        (NotificationDisposition::SingleUpdate, ServiceCall::Update),
    ];

    for (disposition, expected) in cases {
        let f = fixture(disposition);

        let status = batch_status(3, DownloadStatus::Downloading, false);
        f.dispatcher.update_notification(&status).await.unwrap();

        assert_eq!(f.service.calls(), vec![ServiceCall::Dismiss, expected]);
    }
}

#[tokio::test]
async fn test_downloaded_batch_persists_seen_flag() {
    let f = fixture(NotificationDisposition::StackDismissible);

    let status = batch_status(42, DownloadStatus::Downloaded, false);
    f.dispatcher.update_notification(&status).await.unwrap();

    assert_eq!(f.service.calls(), vec![ServiceCall::Dismiss, ServiceCall::Stack]);

    let writes = wait_for_seen_write(&f.seen_store).await;
    assert_eq!(writes, vec![(BatchId(42), true)]);
}

#[tokio::test]
async fn test_non_terminal_status_does_not_persist_seen() {
    let f = fixture(NotificationDisposition::SingleUpdate);

    for status in [
        DownloadStatus::Queued,
        DownloadStatus::Downloading,
        DownloadStatus::Paused,
        DownloadStatus::Error,
    ] {
        f.dispatcher
            .update_notification(&batch_status(5, status, false))
            .await
            .unwrap();
    }

    // Give a wrongly spawned persist task a chance to run before asserting
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(f.seen_store.writes().is_empty());
}

#[tokio::test]
async fn test_dispatch_waits_for_service_injection() {
    let (event_tx, _events) = broadcast::channel(16);
    let creator = Arc::new(FixedCreator::new(NotificationDisposition::SingleUpdate));
    let seen_store = Arc::new(MemorySeenStore::default());
    let service = Arc::new(RecordingService::default());

    let dispatcher = Arc::new(NotificationDispatcher::new(
        creator as Arc<dyn NotificationCreator>,
        seen_store as Arc<dyn NotificationSeenStore>,
        event_tx,
        Duration::from_secs(5),
    ));

    // Dispatch before any service is attached; the call must suspend, not fail
    let pending = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let status = batch_status(7, DownloadStatus::Downloading, false);
            dispatcher.update_notification(&status).await
        })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!pending.is_finished());

    dispatcher.set_service(Arc::clone(&service) as Arc<dyn NotificationService>);

    pending.await.unwrap().unwrap();
    assert_eq!(service.calls(), vec![ServiceCall::Dismiss, ServiceCall::Update]);
}

#[tokio::test]
async fn test_missing_service_times_out() {
    let (event_tx, _events) = broadcast::channel(16);
    let creator = Arc::new(FixedCreator::new(NotificationDisposition::SingleUpdate));
    let seen_store = Arc::new(MemorySeenStore::default());

    let dispatcher = NotificationDispatcher::new(
        creator as Arc<dyn NotificationCreator>,
        seen_store as Arc<dyn NotificationSeenStore>,
        event_tx,
        Duration::from_millis(50),
    );

    let status = batch_status(8, DownloadStatus::Downloading, false);
    let err = dispatcher.update_notification(&status).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Notification(NotificationError::ServiceUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_seen_persist_failure_emits_event() {
    let mut f = fixture_with_store(
        NotificationDisposition::StackDismissible,
        MemorySeenStore::failing(),
    );

    let status = batch_status(9, DownloadStatus::Downloaded, false);
    f.dispatcher.update_notification(&status).await.unwrap();

    // Two events arrive in either order: the dispatch itself and the failed persist
    let mut saw_persist_failure = false;
    for _ in 0..2 {
        let event = tokio::time::timeout(Duration::from_secs(1), f.events.recv())
            .await
            .unwrap()
            .unwrap();
        if let Event::SeenPersistFailed { batch_id, error } = event {
            assert_eq!(batch_id, BatchId(9));
            assert!(error.contains("disk full"));
            saw_persist_failure = true;
        }
    }
    assert!(saw_persist_failure);
}

#[tokio::test]
async fn test_dispatch_emits_dispatched_event() {
    let mut f = fixture(NotificationDisposition::StackNotDismissible);

    let status = batch_status(10, DownloadStatus::Downloading, false);
    f.dispatcher.update_notification(&status).await.unwrap();

    let event = f.events.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::NotificationDispatched {
            batch_id,
            disposition: NotificationDisposition::StackNotDismissible,
        } if batch_id == BatchId(10)
    ));
}
