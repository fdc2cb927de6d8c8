//! Embedding facade wiring the store, the dispatcher, and the event channel.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::db::{Database, DownloadsRepository};
use crate::error::Result;
use crate::notifier::{
    NotificationCreator, NotificationDispatcher, NotificationSeenStore, NotificationService,
};
use crate::types::{BatchStatus, Event};

/// Capacity of the broadcast event channel; slow subscribers lag past this
const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Main embedding surface (cloneable - all fields are Arc-wrapped)
///
/// Owns the SQLite-backed store and the notification dispatcher. The download
/// engine and batch status computation live in the embedding application; this
/// type persists their state and reflects it as notifications.
#[derive(Clone)]
pub struct BatchDownloader {
    /// Database instance for persistence (wrapped in Arc for sharing across tasks)
    /// Public for integration tests to query download status
    pub db: Arc<Database>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
    /// Notification dispatcher (wrapped in Arc so dispatch calls can be spawned)
    dispatcher: Arc<NotificationDispatcher>,
}

impl BatchDownloader {
    /// Create a new BatchDownloader instance
    ///
    /// Opens (or creates) the SQLite database, runs migrations, and wires the
    /// notification dispatcher to the store's seen-flag side-channel. The
    /// notification service handle is attached later via
    /// [`set_notification_service`](Self::set_notification_service).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn new(config: Config, creator: Arc<dyn NotificationCreator>) -> Result<Self> {
        let db = Arc::new(Database::new(&config.store.database_path).await?);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let dispatcher = Arc::new(NotificationDispatcher::new(
            creator,
            Arc::clone(&db) as Arc<dyn NotificationSeenStore>,
            event_tx.clone(),
            config.notifications.service_wait_timeout,
        ));

        tracing::info!(
            database = %config.store.database_path.display(),
            "batch downloader initialized"
        );

        Ok(Self {
            db,
            event_tx,
            config: Arc::new(config),
            dispatcher,
        })
    }

    /// Subscribe to notifier events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Attach the platform notification service, waking pending dispatch calls
    pub fn set_notification_service(&self, service: Arc<dyn NotificationService>) {
        self.dispatcher.set_service(service);
    }

    /// Reflect a batch's current status as a user-facing notification
    ///
    /// See [`NotificationDispatcher::update_notification`] for the dispatch
    /// sequence and error semantics.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors (service wait timeout, creator or service
    /// failures).
    pub async fn update_notification(&self, batch_status: &BatchStatus) -> Result<()> {
        self.dispatcher.update_notification(batch_status).await
    }

    /// The downloads repository as a swappable capability handle
    pub fn repository(&self) -> Arc<dyn DownloadsRepository> {
        Arc::clone(&self.db) as Arc<dyn DownloadsRepository>
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gracefully shut down, closing the database connection pool
    pub async fn shutdown(&self) {
        tracing::info!("Initiating graceful shutdown");
        self.db.close().await;
        tracing::info!("Graceful shutdown complete");
    }
}
