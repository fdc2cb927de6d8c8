//! Notification dispatch decisions per batch-status update.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};

use crate::error::NotificationError;
use crate::types::{BatchId, BatchStatus, DownloadStatus, Event, NotificationDisposition};
use crate::{Error, Result};

use super::{NotificationCreator, NotificationSeenStore, NotificationService};

const NOTIFICATION_SEEN: bool = true;

/// Decides which notification action to take for a batch's current status
///
/// Each [`update_notification`](Self::update_notification) call waits for the
/// notification service handle to be attached, guards against already-seen
/// notifications, clears any previously stacked entry, and routes to exactly
/// one terminal action based on the notification's stacking disposition.
///
/// The service handle arrives asynchronously (typically from a platform
/// lifecycle callback); [`set_service`](Self::set_service) wakes all pending
/// dispatch calls.
pub struct NotificationDispatcher {
    service_tx: watch::Sender<Option<Arc<dyn NotificationService>>>,
    notification_creator: Arc<dyn NotificationCreator>,
    seen_store: Arc<dyn NotificationSeenStore>,
    event_tx: broadcast::Sender<Event>,
    service_wait_timeout: Duration,
}

impl NotificationDispatcher {
    /// Create a new dispatcher with no service attached yet
    pub fn new(
        notification_creator: Arc<dyn NotificationCreator>,
        seen_store: Arc<dyn NotificationSeenStore>,
        event_tx: broadcast::Sender<Event>,
        service_wait_timeout: Duration,
    ) -> Self {
        let (service_tx, _) = watch::channel::<Option<Arc<dyn NotificationService>>>(None);

        Self {
            service_tx,
            notification_creator,
            seen_store,
            event_tx,
            service_wait_timeout,
        }
    }

    /// Attach the notification service handle, waking any pending dispatch calls
    pub fn set_service(&self, service: Arc<dyn NotificationService>) {
        self.service_tx.send_replace(Some(service));
        tracing::info!("notification service attached");
    }

    /// Reflect a batch's current status as a user-facing notification
    ///
    /// Waits up to the configured timeout for the service handle, then:
    /// suppresses the update if the batch's notification was already seen,
    /// dismisses any previously stacked notification, persists the seen flag
    /// asynchronously when the batch just reached [`DownloadStatus::Downloaded`],
    /// and routes to the terminal action matching the notification's
    /// disposition.
    ///
    /// Concurrent calls for different batches are independent; ordering
    /// between overlapping calls for the same batch is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::ServiceUnavailable`] if no service handle
    /// is attached within the timeout, or propagates creator/service errors.
    pub async fn update_notification(&self, batch_status: &BatchStatus) -> Result<()> {
        let service = self.wait_for_service().await?;
        let batch_id = batch_status.batch_id;

        if batch_status.notification_seen {
            tracing::debug!(batch_id = %batch_id, "notification has already been seen");
            self.event_tx
                .send(Event::NotificationSuppressed { batch_id })
                .ok();
            return Ok(());
        }

        let notification = self.notification_creator.create_notification(batch_status)?;

        // Always clear any previously stacked entry before deciding the next
        // action, so a batch never shows twice in the stack.
        service.dismiss_stacked_notification(&notification).await?;

        if batch_status.status == DownloadStatus::Downloaded {
            self.persist_notification_seen(batch_id);
        }

        let disposition = notification.disposition;
        match disposition {
            NotificationDisposition::StackDismissible => {
                service.stack_notification(&notification).await?;
            }
            NotificationDisposition::StackNotDismissible => {
                service.stack_notification_not_dismissible(&notification).await?;
            }
            NotificationDisposition::SingleUpdate => {
                service.update_notification(&notification).await?;
            }
        }

        tracing::debug!(batch_id = %batch_id, ?disposition, "notification dispatched");
        self.event_tx
            .send(Event::NotificationDispatched {
                batch_id,
                disposition,
            })
            .ok();

        Ok(())
    }

    /// Wait until a service handle has been attached via [`set_service`](Self::set_service)
    ///
    /// Suspends on the watch channel rather than polling; bounded by the
    /// configured timeout.
    async fn wait_for_service(&self) -> Result<Arc<dyn NotificationService>> {
        let mut rx = self.service_tx.subscribe();

        let service = tokio::time::timeout(self.service_wait_timeout, async move {
            loop {
                if let Some(service) = rx.borrow_and_update().clone() {
                    return service;
                }
                if rx.changed().await.is_err() {
                    // Sender dropped with no service attached; wait out the timeout
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .map_err(|_| {
            Error::Notification(NotificationError::ServiceUnavailable {
                waited: self.service_wait_timeout,
            })
        })?;

        Ok(service)
    }

    /// Persist the seen flag for a batch without blocking the dispatch sequence
    ///
    /// Spawned as a detached task; a failure is surfaced as a warning and an
    /// [`Event::SeenPersistFailed`] rather than an error on the dispatch call.
    fn persist_notification_seen(&self, batch_id: BatchId) {
        let seen_store = Arc::clone(&self.seen_store);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = seen_store
                .update_notification_seen(batch_id, NOTIFICATION_SEEN)
                .await
            {
                tracing::warn!(batch_id = %batch_id, error = %e, "failed to persist notification seen flag");
                event_tx
                    .send(Event::SeenPersistFailed {
                        batch_id,
                        error: e.to_string(),
                    })
                    .ok();
            }
        });
    }
}
