//! Trait seams for notification dispatch

use async_trait::async_trait;

use crate::Result;
use crate::types::{BatchId, BatchStatus, NotificationInformation};

/// Handle to the platform notification service
///
/// The dispatcher calls exactly one of the three terminal actions per update
/// (`stack_notification`, `stack_notification_not_dismissible`,
/// `update_notification`), always after `dismiss_stacked_notification`.
///
/// Implementations talk to the real presentation layer; tests substitute a
/// recording mock.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Clear any previously stacked notification for the batch
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying service call fails.
    async fn dismiss_stacked_notification(
        &self,
        notification: &NotificationInformation,
    ) -> Result<()>;

    /// Show the notification stacked with others, dismissible by the user
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying service call fails.
    async fn stack_notification(&self, notification: &NotificationInformation) -> Result<()>;

    /// Show the notification stacked with others, not dismissible
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying service call fails.
    async fn stack_notification_not_dismissible(
        &self,
        notification: &NotificationInformation,
    ) -> Result<()>;

    /// Update the single in-place notification
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying service call fails.
    async fn update_notification(&self, notification: &NotificationInformation) -> Result<()>;
}

/// Builds the user-facing notification projection for a batch status
pub trait NotificationCreator: Send + Sync {
    /// Derive what to show (title, body, stacking disposition) from a batch status
    ///
    /// # Errors
    ///
    /// Returns [`crate::NotificationError::CreationFailed`] if no notification
    /// can be built for the given status.
    fn create_notification(&self, batch_status: &BatchStatus) -> Result<NotificationInformation>;
}

/// Persistence side-channel for the per-batch notification-seen flag
///
/// Implemented by [`crate::Database`]; the dispatcher writes through it
/// asynchronously when a batch reaches its terminal status.
#[async_trait]
pub trait NotificationSeenStore: Send + Sync {
    /// Persist whether the terminal notification for a batch has been seen
    ///
    /// # Errors
    ///
    /// Returns an error if the store update fails.
    async fn update_notification_seen(&self, batch_id: BatchId, seen: bool) -> Result<()>;
}
