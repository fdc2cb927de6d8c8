//! Batch row CRUD and the notification-seen flag.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::notifier::NotificationSeenStore;
use crate::types::BatchId;
use crate::{Error, Result};

use super::{BatchRecord, Database, NewBatch};

impl Database {
    /// Insert a new batch record
    pub async fn insert_batch(&self, batch: &NewBatch) -> Result<BatchId> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO batches (title, status, notification_seen, created_at)
            VALUES (?, ?, 0, ?)
            "#,
        )
        .bind(&batch.title)
        .bind(batch.status)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert batch: {}",
                e
            )))
        })?;

        Ok(BatchId(result.last_insert_rowid()))
    }

    /// Get a batch by ID
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row matches the id.
    pub async fn get_batch(&self, id: BatchId) -> Result<BatchRecord> {
        let row = sqlx::query_as::<_, BatchRecord>(
            r#"
            SELECT id, title, status, notification_seen, created_at
            FROM batches
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get batch: {}",
                e
            )))
        })?;

        row.ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("batch {}", id))))
    }

    /// Update a batch's aggregate status
    pub async fn update_batch_status(&self, id: BatchId, status: i32) -> Result<()> {
        sqlx::query("UPDATE batches SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to update batch status: {}",
                    e
                )))
            })?;

        Ok(())
    }

    /// Persist whether the terminal notification for a batch has been seen
    pub async fn update_notification_seen(&self, id: BatchId, seen: bool) -> Result<()> {
        sqlx::query("UPDATE batches SET notification_seen = ? WHERE id = ?")
            .bind(seen)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to update notification seen flag: {}",
                    e
                )))
            })?;

        Ok(())
    }
}

#[async_trait]
impl NotificationSeenStore for Database {
    async fn update_notification_seen(&self, batch_id: BatchId, seen: bool) -> Result<()> {
        Database::update_notification_seen(self, batch_id, seen).await
    }
}
