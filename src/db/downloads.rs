//! Download row CRUD and bulk status updates.

use crate::error::DatabaseError;
use crate::types::{BatchId, ControlStatus, DownloadControl, DownloadId, DownloadStatus};
use crate::{Error, Result};

use super::{ControlStatusRow, Database, DownloadRecord, NewDownload};

/// Maximum number of ids bound into a single `IN (...)` predicate.
///
/// SQLite's default host-parameter limit is 999; one slot is reserved for
/// the status value.
pub(crate) const BULK_UPDATE_CHUNK_SIZE: usize = 500;

impl Database {
    /// Insert a new download record
    pub async fn insert_download(&self, download: &NewDownload) -> Result<DownloadId> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO downloads (
                batch_id, uri, file_path, status, control,
                current_bytes, total_bytes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(download.batch_id)
        .bind(&download.uri)
        .bind(&download.file_path)
        .bind(download.status)
        .bind(download.control)
        .bind(0i64) // current_bytes
        .bind(download.total_bytes)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert download: {}",
                e
            )))
        })?;

        Ok(DownloadId(result.last_insert_rowid()))
    }

    /// List all downloads, ordered by ascending batch id
    ///
    /// Ties within a batch break on ascending download id, so the sequence is
    /// stable across calls.
    pub async fn list_downloads(&self) -> Result<Vec<DownloadRecord>> {
        let rows = sqlx::query_as::<_, DownloadRecord>(
            r#"
            SELECT
                id, batch_id, uri, file_path, status, control,
                current_bytes, total_bytes, created_at
            FROM downloads
            ORDER BY batch_id ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list downloads: {}",
                e
            )))
        })?;

        Ok(rows)
    }

    /// List the downloads belonging to one batch
    pub async fn list_downloads_for_batch(&self, batch_id: BatchId) -> Result<Vec<DownloadRecord>> {
        let rows = sqlx::query_as::<_, DownloadRecord>(
            r#"
            SELECT
                id, batch_id, uri, file_path, status, control,
                current_bytes, total_bytes, created_at
            FROM downloads
            WHERE batch_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list downloads for batch: {}",
                e
            )))
        })?;

        Ok(rows)
    }

    /// Get a download by ID
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row matches the id.
    pub async fn get_download(&self, id: DownloadId) -> Result<DownloadRecord> {
        let row = sqlx::query_as::<_, DownloadRecord>(
            r#"
            SELECT
                id, batch_id, uri, file_path, status, control,
                current_bytes, total_bytes, created_at
            FROM downloads
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get download: {}",
                e
            )))
        })?;

        row.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("download {}", id)))
        })
    }

    /// Get the control-status projection for a download
    ///
    /// Reads only the `control` and `status` columns.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row matches the id.
    pub async fn get_control_status(&self, id: DownloadId) -> Result<ControlStatus> {
        let row = sqlx::query_as::<_, ControlStatusRow>(
            r#"
            SELECT control, status FROM downloads WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get control status: {}",
                e
            )))
        })?;

        row.map(ControlStatus::from).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("download {}", id)))
        })
    }

    /// Set the pause/run control of a download
    pub async fn set_control(&self, id: DownloadId, control: DownloadControl) -> Result<()> {
        sqlx::query("UPDATE downloads SET control = ? WHERE id = ?")
            .bind(control.to_i32())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to set control: {}",
                    e
                )))
            })?;

        Ok(())
    }

    /// Move exactly the given downloads to a new status
    ///
    /// Performs zero store operations when `ids` is empty. Large id sets are
    /// split into chunks of [`BULK_UPDATE_CHUNK_SIZE`] bound parameters per
    /// statement; ids with no matching row are ignored.
    pub async fn move_status_to(&self, ids: &[DownloadId], status: DownloadStatus) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        for chunk in ids.chunks(BULK_UPDATE_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("UPDATE downloads SET status = ? WHERE id IN ({placeholders})");

            let mut query = sqlx::query(&sql).bind(status.to_i32());
            for id in chunk {
                query = query.bind(*id);
            }

            query.execute(&self.pool).await.map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to move downloads status: {}",
                    e
                )))
            })?;
        }

        tracing::debug!(
            count = ids.len(),
            status = status.to_i32(),
            "moved downloads to new status"
        );

        Ok(())
    }

    /// Delete all downloads belonging to one batch
    pub async fn delete_downloads_for_batch(&self, batch_id: BatchId) -> Result<()> {
        sqlx::query("DELETE FROM downloads WHERE batch_id = ?")
            .bind(batch_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to delete downloads for batch: {}",
                    e
                )))
            })?;

        Ok(())
    }
}
