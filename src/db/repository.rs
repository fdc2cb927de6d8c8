//! The downloads repository capability trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ControlStatus, DownloadId, DownloadStatus};

use super::{Database, DownloadRecord};

/// Narrow read/write interface over the persisted download rows
///
/// Callers program against this trait so the storage engine stays swappable
/// and mockable; [`Database`] provides the SQLite-backed implementation. All
/// query shaping (selection, ordering, placeholder generation) lives behind
/// it — callers never see SQL.
#[async_trait]
pub trait DownloadsRepository: Send + Sync {
    /// List every download record, ordered by ascending batch id
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    async fn list_downloads(&self) -> Result<Vec<DownloadRecord>>;

    /// Get the record for an exact download id
    ///
    /// # Errors
    ///
    /// Returns [`crate::DatabaseError::NotFound`] if no row matches, or an
    /// error if the store query fails.
    async fn get_download(&self, id: DownloadId) -> Result<DownloadRecord>;

    /// Get the lightweight control-status projection for a download
    ///
    /// # Errors
    ///
    /// Returns [`crate::DatabaseError::NotFound`] if no row matches, or an
    /// error if the store query fails.
    async fn get_control_status(&self, id: DownloadId) -> Result<ControlStatus>;

    /// Bulk-update the status of exactly the given downloads
    ///
    /// A no-op for an empty id set.
    ///
    /// # Errors
    ///
    /// Returns an error if any chunk of the update fails; earlier chunks stay
    /// applied (no cross-statement transaction).
    async fn move_status_to(&self, ids: &[DownloadId], status: DownloadStatus) -> Result<()>;
}

#[async_trait]
impl DownloadsRepository for Database {
    async fn list_downloads(&self) -> Result<Vec<DownloadRecord>> {
        Database::list_downloads(self).await
    }

    async fn get_download(&self, id: DownloadId) -> Result<DownloadRecord> {
        Database::get_download(self, id).await
    }

    async fn get_control_status(&self, id: DownloadId) -> Result<ControlStatus> {
        Database::get_control_status(self, id).await
    }

    async fn move_status_to(&self, ids: &[DownloadId], status: DownloadStatus) -> Result<()> {
        Database::move_status_to(self, ids, status).await
    }
}
