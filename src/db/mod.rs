//! Database layer for batch-dl
//!
//! Handles SQLite persistence for batches and downloads.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`downloads`] — Download row CRUD and bulk status updates
//! - [`batches`] — Batch row CRUD and the notification-seen flag
//! - [`repository`] — The [`DownloadsRepository`] capability trait

use crate::types::{ControlStatus, DownloadControl, DownloadStatus};
use sqlx::{FromRow, sqlite::SqlitePool};

mod batches;
mod downloads;
mod migrations;
mod repository;

pub use repository::DownloadsRepository;

/// New download to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewDownload {
    /// Batch this download belongs to
    pub batch_id: crate::types::BatchId,
    /// Remote URI the file is fetched from
    pub uri: String,
    /// Local destination path, if already assigned
    pub file_path: Option<String>,
    /// Current status (see [`crate::types::DownloadStatus`])
    pub status: i32,
    /// Pause/run control (see [`crate::types::DownloadControl`])
    pub control: i32,
    /// Total size in bytes, if known
    pub total_bytes: Option<i64>,
}

/// Download record from database
#[derive(Debug, Clone, FromRow)]
pub struct DownloadRecord {
    /// Unique database ID
    pub id: i64,
    /// Batch this download belongs to
    pub batch_id: i64,
    /// Remote URI the file is fetched from
    pub uri: String,
    /// Local destination path, if already assigned
    pub file_path: Option<String>,
    /// Current status (see [`crate::types::DownloadStatus`])
    pub status: i32,
    /// Pause/run control (see [`crate::types::DownloadControl`])
    pub control: i32,
    /// Number of bytes downloaded so far
    pub current_bytes: i64,
    /// Total size in bytes, if known
    pub total_bytes: Option<i64>,
    /// Unix timestamp when the download row was created
    pub created_at: i64,
}

/// New batch to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewBatch {
    /// User-visible batch title
    pub title: String,
    /// Current aggregate status (see [`crate::types::DownloadStatus`])
    pub status: i32,
}

/// Batch record from database
#[derive(Debug, Clone, FromRow)]
pub struct BatchRecord {
    /// Unique database ID
    pub id: i64,
    /// User-visible batch title
    pub title: String,
    /// Current aggregate status (see [`crate::types::DownloadStatus`])
    pub status: i32,
    /// Whether the terminal notification for this batch has been seen
    pub notification_seen: bool,
    /// Unix timestamp when the batch row was created
    pub created_at: i64,
}

/// Control-status projection straight from SQLite
#[derive(Debug, Clone, Copy, FromRow)]
pub(crate) struct ControlStatusRow {
    pub(crate) control: i32,
    pub(crate) status: i32,
}

impl From<ControlStatusRow> for ControlStatus {
    fn from(row: ControlStatusRow) -> Self {
        ControlStatus {
            control: DownloadControl::from_i32(row.control),
            status: DownloadStatus::from_i32(row.status),
        }
    }
}

/// Database handle for batch-dl
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
