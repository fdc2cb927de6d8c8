//! Core types for batch-dl

use serde::{Deserialize, Serialize};

/// Unique identifier for a download
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub i64);

impl DownloadId {
    /// Create a new DownloadId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DownloadId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<DownloadId> for i64 {
    fn from(id: DownloadId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for DownloadId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<DownloadId> for i64 {
    fn eq(&self, other: &DownloadId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DownloadId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for DownloadId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for DownloadId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for DownloadId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// Unique identifier for a batch of downloads
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub i64);

impl BatchId {
    /// Create a new BatchId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BatchId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BatchId> for i64 {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl sqlx::Type<sqlx::Sqlite> for BatchId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for BatchId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for BatchId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// Download status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Queued and waiting to start
    Queued,
    /// Currently downloading
    Downloading,
    /// Paused by user
    Paused,
    /// Waiting for network connectivity
    WaitingForNetwork,
    /// Failed with error
    Error,
    /// Marked for deletion, cleanup pending
    Deleting,
    /// Deleted
    Deleted,
    /// Successfully completed
    Downloaded,
}

impl DownloadStatus {
    /// Convert integer status code to DownloadStatus enum
    pub fn from_i32(status: i32) -> Self {
        match status {
            0 => DownloadStatus::Queued,
            1 => DownloadStatus::Downloading,
            2 => DownloadStatus::Paused,
            3 => DownloadStatus::WaitingForNetwork,
            4 => DownloadStatus::Error,
            5 => DownloadStatus::Deleting,
            6 => DownloadStatus::Deleted,
            7 => DownloadStatus::Downloaded,
            _ => DownloadStatus::Error, // Default to Error for unknown status
        }
    }

    /// Convert DownloadStatus enum to integer status code
    pub fn to_i32(&self) -> i32 {
        match self {
            DownloadStatus::Queued => 0,
            DownloadStatus::Downloading => 1,
            DownloadStatus::Paused => 2,
            DownloadStatus::WaitingForNetwork => 3,
            DownloadStatus::Error => 4,
            DownloadStatus::Deleting => 5,
            DownloadStatus::Deleted => 6,
            DownloadStatus::Downloaded => 7,
        }
    }
}

/// User-facing control state of a download, independent of its progress status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadControl {
    /// Download is allowed to run
    #[default]
    Run,
    /// Download is held paused by the user
    Paused,
}

impl DownloadControl {
    /// Convert integer control code to DownloadControl enum
    pub fn from_i32(control: i32) -> Self {
        match control {
            1 => DownloadControl::Paused,
            _ => DownloadControl::Run,
        }
    }

    /// Convert DownloadControl enum to integer control code
    pub fn to_i32(&self) -> i32 {
        match self {
            DownloadControl::Run => 0,
            DownloadControl::Paused => 1,
        }
    }
}

/// Lightweight control-status projection of a single download row
///
/// Cheaper to read than a full [`crate::db::DownloadRecord`] when only the
/// pause/run disposition and progress status are needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlStatus {
    /// Pause/run control state
    pub control: DownloadControl,
    /// Progress status
    pub status: DownloadStatus,
}

/// Aggregate status view of a batch, consumed by the notification dispatcher
///
/// Produced by the embedding application's status computation, not by this
/// crate. The dispatcher only reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    /// Batch this status describes
    pub batch_id: BatchId,
    /// User-visible batch title
    pub title: String,
    /// Current aggregate status
    pub status: DownloadStatus,
    /// Whether the user has already been shown this batch's terminal notification
    pub notification_seen: bool,
}

/// How a notification should be presented relative to others
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationDisposition {
    /// Stacked with other notifications, user can swipe it away
    StackDismissible,
    /// Stacked with other notifications, not dismissible (e.g. in-progress work)
    StackNotDismissible,
    /// Single notification updated in place
    SingleUpdate,
}

/// Derived, transient projection of a batch status describing what to show
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationInformation {
    /// Batch the notification belongs to
    pub batch_id: BatchId,
    /// Notification title
    pub title: String,
    /// Notification body text
    pub body: String,
    /// Stacking disposition
    pub disposition: NotificationDisposition,
}

/// Event emitted by the notifier
///
/// Consumers subscribe via [`crate::BatchDownloader::subscribe`]; no polling
/// required.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A notification action was delivered to the service
    NotificationDispatched {
        /// Batch the notification belongs to
        batch_id: BatchId,
        /// Which stacking disposition was routed
        disposition: NotificationDisposition,
    },

    /// A dispatch call was suppressed because the notification was already seen
    NotificationSuppressed {
        /// Batch whose notification was suppressed
        batch_id: BatchId,
    },

    /// The asynchronous seen-flag persist failed
    SeenPersistFailed {
        /// Batch whose seen flag could not be persisted
        batch_id: BatchId,
        /// Error message from the store
        error: String,
    },
}
