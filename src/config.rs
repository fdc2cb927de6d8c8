//! Configuration types for batch-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Persistence configuration (database location)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file (default: "./downloads.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Notification dispatch configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// How long a dispatch call waits for the notification service handle
    /// before failing with `ServiceUnavailable` (default: 10 seconds)
    #[serde(default = "default_service_wait_timeout")]
    pub service_wait_timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            service_wait_timeout: default_service_wait_timeout(),
        }
    }
}

/// Main configuration for [`crate::BatchDownloader`]
///
/// All fields have sensible defaults; construct with struct-update syntax:
///
/// ```
/// use batch_dl::Config;
///
/// let config = Config {
///     store: batch_dl::StoreConfig {
///         database_path: "/var/lib/app/downloads.db".into(),
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persistence configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Notification dispatch configuration
    #[serde(default)]
    pub notifications: NotifierConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./downloads.db")
}

fn default_service_wait_timeout() -> Duration {
    Duration::from_secs(10)
}
