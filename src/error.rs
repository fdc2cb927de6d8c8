//! Error types for batch-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Database, Notification, Config)
//! - `#[from]` conversions so callers can use `?` at the crate boundary

use std::time::Duration;
use thiserror::Error;

/// Result type alias for batch-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for batch-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "database_path")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Notification dispatch error
    #[error("notification error: {0}")]
    Notification(#[from] NotificationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Record not found
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Notification dispatch errors
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notification service handle never became available
    #[error("notification service unavailable after waiting {waited:?}")]
    ServiceUnavailable {
        /// How long the dispatcher waited before giving up
        waited: Duration,
    },

    /// The notification creator could not build a notification for a batch
    #[error("failed to create notification: {0}")]
    CreationFailed(String),

    /// The notification service rejected a dispatch call
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),
}
