//! # batch-dl
//!
//! Backend library for applications that manage batches of downloads: it
//! persists download/batch metadata in a local SQLite store and drives
//! user-facing notifications as batch status changes.
//!
//! ## Design Philosophy
//!
//! batch-dl is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Engine-agnostic** - The download engine and batch status computation
//!   belong to the embedder; this crate persists and presents their state
//! - **Event-driven** - Consumers subscribe to notifier events, no polling
//!   required
//! - **Mockable at the seams** - Storage, notification service, and
//!   notification creation are all trait seams
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use batch_dl::{
//!     BatchDownloader, BatchStatus, Config, NotificationCreator,
//!     NotificationDisposition, NotificationInformation,
//! };
//!
//! struct ProgressCreator;
//!
//! impl NotificationCreator for ProgressCreator {
//!     fn create_notification(
//!         &self,
//!         batch_status: &BatchStatus,
//!     ) -> batch_dl::Result<NotificationInformation> {
//!         Ok(NotificationInformation {
//!             batch_id: batch_status.batch_id,
//!             title: batch_status.title.clone(),
//!             body: "Downloading".to_string(),
//!             disposition: NotificationDisposition::SingleUpdate,
//!         })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = BatchDownloader::new(Config::default(), Arc::new(ProgressCreator)).await?;
//!
//!     // Subscribe to notifier events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Embedding facade
pub mod manager;
/// Notification dispatch
pub mod notifier;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, NotifierConfig, StoreConfig};
pub use db::{BatchRecord, Database, DownloadRecord, DownloadsRepository, NewBatch, NewDownload};
pub use error::{DatabaseError, Error, NotificationError, Result};
pub use manager::BatchDownloader;
pub use notifier::{
    NotificationCreator, NotificationDispatcher, NotificationSeenStore, NotificationService,
};
pub use types::{
    BatchId, BatchStatus, ControlStatus, DownloadControl, DownloadId, DownloadStatus, Event,
    NotificationDisposition, NotificationInformation,
};
