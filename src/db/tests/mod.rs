use crate::db::{NewBatch, NewDownload};
use crate::types::{BatchId, DownloadControl, DownloadStatus};


/// Create a minimal NewBatch for use in tests
fn test_batch(title: &str) -> NewBatch {
    NewBatch {
        title: title.to_string(),
        status: DownloadStatus::Queued.to_i32(),
    }
}

/// Create a minimal NewDownload for use in tests
fn test_download(batch_id: BatchId) -> NewDownload {
    NewDownload {
        batch_id,
        uri: "https://example.com/file.bin".to_string(),
        file_path: None,
        status: DownloadStatus::Queued.to_i32(),
        control: DownloadControl::Run.to_i32(),
        total_bytes: Some(1024),
    }
}
