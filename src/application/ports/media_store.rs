use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::MediaPath;

/// Persistence of media files under the configured media root.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Stream a request body to a file, returning the total bytes written.
    ///
    /// A stream error aborts the write; no partial file survives.
    async fn store_stream(
        &self,
        path: &MediaPath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, MediaStoreError>;

    /// Write a complete in-memory file.
    async fn store_bytes(&self, path: &MediaPath, data: Bytes) -> Result<(), MediaStoreError>;

    async fn fetch(&self, path: &MediaPath) -> Result<Vec<u8>, MediaStoreError>;

    async fn delete(&self, path: &MediaPath) -> Result<(), MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
