use std::io;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::stream::BoxStream;
use uuid::Uuid;

use crate::application::ports::{
    AudioRecordRepository, MediaStore, MediaStoreError, RepositoryError, SpeechRecognizer,
};
use crate::application::services::TranscriptionService;
use crate::domain::{AudioRecord, MediaPath};
use crate::infrastructure::audio::wav;

/// Ingests an upload: store the bytes, create a pending record, transcribe,
/// resolve the record with the outcome.
///
/// The record is only created after the file write has completed, so a
/// failed upload never leaves a partial record behind. The pending row is
/// the explicit intermediate state; a crash before resolution leaves it
/// visible as unprocessed.
pub struct IngestService<R>
where
    R: SpeechRecognizer,
{
    media_store: Arc<dyn MediaStore>,
    records: Arc<dyn AudioRecordRepository>,
    transcription: Arc<TranscriptionService<R>>,
}

/// Result of a raw-body upload.
#[derive(Debug)]
pub struct RawUpload {
    pub record: AudioRecord,
    pub bytes_received: u64,
    pub duration_estimate_secs: f64,
}

impl<R> IngestService<R>
where
    R: SpeechRecognizer,
{
    pub fn new(
        media_store: Arc<dyn MediaStore>,
        records: Arc<dyn AudioRecordRepository>,
        transcription: Arc<TranscriptionService<R>>,
    ) -> Self {
        Self {
            media_store,
            records,
            transcription,
        }
    }

    /// Multipart upload path: the whole file is already in memory.
    #[tracing::instrument(skip(self, data), fields(filename = %original_filename, bytes = data.len()))]
    pub async fn ingest_bytes(
        &self,
        original_filename: String,
        data: Bytes,
    ) -> Result<AudioRecord, IngestError> {
        let storage_path =
            MediaPath::audio_upload(&unique_upload_name(&original_filename));
        self.media_store.store_bytes(&storage_path, data).await?;

        self.transcribe_stored(original_filename, storage_path).await
    }

    /// Raw streamed upload path: bytes are written to disk as they arrive.
    #[tracing::instrument(skip(self, stream, content_length))]
    pub async fn ingest_stream(
        &self,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<RawUpload, IngestError> {
        let filename = raw_upload_name();
        let storage_path = MediaPath::audio_upload(&filename);

        let bytes_received = self
            .media_store
            .store_stream(&storage_path, stream, content_length)
            .await?;

        let duration_estimate_secs = wav::estimate_duration_secs(bytes_received);
        tracing::info!(
            bytes = bytes_received,
            duration_estimate_secs,
            "Raw upload stored"
        );

        let record = self.transcribe_stored(filename, storage_path).await?;

        Ok(RawUpload {
            record,
            bytes_received,
            duration_estimate_secs,
        })
    }

    async fn transcribe_stored(
        &self,
        original_filename: String,
        storage_path: MediaPath,
    ) -> Result<AudioRecord, IngestError> {
        let mut record = AudioRecord::pending(original_filename, storage_path);
        self.records.create(&record).await?;

        let outcome = self.transcription.transcribe(&record.storage_path).await;
        record.resolve(&outcome);
        self.records.update_outcome(&record).await?;

        tracing::info!(
            record_id = %record.id.as_uuid(),
            successful = record.is_successful,
            "Upload transcription resolved"
        );

        Ok(record)
    }
}

/// Unique name for a multipart upload, keeping the original name readable.
fn unique_upload_name(original_filename: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), original_filename)
}

/// Timestamp-derived name for a raw streamed upload.
fn raw_upload_name() -> String {
    format!("raw_{}.wav", Utc::now().format("%Y%m%d_%H%M%S_%3f"))
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("media storage: {0}")]
    Storage(#[from] MediaStoreError),
    #[error("record store: {0}")]
    Store(#[from] RepositoryError),
}
