use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{AudioRecord, RecordId};

/// Record store for uploaded audio and its transcription outcome.
#[async_trait]
pub trait AudioRecordRepository: Send + Sync {
    /// Insert a pending record.
    async fn create(&self, record: &AudioRecord) -> Result<(), RepositoryError>;

    /// Persist the terminal transcription outcome of a record.
    async fn update_outcome(&self, record: &AudioRecord) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: RecordId) -> Result<Option<AudioRecord>, RepositoryError>;

    /// Most recent records first.
    async fn list(&self, limit: i64) -> Result<Vec<AudioRecord>, RepositoryError>;
}
