use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{AudioRecordRepository, RepositoryError};
use crate::domain::{AudioRecord, MediaPath, RecordId};

pub struct PgAudioRecordRepository {
    pool: PgPool,
}

impl PgAudioRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AudioRecordRow {
    id: Uuid,
    original_filename: String,
    storage_path: String,
    transcription: Option<String>,
    error_message: Option<String>,
    is_processed: bool,
    is_successful: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AudioRecordRow> for AudioRecord {
    fn from(row: AudioRecordRow) -> Self {
        Self {
            id: RecordId::from_uuid(row.id),
            original_filename: row.original_filename,
            storage_path: MediaPath::from_raw(row.storage_path),
            transcription: row.transcription,
            error_message: row.error_message,
            is_processed: row.is_processed,
            is_successful: row.is_successful,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, original_filename, storage_path, transcription, \
     error_message, is_processed, is_successful, created_at, updated_at";

#[async_trait]
impl AudioRecordRepository for PgAudioRecordRepository {
    #[instrument(skip(self, record), fields(record_id = %record.id.as_uuid()))]
    async fn create(&self, record: &AudioRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO audio_records
                (id, original_filename, storage_path, transcription, error_message,
                 is_processed, is_successful, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.original_filename)
        .bind(record.storage_path.as_str())
        .bind(&record.transcription)
        .bind(&record.error_message)
        .bind(record.is_processed)
        .bind(record.is_successful)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, record), fields(record_id = %record.id.as_uuid()))]
    async fn update_outcome(&self, record: &AudioRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE audio_records
            SET transcription = $2,
                error_message = $3,
                is_processed = $4,
                is_successful = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.transcription)
        .bind(&record.error_message)
        .bind(record.is_processed)
        .bind(record.is_successful)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(record_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: RecordId) -> Result<Option<AudioRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, AudioRecordRow>(&format!(
            "SELECT {} FROM audio_records WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(row.map(AudioRecord::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64) -> Result<Vec<AudioRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, AudioRecordRow>(&format!(
            "SELECT {} FROM audio_records ORDER BY created_at DESC LIMIT $1",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(AudioRecord::from).collect())
    }
}
