use serde::Serialize;

use crate::domain::AudioRecord;
use crate::presentation::config::MediaSettings;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Persisted transcription record as returned by the audio endpoints.
#[derive(Serialize)]
pub struct AudioRecordResponse {
    pub id: String,
    pub original_filename: String,
    pub audio_url: String,
    pub transcription: Option<String>,
    pub error_message: Option<String>,
    pub is_processed: bool,
    pub is_successful: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl AudioRecordResponse {
    pub fn from_record(record: &AudioRecord, media: &MediaSettings) -> Self {
        Self {
            id: record.id.as_uuid().to_string(),
            original_filename: record.original_filename.clone(),
            audio_url: media.public_url(&record.storage_path),
            transcription: record.transcription.clone(),
            error_message: record.error_message.clone(),
            is_processed: record.is_processed,
            is_successful: record.is_successful,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}
