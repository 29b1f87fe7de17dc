use chrono::{DateTime, Utc};

use super::{MediaPath, RecordId, TranscriptionOutcome};

/// One uploaded audio file and the result of transcribing it.
///
/// Records are created pending and resolved exactly once by the
/// transcription step; a resolved record is never mutated again.
#[derive(Debug, Clone)]
pub struct AudioRecord {
    pub id: RecordId,
    pub original_filename: String,
    pub storage_path: MediaPath,
    pub transcription: Option<String>,
    pub error_message: Option<String>,
    pub is_processed: bool,
    pub is_successful: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AudioRecord {
    pub fn pending(original_filename: String, storage_path: MediaPath) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            original_filename,
            storage_path,
            transcription: None,
            error_message: None,
            is_processed: false,
            is_successful: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve a pending record with the transcription outcome.
    ///
    /// A record that is already processed is left untouched.
    pub fn resolve(&mut self, outcome: &TranscriptionOutcome) {
        if self.is_processed {
            return;
        }

        match outcome {
            TranscriptionOutcome::Success { text } => {
                self.transcription = Some(text.clone());
                self.error_message = None;
                self.is_successful = true;
            }
            TranscriptionOutcome::Failure { error } => {
                self.transcription = None;
                self.error_message = Some(error.clone());
                self.is_successful = false;
            }
        }
        self.is_processed = true;
        self.updated_at = Utc::now();
    }
}
