use chrono::{DateTime, Utc};

use super::{GenerationId, MediaPath};

/// One text-in/audio-out generation cycle.
///
/// Created when a generation request begins; marked processed once the
/// synthesized audio has been written.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub id: GenerationId,
    pub input_text: String,
    pub processed: bool,
    pub audio_path: Option<MediaPath>,
    pub original_request: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn new(input_text: String, original_request: Option<serde_json::Value>) -> Self {
        Self {
            id: GenerationId::new(),
            input_text,
            processed: false,
            audio_path: None,
            original_request,
            created_at: Utc::now(),
        }
    }
}
