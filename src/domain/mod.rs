mod audio_record;
mod generation_id;
mod generation_request;
mod media_path;
mod record_id;
mod transcription_outcome;

pub use audio_record::AudioRecord;
pub use generation_id::GenerationId;
pub use generation_request::GenerationRequest;
pub use media_path::{AUDIO_UPLOADS_DIR, GENERATED_AUDIO_DIR, MediaPath};
pub use record_id::RecordId;
pub use transcription_outcome::TranscriptionOutcome;
