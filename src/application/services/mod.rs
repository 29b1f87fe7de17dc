mod ingest_service;
mod reply_service;
mod transcription_service;

pub use ingest_service::{IngestError, IngestService, RawUpload};
pub use reply_service::{ReplyError, ReplyService, SpokenReply, SPEAKABLE_SUFFIX};
pub use transcription_service::TranscriptionService;
