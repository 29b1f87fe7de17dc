use std::sync::Arc;

use crate::application::ports::{
    AudioRecordRepository, SpeechRecognizer, SpeechSynthesizer, TextGenerator,
};
use crate::application::services::{IngestService, ReplyService};
use crate::presentation::config::Settings;

pub struct AppState<R, G, S>
where
    R: SpeechRecognizer,
    G: TextGenerator,
    S: SpeechSynthesizer,
{
    pub ingest_service: Arc<IngestService<R>>,
    pub reply_service: Arc<ReplyService<G, S>>,
    pub audio_records: Arc<dyn AudioRecordRepository>,
    pub settings: Settings,
}

impl<R, G, S> Clone for AppState<R, G, S>
where
    R: SpeechRecognizer,
    G: TextGenerator,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            ingest_service: Arc::clone(&self.ingest_service),
            reply_service: Arc::clone(&self.reply_service),
            audio_records: Arc::clone(&self.audio_records),
            settings: self.settings.clone(),
        }
    }
}
