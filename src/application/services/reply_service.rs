use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use uuid::Uuid;

use crate::application::ports::{
    GenerationRepository, MediaStore, RepositoryError, SpeechSynthesizer, TextGenerator,
    TextGeneratorError,
};
use crate::domain::{GenerationId, GenerationRequest, MediaPath};

/// Fixed instruction suffix appended to every generation prompt.
pub const SPEAKABLE_SUFFIX: &str = " in 50 words or less. Format the answer for text-to-speech: \
     Avoid symbols, and use natural language that sounds good when spoken.";

/// Produces a spoken reply for a transcript: generate text, synthesize it,
/// and persist the generation request.
///
/// Synthesis failures are absorbed: the reply carries a null audio path and
/// the caller decides how to surface it. The generated text itself is
/// returned verbatim; the word limit lives only in the prompt.
pub struct ReplyService<G, S>
where
    G: TextGenerator,
    S: SpeechSynthesizer,
{
    generator: Arc<G>,
    synthesizer: Arc<S>,
    generations: Arc<dyn GenerationRepository>,
    media_store: Arc<dyn MediaStore>,
    language: String,
}

/// Outcome of one spoken-reply cycle.
#[derive(Debug)]
pub struct SpokenReply {
    pub generation_id: GenerationId,
    pub response_text: String,
    pub audio_path: Option<MediaPath>,
}

impl<G, S> ReplyService<G, S>
where
    G: TextGenerator,
    S: SpeechSynthesizer,
{
    pub fn new(
        generator: Arc<G>,
        synthesizer: Arc<S>,
        generations: Arc<dyn GenerationRepository>,
        media_store: Arc<dyn MediaStore>,
        language: String,
    ) -> Self {
        Self {
            generator,
            synthesizer,
            generations,
            media_store,
            language,
        }
    }

    #[tracing::instrument(skip(self, transcript), fields(transcript_chars = transcript.len()))]
    pub async fn respond(&self, transcript: &str) -> Result<SpokenReply, ReplyError> {
        let request = GenerationRequest::new(
            transcript.to_string(),
            Some(json!({ "transcription": transcript })),
        );
        self.generations
            .create(&request)
            .await
            .map_err(ReplyError::Store)?;

        let prompt = format!("{}{}", transcript, SPEAKABLE_SUFFIX);
        let response_text = self
            .generator
            .generate(&prompt)
            .await
            .map_err(ReplyError::Generation)?;

        let audio_path = self.synthesize_to_media(&response_text).await;

        if let Some(path) = &audio_path {
            if let Err(e) = self.generations.mark_processed(request.id, path).await {
                tracing::warn!(error = %e, "Failed to mark generation request processed");
            }
        }

        Ok(SpokenReply {
            generation_id: request.id,
            response_text,
            audio_path,
        })
    }

    /// Synthesize and store the reply audio under a fresh random filename.
    ///
    /// Returns `None` on any failure; nothing is raised past this point.
    async fn synthesize_to_media(&self, text: &str) -> Option<MediaPath> {
        let audio = match self.synthesizer.synthesize(text, &self.language).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::error!(error = %e, "Speech synthesis failed");
                return None;
            }
        };

        let path = MediaPath::generated_audio(&format!("{}.wav", Uuid::new_v4()));
        match self.media_store.store_bytes(&path, Bytes::from(audio)).await {
            Ok(()) => {
                tracing::info!(path = %path, "Synthesized audio stored");
                Some(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store synthesized audio");
                None
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("record store: {0}")]
    Store(RepositoryError),
    #[error("generation: {0}")]
    Generation(TextGeneratorError),
}
