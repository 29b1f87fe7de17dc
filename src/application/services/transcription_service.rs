use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{MediaStore, MediaStoreError, RecognizerError, SpeechRecognizer};
use crate::domain::{MediaPath, TranscriptionOutcome};
use crate::infrastructure::audio::wav;

/// Transcribes a stored audio file.
///
/// Every failure is folded into a [`TranscriptionOutcome`]; this service
/// never returns an error value. The canonical WAV handed to the recognizer
/// is written to a per-call temporary file that is removed on every exit
/// path, including after the remote call.
pub struct TranscriptionService<R>
where
    R: SpeechRecognizer,
{
    recognizer: Arc<R>,
    media_store: Arc<dyn MediaStore>,
    scratch_dir: PathBuf,
    language: String,
}

impl<R> TranscriptionService<R>
where
    R: SpeechRecognizer,
{
    pub fn new(
        recognizer: Arc<R>,
        media_store: Arc<dyn MediaStore>,
        scratch_dir: PathBuf,
        language: String,
    ) -> std::io::Result<Self> {
        std::fs::create_dir_all(&scratch_dir)?;
        Ok(Self {
            recognizer,
            media_store,
            scratch_dir,
            language,
        })
    }

    #[tracing::instrument(skip(self), fields(path = %path))]
    pub async fn transcribe(&self, path: &MediaPath) -> TranscriptionOutcome {
        let data = match self.media_store.fetch(path).await {
            Ok(data) => data,
            Err(MediaStoreError::NotFound(detail)) => {
                tracing::error!(detail = %detail, "Audio file not found");
                return TranscriptionOutcome::failure("File not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read audio file");
                return TranscriptionOutcome::failure(e.to_string());
            }
        };

        tracing::debug!(bytes = data.len(), "Processing audio file");

        let decoded = match wav::decode_wav(&data) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load WAV file");
                return TranscriptionOutcome::failure(format!("Audio loading failed: {}", e));
            }
        };

        tracing::debug!(
            duration_secs = decoded.duration_secs(),
            sample_rate = decoded.sample_rate,
            "Audio decoded"
        );

        // Temp file guard lives until the remote call has finished; dropping
        // it removes the canonical WAV on every path out of this function.
        let canonical = match self.write_canonical(&decoded) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create canonical temp file");
                return TranscriptionOutcome::failure(format!("Failed to create temp file: {}", e));
            }
        };

        let canonical_bytes = match tokio::fs::read(canonical.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read canonical temp file");
                return TranscriptionOutcome::failure(format!("Failed to read temp file: {}", e));
            }
        };

        match self
            .recognizer
            .recognize(&canonical_bytes, &self.language)
            .await
        {
            Ok(text) => TranscriptionOutcome::success(text),
            Err(RecognizerError::NoSpeech) => {
                tracing::warn!("Speech recognition could not understand audio");
                TranscriptionOutcome::failure("Could not understand audio")
            }
            Err(RecognizerError::Unavailable(detail)) => {
                tracing::error!(detail = %detail, "Recognition service unavailable");
                TranscriptionOutcome::failure(format!("API unavailable: {}", detail))
            }
            Err(e) => {
                tracing::error!(error = %e, "Recognition failed");
                TranscriptionOutcome::failure(e.to_string())
            }
        }
    }

    fn write_canonical(
        &self,
        decoded: &wav::DecodedWav,
    ) -> std::io::Result<tempfile::NamedTempFile> {
        let file = tempfile::Builder::new()
            .prefix("canonical_")
            .suffix(".wav")
            .tempfile_in(&self.scratch_dir)?;

        wav::write_canonical_wav(file.path(), decoded)
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        Ok(file)
    }
}
