use async_trait::async_trait;

/// Remote speech-to-text engine.
///
/// Input is canonical WAV bytes (16 kHz, mono, 16-bit PCM) and a spoken
/// language locale such as `en-US`.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio_wav: &[u8], language: &str)
        -> Result<String, RecognizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizerError {
    /// The engine processed the audio but found no recognizable speech.
    #[error("no recognizable speech")]
    NoSpeech,
    /// The engine could not be reached, or answered with a non-success
    /// status, including after bounded retries.
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
    #[error("recognition request failed: {0}")]
    RequestFailed(String),
}
