use async_trait::async_trait;

/// Remote text-to-speech engine returning encoded audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesizerError {
    #[error("synthesis service unavailable: {0}")]
    Unavailable(String),
    #[error("synthesis request failed: {0}")]
    RequestFailed(String),
    #[error("synthesized audio invalid: {0}")]
    InvalidAudio(String),
}
