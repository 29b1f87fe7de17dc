use async_trait::async_trait;

/// Remote generative-text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TextGeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextGeneratorError {
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
    #[error("generation request failed: {0}")]
    RequestFailed(String),
    #[error("model returned no completion")]
    EmptyCompletion,
}
