use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GenerationId, GenerationRequest, MediaPath};

/// Record store for generation requests.
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    async fn create(&self, request: &GenerationRequest) -> Result<(), RepositoryError>;

    /// Mark a request processed once its audio has been written.
    async fn mark_processed(
        &self,
        id: GenerationId,
        audio_path: &MediaPath,
    ) -> Result<(), RepositoryError>;
}
