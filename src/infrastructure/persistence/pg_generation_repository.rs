use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{GenerationRepository, RepositoryError};
use crate::domain::{GenerationId, GenerationRequest, MediaPath};

pub struct PgGenerationRepository {
    pool: PgPool,
}

impl PgGenerationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationRepository for PgGenerationRepository {
    #[instrument(skip(self, request), fields(generation_id = %request.id.as_uuid()))]
    async fn create(&self, request: &GenerationRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO generation_requests
                (id, input_text, processed, audio_path, original_request, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(&request.input_text)
        .bind(request.processed)
        .bind(request.audio_path.as_ref().map(|p| p.as_str().to_string()))
        .bind(&request.original_request)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, audio_path), fields(generation_id = %id.as_uuid()))]
    async fn mark_processed(
        &self,
        id: GenerationId,
        audio_path: &MediaPath,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE generation_requests
            SET processed = TRUE,
                audio_path = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(audio_path.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
