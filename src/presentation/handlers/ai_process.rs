use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, TextGenerator};
use crate::domain::RecordId;
use crate::presentation::handlers::models::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct AiProcessResponse {
    pub response_id: String,
    pub request_text: String,
    pub response_text: String,
    pub audio_link: Option<String>,
    pub is_successful: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct UnreadyResponse {
    pub error: String,
    pub error_message: String,
    pub response_id: String,
    pub created_at: String,
}

/// GET /api/audio/ai-process/{id}/ — generate and synthesize a spoken reply
/// for a stored transcription.
///
/// Malformed ids and unready transcriptions are client errors; record-store
/// and generation failures are server errors. No step is retried here.
#[tracing::instrument(skip(state))]
pub async fn ai_process_handler<R, G, S>(
    State(state): State<AppState<R, G, S>>,
    Path(record_id): Path<String>,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let uuid = match Uuid::parse_str(&record_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid UUID format".to_string(),
                }),
            )
                .into_response();
        }
    };

    let record = match state.audio_records.get_by_id(RecordId::from_uuid(uuid)).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Failed to fetch transcription data".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reach record store");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error fetching transcription: {}", e),
                }),
            )
                .into_response();
        }
    };

    let transcript = match record.transcription.clone() {
        Some(text) if record.is_successful => text,
        _ => {
            tracing::warn!(record_id = %record.id.as_uuid(), "Transcription not ready for processing");
            return (
                StatusCode::BAD_REQUEST,
                Json(UnreadyResponse {
                    error: "Transcription failed or unavailable".to_string(),
                    error_message: record
                        .error_message
                        .unwrap_or_else(|| "No transcription provided".to_string()),
                    response_id: record.id.as_uuid().to_string(),
                    created_at: record.created_at.to_rfc3339(),
                }),
            )
                .into_response();
        }
    };

    match state.reply_service.respond(&transcript).await {
        Ok(reply) => {
            let audio_link = reply
                .audio_path
                .as_ref()
                .map(|p| state.settings.media.public_url(p));
            (
                StatusCode::OK,
                Json(AiProcessResponse {
                    response_id: record.id.as_uuid().to_string(),
                    request_text: transcript,
                    response_text: reply.response_text,
                    is_successful: audio_link.is_some(),
                    audio_link,
                    created_at: record.created_at.to_rfc3339(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Spoken reply pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Processing error: {}", e),
                }),
            )
                .into_response()
        }
    }
}
