use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, TextGenerator};
use crate::domain::RecordId;
use crate::presentation::handlers::models::{AudioRecordResponse, ErrorResponse};
use crate::presentation::state::AppState;

const LIST_LIMIT: i64 = 100;

#[derive(Serialize)]
pub struct RecordListResponse {
    pub records: Vec<AudioRecordResponse>,
}

/// GET /api/audio/{id}/ — one persisted transcription record.
#[tracing::instrument(skip(state))]
pub async fn get_record_handler<R, G, S>(
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
                    error: format!("Invalid record ID: {}", record_id),
                }),
            )
                .into_response();
        }
    };

    match state.audio_records.get_by_id(RecordId::from_uuid(uuid)).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(AudioRecordResponse::from_record(&record, &state.settings.media)),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Record not found: {}", record_id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch record");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch record: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/audio/ — most recent records first.
#[tracing::instrument(skip(state))]
pub async fn list_records_handler<R, G, S>(
    State(state): State<AppState<R, G, S>>,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    match state.audio_records.list(LIST_LIMIT).await {
        Ok(records) => {
            let records = records
                .iter()
                .map(|r| AudioRecordResponse::from_record(r, &state.settings.media))
                .collect();
            (StatusCode::OK, Json(RecordListResponse { records })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list records");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list records: {}", e),
                }),
            )
                .into_response()
        }
    }
}
