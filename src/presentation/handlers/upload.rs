use std::io;

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, TextGenerator};
use crate::presentation::handlers::models::{AudioRecordResponse, ErrorResponse};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RawUploadResponse {
    pub id: String,
    pub filename: String,
    pub audio_url: String,
    pub bytes_received: u64,
    pub duration_estimate_secs: f64,
    pub transcription: Option<String>,
    pub error_message: Option<String>,
}

/// POST /api/audio/ — dispatches on the declared content type.
///
/// `multipart/form-data` carries a WAV file field; `audio/wav` is the raw
/// streamed body from embedded devices. Anything else is rejected.
#[tracing::instrument(skip(state, request))]
pub async fn upload_audio_handler<R, G, S>(
    State(state): State<AppState<R, G, S>>,
    request: Request,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "multipart/form-data" => handle_multipart(state, request).await,
        "audio/wav" => handle_raw_stream(state, request).await,
        other => {
            tracing::warn!(content_type = %other, "Rejected upload with unsupported content type");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unsupported content type: {}", content_type),
                }),
            )
                .into_response()
        }
    }
}

async fn handle_multipart<R, G, S>(
    state: AppState<R, G, S>,
    request: Request,
) -> axum::response::Response
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) => {
                if f.file_name().is_some() || f.name() == Some("audio_file") {
                    break f;
                }
            }
            Ok(None) => {
                tracing::warn!("Upload request with no audio file field");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No audio file uploaded".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart field");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    };

    let filename = field.file_name().unwrap_or("upload.wav").to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read uploaded file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Processing file upload");

    match state.ingest_service.ingest_bytes(filename, data).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(AudioRecordResponse::from_record(&record, &state.settings.media)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Upload ingestion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Upload failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

async fn handle_raw_stream<R, G, S>(
    state: AppState<R, G, S>,
    request: Request,
) -> axum::response::Response
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let content_length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let stream = request
        .into_body()
        .into_data_stream()
        .map_err(io::Error::other)
        .boxed();

    match state
        .ingest_service
        .ingest_stream(stream, content_length)
        .await
    {
        Ok(upload) => {
            let record = &upload.record;
            (
                StatusCode::CREATED,
                Json(RawUploadResponse {
                    id: record.id.as_uuid().to_string(),
                    filename: record.original_filename.clone(),
                    audio_url: state.settings.media.public_url(&record.storage_path),
                    bytes_received: upload.bytes_received,
                    duration_estimate_secs: upload.duration_estimate_secs,
                    transcription: record.transcription.clone(),
                    error_message: record.error_message.clone(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Raw upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Upload failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
