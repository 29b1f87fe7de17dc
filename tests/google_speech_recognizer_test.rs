use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use talkback::application::ports::{RecognizerError, SpeechRecognizer};
use talkback::infrastructure::audio::GoogleSpeechRecognizer;

async fn start_mock_speech_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/speech:recognize",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[tokio::test]
async fn given_recognized_speech_when_transcribing_then_transcript_is_returned() {
    let body = r#"{"results": [{"alternatives": [{"transcript": "hello world", "confidence": 0.92}]}]}"#;
    let (base_url, shutdown_tx) = start_mock_speech_server(200, body).await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"fake wav bytes", "en-US").await;

    assert_eq!(result.unwrap(), "hello world");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_multiple_results_when_transcribing_then_segments_are_joined() {
    let body = r#"{"results": [
        {"alternatives": [{"transcript": "turn on "}]},
        {"alternatives": [{"transcript": "the lights"}]}
    ]}"#;
    let (base_url, shutdown_tx) = start_mock_speech_server(200, body).await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"fake wav bytes", "en-US").await;

    assert_eq!(result.unwrap(), "turn on the lights");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_recognition_results_when_transcribing_then_no_speech_is_reported() {
    let (base_url, shutdown_tx) = start_mock_speech_server(200, "{}").await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"silent wav bytes", "en-US").await;

    assert!(matches!(result, Err(RecognizerError::NoSpeech)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_transcript_alternatives_when_transcribing_then_no_speech_is_reported() {
    let body = r#"{"results": [{"alternatives": [{"transcript": "  "}]}]}"#;
    let (base_url, shutdown_tx) = start_mock_speech_server(200, body).await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"silent wav bytes", "en-US").await;

    assert!(matches!(result, Err(RecognizerError::NoSpeech)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_engine_is_unavailable() {
    let body = r#"{"error": {"code": 403, "message": "API key invalid"}}"#;
    let (base_url, shutdown_tx) = start_mock_speech_server(403, body).await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"fake wav bytes", "en-US").await;

    match result {
        Err(RecognizerError::Unavailable(detail)) => {
            assert!(detail.contains("403"), "detail: {}", detail);
        }
        other => panic!("expected Unavailable, got {:?}", other.map_err(|e| e.to_string())),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_engine_when_transcribing_then_engine_is_unavailable_after_retries() {
    // bind then drop to get a port nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"fake wav bytes", "en-US").await;

    assert!(matches!(result, Err(RecognizerError::Unavailable(_))));
}

#[tokio::test]
async fn given_malformed_response_body_when_transcribing_then_request_failed_is_reported() {
    let (base_url, shutdown_tx) = start_mock_speech_server(200, "not json at all").await;

    let engine = GoogleSpeechRecognizer::new("test-key".to_string(), Some(base_url));
    let result = engine.recognize(b"fake wav bytes", "en-US").await;

    assert!(matches!(result, Err(RecognizerError::RequestFailed(_))));
    shutdown_tx.send(()).ok();
}
