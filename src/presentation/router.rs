use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer, TextGenerator};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ai_process_handler, get_record_handler, health_handler, list_records_handler,
    upload_audio_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<R, G, S>(state: AppState<R, G, S>) -> Router
where
    R: SpeechRecognizer + 'static,
    G: TextGenerator + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let media_root = state.settings.media.root.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/audio/",
            post(upload_audio_handler::<R, G, S>).get(list_records_handler::<R, G, S>),
        )
        .route("/api/audio/{id}/", get(get_record_handler::<R, G, S>))
        .route(
            "/api/audio/ai-process/{id}/",
            get(ai_process_handler::<R, G, S>),
        )
        .nest_service("/media", ServeDir::new(media_root))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
