use std::net::SocketAddr;
use std::sync::Arc;

use config::{Config, Environment as EnvironmentSource, File};
use tokio::net::TcpListener;

use talkback::application::ports::{AudioRecordRepository, GenerationRepository, MediaStore};
use talkback::application::services::{IngestService, ReplyService, TranscriptionService};
use talkback::infrastructure::audio::GoogleSpeechRecognizer;
use talkback::infrastructure::llm::GeminiGenerator;
use talkback::infrastructure::observability::{TracingConfig, init_tracing};
use talkback::infrastructure::persistence::{
    PgAudioRecordRepository, PgGenerationRepository, create_pool,
};
use talkback::infrastructure::storage::LocalMediaStore;
use talkback::infrastructure::tts::GoogleTtsSynthesizer;
use talkback::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let configuration = Config::builder()
        .add_source(File::with_name(&format!("appsettings.{}", environment.as_str())).required(false))
        .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
        .build()?;
    let settings: Settings = configuration.try_deserialize()?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;

    tracing::info!("Running database migrations");
    sqlx::migrate!().run(&pool).await?;

    let media_store: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(settings.media.root.clone())?);
    let audio_records: Arc<dyn AudioRecordRepository> =
        Arc::new(PgAudioRecordRepository::new(pool.clone()));
    let generations: Arc<dyn GenerationRepository> = Arc::new(PgGenerationRepository::new(pool));

    let recognizer = Arc::new(GoogleSpeechRecognizer::new(
        settings.recognition.api_key.clone(),
        Some(settings.recognition.base_url.clone()),
    ));
    let generator = Arc::new(GeminiGenerator::new(
        settings.generation.api_key.clone(),
        settings.generation.model.clone(),
        Some(settings.generation.base_url.clone()),
    ));
    let synthesizer = Arc::new(GoogleTtsSynthesizer::new(
        settings.synthesis.api_key.clone(),
        Some(settings.synthesis.base_url.clone()),
    ));

    let transcription_service = Arc::new(TranscriptionService::new(
        recognizer,
        media_store.clone(),
        settings.media.scratch_dir(),
        settings.recognition.language.clone(),
    )?);

    let ingest_service = Arc::new(IngestService::new(
        media_store.clone(),
        audio_records.clone(),
        transcription_service,
    ));

    let reply_service = Arc::new(ReplyService::new(
        generator,
        synthesizer,
        generations,
        media_store,
        settings.synthesis.language.clone(),
    ));

    let state = AppState {
        ingest_service,
        reply_service,
        audio_records,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
