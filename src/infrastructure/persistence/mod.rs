mod pg_audio_record_repository;
mod pg_generation_repository;
mod pg_pool;

pub use pg_audio_record_repository::PgAudioRecordRepository;
pub use pg_generation_repository::PgGenerationRepository;
pub use pg_pool::create_pool;
