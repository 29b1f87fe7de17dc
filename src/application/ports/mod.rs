mod audio_record_repository;
mod generation_repository;
mod media_store;
mod repository_error;
mod speech_recognizer;
mod speech_synthesizer;
mod text_generator;

pub use audio_record_repository::AudioRecordRepository;
pub use generation_repository::GenerationRepository;
pub use media_store::{MediaStore, MediaStoreError};
pub use repository_error::RepositoryError;
pub use speech_recognizer::{RecognizerError, SpeechRecognizer};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesizerError};
pub use text_generator::{TextGenerator, TextGeneratorError};
