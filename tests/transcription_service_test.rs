use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use talkback::application::ports::{MediaStore, RecognizerError, SpeechRecognizer};
use talkback::application::services::TranscriptionService;
use talkback::domain::{MediaPath, TranscriptionOutcome};
use talkback::infrastructure::storage::LocalMediaStore;

enum RecognizerBehavior {
    Transcript(&'static str),
    NoSpeech,
    Unavailable(&'static str),
    RequestFailed(&'static str),
}

/// Captures the canonical bytes handed to the recognizer.
struct MockRecognizer {
    behavior: RecognizerBehavior,
    received: Mutex<Option<Vec<u8>>>,
}

impl MockRecognizer {
    fn new(behavior: RecognizerBehavior) -> Self {
        Self {
            behavior,
            received: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(&self, audio: &[u8], _language: &str) -> Result<String, RecognizerError> {
        *self.received.lock().unwrap() = Some(audio.to_vec());
        match &self.behavior {
            RecognizerBehavior::Transcript(text) => Ok(text.to_string()),
            RecognizerBehavior::NoSpeech => Err(RecognizerError::NoSpeech),
            RecognizerBehavior::Unavailable(detail) => {
                Err(RecognizerError::Unavailable(detail.to_string()))
            }
            RecognizerBehavior::RequestFailed(detail) => {
                Err(RecognizerError::RequestFailed(detail.to_string()))
            }
        }
    }
}

struct Fixture {
    service: TranscriptionService<MockRecognizer>,
    recognizer: Arc<MockRecognizer>,
    media_store: Arc<dyn MediaStore>,
    scratch_dir: PathBuf,
    _media_dir: tempfile::TempDir,
}

fn fixture(behavior: RecognizerBehavior) -> Fixture {
    let media_dir = tempfile::tempdir().expect("media dir");
    let media_store: Arc<dyn MediaStore> =
        Arc::new(LocalMediaStore::new(media_dir.path().to_path_buf()).expect("media store"));
    let scratch_dir = media_dir.path().join("tmp");
    let recognizer = Arc::new(MockRecognizer::new(behavior));

    let service = TranscriptionService::new(
        recognizer.clone(),
        media_store.clone(),
        scratch_dir.clone(),
        "en-US".to_string(),
    )
    .expect("transcription service");

    Fixture {
        service,
        recognizer,
        media_store,
        scratch_dir,
        _media_dir: media_dir,
    }
}

fn wav_bytes(sample_rate: u32, channels: u16, seconds: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        for i in 0..(sample_rate * seconds) {
            let sample = ((i % 100) as i16 - 50) * 100;
            for _ in 0..channels {
                writer.write_sample(sample).expect("sample");
            }
        }
        writer.finalize().expect("finalize");
    }
    cursor.into_inner()
}

async fn store_wav(fixture: &Fixture, name: &str, data: Vec<u8>) -> MediaPath {
    let path = MediaPath::audio_upload(name);
    fixture
        .media_store
        .store_bytes(&path, Bytes::from(data))
        .await
        .expect("store wav");
    path
}

fn assert_scratch_empty(scratch_dir: &Path) {
    let leftover: Vec<_> = std::fs::read_dir(scratch_dir)
        .expect("scratch dir")
        .collect();
    assert!(
        leftover.is_empty(),
        "canonical temp files left behind: {:?}",
        leftover
    );
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_failure_is_structured() {
    let fixture = fixture(RecognizerBehavior::Transcript("unused"));

    let outcome = fixture
        .service
        .transcribe(&MediaPath::audio_upload("does-not-exist.wav"))
        .await;

    assert_eq!(outcome, TranscriptionOutcome::failure("File not found"));
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_undecodable_bytes_when_transcribing_then_loading_failure_is_reported() {
    let fixture = fixture(RecognizerBehavior::Transcript("unused"));
    let path = store_wav(&fixture, "garbage.wav", b"this is not a wav file".to_vec()).await;

    let outcome = fixture.service.transcribe(&path).await;

    let error = outcome.error().expect("failure outcome");
    assert!(error.starts_with("Audio loading failed:"), "got: {}", error);
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_unintelligible_audio_when_transcribing_then_error_is_could_not_understand() {
    let fixture = fixture(RecognizerBehavior::NoSpeech);
    let path = store_wav(&fixture, "silence.wav", wav_bytes(16_000, 1, 1)).await;

    let outcome = fixture.service.transcribe(&path).await;

    assert_eq!(
        outcome,
        TranscriptionOutcome::failure("Could not understand audio")
    );
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_recognizer_outage_when_transcribing_then_error_is_api_unavailable() {
    let fixture = fixture(RecognizerBehavior::Unavailable("dns failure"));
    let path = store_wav(&fixture, "speech.wav", wav_bytes(16_000, 1, 1)).await;

    let outcome = fixture.service.transcribe(&path).await;

    assert_eq!(
        outcome,
        TranscriptionOutcome::failure("API unavailable: dns failure")
    );
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_unexpected_recognizer_error_when_transcribing_then_message_is_passed_through() {
    let fixture = fixture(RecognizerBehavior::RequestFailed("mangled response"));
    let path = store_wav(&fixture, "speech.wav", wav_bytes(16_000, 1, 1)).await;

    let outcome = fixture.service.transcribe(&path).await;

    assert_eq!(
        outcome,
        TranscriptionOutcome::failure("recognition request failed: mangled response")
    );
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_transcript_is_returned() {
    let fixture = fixture(RecognizerBehavior::Transcript("turn on the lights"));
    let path = store_wav(&fixture, "speech.wav", wav_bytes(16_000, 1, 1)).await;

    let outcome = fixture.service.transcribe(&path).await;

    assert_eq!(
        outcome,
        TranscriptionOutcome::success("turn on the lights")
    );
    assert_scratch_empty(&fixture.scratch_dir);
}

#[tokio::test]
async fn given_stereo_8khz_audio_when_transcribing_then_recognizer_gets_canonical_wav() {
    let fixture = fixture(RecognizerBehavior::Transcript("ok"));
    let path = store_wav(&fixture, "stereo.wav", wav_bytes(8_000, 2, 1)).await;

    fixture.service.transcribe(&path).await;

    let received = fixture
        .recognizer
        .received
        .lock()
        .unwrap()
        .clone()
        .expect("recognizer was called");

    let reader = hound::WavReader::new(std::io::Cursor::new(received)).expect("canonical wav");
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    // one second of 8 kHz audio resampled up to 16 kHz
    let frames = reader.len() / spec.channels as u32;
    assert!((15_500..=16_500).contains(&frames), "frames: {}", frames);

    assert_scratch_empty(&fixture.scratch_dir);
}
