use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use talkback::application::ports::{
    GenerationRepository, MediaStore, RepositoryError, SpeechSynthesizer, SynthesizerError,
    TextGenerator, TextGeneratorError,
};
use talkback::application::services::{ReplyError, ReplyService, SPEAKABLE_SUFFIX};
use talkback::domain::{GenerationId, GenerationRequest, MediaPath};
use talkback::infrastructure::storage::LocalMediaStore;

/// Captures prompts so the prompt template can be asserted.
struct CapturingGenerator {
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl CapturingGenerator {
    fn new(fail: bool) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for CapturingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGeneratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            Err(TextGeneratorError::Unavailable("model down".to_string()))
        } else {
            Ok("Here is a short answer.".to_string())
        }
    }
}

struct StubSynthesizer {
    fail: bool,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SynthesizerError> {
        if self.fail {
            Err(SynthesizerError::Unavailable("tts down".to_string()))
        } else {
            Ok(vec![1u8; 64])
        }
    }
}

#[derive(Default)]
struct InMemoryGenerations {
    requests: Mutex<Vec<GenerationRequest>>,
}

#[async_trait::async_trait]
impl GenerationRepository for InMemoryGenerations {
    async fn create(&self, request: &GenerationRequest) -> Result<(), RepositoryError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn mark_processed(
        &self,
        id: GenerationId,
        audio_path: &MediaPath,
    ) -> Result<(), RepositoryError> {
        let mut requests = self.requests.lock().unwrap();
        if let Some(request) = requests.iter_mut().find(|r| r.id == id) {
            request.processed = true;
            request.audio_path = Some(audio_path.clone());
        }
        Ok(())
    }
}

struct Fixture {
    service: ReplyService<CapturingGenerator, StubSynthesizer>,
    generator: Arc<CapturingGenerator>,
    generations: Arc<InMemoryGenerations>,
    media_root: std::path::PathBuf,
    _media_dir: tempfile::TempDir,
}

fn fixture(generator_fails: bool, synthesizer_fails: bool) -> Fixture {
    let media_dir = tempfile::tempdir().expect("media dir");
    let media_root = media_dir.path().to_path_buf();
    let media_store: Arc<dyn MediaStore> =
        Arc::new(LocalMediaStore::new(media_root.clone()).expect("media store"));
    let generator = Arc::new(CapturingGenerator::new(generator_fails));
    let generations = Arc::new(InMemoryGenerations::default());
    let generations_port: Arc<dyn GenerationRepository> = generations.clone();

    let service = ReplyService::new(
        generator.clone(),
        Arc::new(StubSynthesizer {
            fail: synthesizer_fails,
        }),
        generations_port,
        media_store,
        "en".to_string(),
    );

    Fixture {
        service,
        generator,
        generations,
        media_root,
        _media_dir: media_dir,
    }
}

#[tokio::test]
async fn given_a_transcript_when_responding_then_prompt_carries_the_speakable_suffix() {
    let fixture = fixture(false, false);

    fixture
        .service
        .respond("what time is it")
        .await
        .expect("reply");

    let prompts = fixture.generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("what time is it"));
    assert!(prompts[0].ends_with(SPEAKABLE_SUFFIX));
}

#[tokio::test]
async fn given_a_transcript_when_responding_then_generation_request_is_persisted_and_processed() {
    let fixture = fixture(false, false);

    let reply = fixture
        .service
        .respond("how far is the moon")
        .await
        .expect("reply");

    let requests = fixture.generations.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].input_text, "how far is the moon");
    assert!(requests[0].processed);
    assert_eq!(requests[0].audio_path, reply.audio_path);
    assert_eq!(
        requests[0].original_request,
        Some(serde_json::json!({ "transcription": "how far is the moon" }))
    );
}

#[tokio::test]
async fn given_synthesis_outage_when_responding_then_audio_path_is_null_and_nothing_is_raised() {
    let fixture = fixture(false, true);

    let reply = fixture
        .service
        .respond("sing me a song")
        .await
        .expect("reply");

    assert_eq!(reply.response_text, "Here is a short answer.");
    assert!(reply.audio_path.is_none());

    let requests = fixture.generations.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].processed);
}

#[tokio::test]
async fn given_generator_outage_when_responding_then_generation_error_is_returned() {
    let fixture = fixture(true, false);

    let result = fixture.service.respond("anything").await;

    assert!(matches!(result, Err(ReplyError::Generation(_))));
}

#[tokio::test]
async fn given_repeated_replies_when_synthesizing_then_audio_filenames_never_collide() {
    let fixture = fixture(false, false);
    let mut paths = HashSet::new();

    for _ in 0..1_000 {
        let reply = fixture
            .service
            .respond("same input text")
            .await
            .expect("reply");
        let path = reply.audio_path.expect("audio path");
        assert!(path.as_str().starts_with("generated_audio/"));
        assert!(path.as_str().ends_with(".wav"));
        paths.insert(path.as_str().to_string());
    }

    assert_eq!(paths.len(), 1_000);

    let files = std::fs::read_dir(fixture.media_root.join("generated_audio"))
        .expect("generated dir")
        .count();
    assert_eq!(files, 1_000);
}
