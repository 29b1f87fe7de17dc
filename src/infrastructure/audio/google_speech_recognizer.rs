use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::ports::{RecognizerError, SpeechRecognizer};
use crate::infrastructure::audio::wav::CANONICAL_SAMPLE_RATE;
use crate::infrastructure::remote;

/// Google Speech REST client (`speech:recognize`).
pub struct GoogleSpeechRecognizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    /// Base64-encoded WAV bytes.
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechRecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionResult {
    #[serde(default)]
    alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

impl GoogleSpeechRecognizer {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: remote::http_client(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://speech.googleapis.com".to_string()),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(
        &self,
        audio_wav: &[u8],
        language: &str,
    ) -> Result<String, RecognizerError> {
        let url = format!("{}/v1/speech:recognize", self.base_url);

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: CANONICAL_SAMPLE_RATE,
                language_code: language.to_string(),
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio_wav),
            },
        };

        tracing::debug!(bytes = audio_wav.len(), language, "Sending audio to Google Speech API");

        let response = remote::send_with_retry(
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body),
        )
        .await
        .map_err(|e| RecognizerError::Unavailable(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognizerError::Unavailable(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| RecognizerError::RequestFailed(format!("body: {}", e)))?;

        let transcript = parsed
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.is_empty() {
            return Err(RecognizerError::NoSpeech);
        }

        tracing::info!(chars = transcript.len(), "Google Speech transcription completed");

        Ok(transcript)
    }
}
