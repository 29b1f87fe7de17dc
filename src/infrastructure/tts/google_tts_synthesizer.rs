use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechSynthesizer, SynthesizerError};
use crate::infrastructure::remote;

/// Google Cloud Text-to-Speech REST client (`text:synthesize`).
///
/// Requests LINEAR16 output, which the REST surface returns as complete WAV
/// bytes ready to be written to a file.
pub struct GoogleTtsSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelectionParams,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams {
    language_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

impl GoogleTtsSynthesizer {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: remote::http_client(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://texttospeech.googleapis.com".to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesizerError> {
        let url = format!("{}/v1/text:synthesize", self.base_url);

        let body = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelectionParams {
                language_code: language.to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
            },
        };

        tracing::debug!(chars = text.len(), language, "Requesting speech synthesis");

        let response = remote::send_with_retry(
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body),
        )
        .await
        .map_err(|e| SynthesizerError::Unavailable(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesizerError::RequestFailed(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesizerError::RequestFailed(format!("body: {}", e)))?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(parsed.audio_content.as_bytes())
            .map_err(|e| SynthesizerError::InvalidAudio(format!("base64: {}", e)))?;

        if audio.is_empty() {
            return Err(SynthesizerError::InvalidAudio("empty audio content".to_string()));
        }

        tracing::info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
