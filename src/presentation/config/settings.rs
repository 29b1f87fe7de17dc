use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::MediaPath;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub media: MediaSettings,
    pub recognition: RecognitionSettings,
    pub generation: GenerationSettings,
    pub synthesis: SynthesisSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Media root on disk; uploads and generated audio live beneath it.
    pub root: PathBuf,
    /// Origin used to build fully-qualified media links.
    pub public_base_url: String,
}

impl MediaSettings {
    /// Fully-qualified URL for a stored media file.
    pub fn public_url(&self, path: &MediaPath) -> String {
        format!(
            "{}/media/{}",
            self.public_base_url.trim_end_matches('/'),
            path.as_str()
        )
    }

    /// Scratch directory for per-call canonical WAV files.
    pub fn scratch_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionSettings {
    pub base_url: String,
    pub api_key: String,
    /// Spoken-language locale requested from the recognizer, e.g. `en-US`.
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisSettings {
    pub base_url: String,
    pub api_key: String,
    /// Language code for synthesized speech, e.g. `en`.
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}
