use std::fmt;

/// Path of a stored file, relative to the media root.
///
/// Relative paths keep records portable across media roots and compose
/// directly into public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath(String);

pub const AUDIO_UPLOADS_DIR: &str = "audio_files";
pub const GENERATED_AUDIO_DIR: &str = "generated_audio";

impl MediaPath {
    /// Path for an uploaded audio file.
    pub fn audio_upload(filename: &str) -> Self {
        Self(format!("{}/{}", AUDIO_UPLOADS_DIR, filename))
    }

    /// Path for a synthesized audio file.
    pub fn generated_audio(filename: &str) -> Self {
        Self(format!("{}/{}", GENERATED_AUDIO_DIR, filename))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
