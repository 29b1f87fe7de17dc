mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, GenerationSettings, LoggingSettings, MediaSettings, RecognitionSettings,
    ServerSettings, Settings, SynthesisSettings,
};
