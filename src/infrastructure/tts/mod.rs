mod google_tts_synthesizer;

pub use google_tts_synthesizer::GoogleTtsSynthesizer;
