mod google_speech_recognizer;
pub mod wav;

pub use google_speech_recognizer::GoogleSpeechRecognizer;
