mod gemini_generator;

pub use gemini_generator::GeminiGenerator;
