mod ai_process;
mod health;
mod models;
mod records;
mod upload;

pub use ai_process::ai_process_handler;
pub use health::health_handler;
pub use models::{AudioRecordResponse, ErrorResponse};
pub use records::{get_record_handler, list_records_handler};
pub use upload::upload_audio_handler;
