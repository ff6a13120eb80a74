//! flashcoach-stt — Speech-to-text backends.
//!
//! Implements the core `Transcriber` trait for a Whisper HTTP server
//! and an offline stub, plus backend configuration and a concurrent
//! batch runner.

pub mod batch;
pub mod config;
pub mod error;
pub mod stub;
pub mod whisper;

pub use config::{create_transcriber, load_config, BackendConfig, FlashcoachConfig};
pub use error::TranscribeError;
