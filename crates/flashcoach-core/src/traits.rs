//! Core trait definition for speech-to-text backends.
//!
//! Implemented by the `flashcoach-stt` crate for both the Whisper HTTP
//! backend and the offline stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for backends that turn recorded audio into transcript text.
///
/// A backend is selected once at startup and reused for every card;
/// callers never branch on the backend per request.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Human-readable backend name (e.g. "whisper").
    fn name(&self) -> &str;

    /// Transcribe one audio recording.
    async fn transcribe(&self, request: &TranscribeRequest) -> anyhow::Result<TranscribeResponse>;
}

/// Request to transcribe a single recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeRequest {
    /// The raw audio bytes (webm/wav/ogg as recorded).
    pub audio: Vec<u8>,
    /// Original file name, used for logging and by the stub backend.
    pub filename: String,
    /// Optional language hint passed through to the model.
    #[serde(default)]
    pub language: Option<String>,
}

/// Response from a transcription request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeResponse {
    /// The transcript text, trimmed. May be empty.
    pub text: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}
