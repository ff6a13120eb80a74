//! Transcription backend error types.
//!
//! These errors represent failures when talking to a speech-to-text
//! backend. The batch runner classifies them to decide whether a
//! retry makes sense.

use thiserror::Error;

/// Errors that can occur when transcribing audio.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// The server returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The server responded with something other than a transcript.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TranscribeError {
    /// Returns `true` if this error is permanent and should not be
    /// retried.
    pub fn is_permanent(&self) -> bool {
        match self {
            // 4xx means the request itself is bad (unsupported codec,
            // oversized upload); retrying the same bytes cannot help.
            TranscribeError::ApiError { status, .. } => (400..500).contains(status),
            TranscribeError::InvalidResponse(_) => true,
            TranscribeError::Timeout(_) | TranscribeError::NetworkError(_) => false,
        }
    }
}
