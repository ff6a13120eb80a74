//! Stub transcriber for running without a speech model.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use flashcoach_core::traits::{TranscribeRequest, TranscribeResponse, Transcriber};

/// A stub transcription backend that never touches a model.
///
/// Returns a deterministic placeholder mentioning the file name and
/// size, or a configured response when the file name matches.
pub struct StubTranscriber {
    /// Map of filename → transcript text.
    responses: HashMap<String, String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<TranscribeRequest>>,
}

impl StubTranscriber {
    /// Create a stub that always produces the placeholder text.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a stub with per-filename transcript overrides.
    pub fn with_responses(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this backend.
    pub fn last_request(&self) -> Option<TranscribeRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for StubTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for StubTranscriber {
    fn name(&self) -> &str {
        "stub"
    }

    async fn transcribe(&self, request: &TranscribeRequest) -> anyhow::Result<TranscribeResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let text = match self.responses.get(&request.filename) {
            Some(text) => text.clone(),
            None => {
                let size_kb = (request.audio.len() as f64 / 1024.0 * 10.0).round() / 10.0;
                format!("[stub transcript] {} ({size_kb:.1} KB)", request.filename)
            }
        };

        Ok(TranscribeResponse {
            text,
            latency_ms: 0,
        })
    }
}
