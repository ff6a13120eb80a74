//! Whisper HTTP transcription backend.
//!
//! Talks to a whisper.cpp `server` instance over its `/inference`
//! endpoint, posting the audio as multipart form data.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use flashcoach_core::traits::{TranscribeRequest, TranscribeResponse, Transcriber};

use crate::error::TranscribeError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 120; // Whisper on CPU is slow

/// Whisper server transcription backend.
pub struct WhisperTranscriber {
    base_url: String,
    language: Option<String>,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    pub fn new(base_url: &str, language: Option<String>) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            language,
            client,
        }
    }
}

#[derive(Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper"
    }

    #[instrument(skip(self, request), fields(filename = %request.filename))]
    async fn transcribe(&self, request: &TranscribeRequest) -> anyhow::Result<TranscribeResponse> {
        let start = Instant::now();

        let part = reqwest::multipart::Part::bytes(request.audio.clone())
            .file_name(request.filename.clone());
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("response_format", "json");
        let language = request.language.clone().or_else(|| self.language.clone());
        if let Some(language) = language {
            form = form.text("language", language);
        }

        let response = self
            .client
            .post(format!("{}/inference", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscribeError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else if e.is_connect() {
                    TranscribeError::NetworkError(format!(
                        "whisper server not reachable at {}. Is it running?",
                        self.base_url
                    ))
                } else {
                    TranscribeError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: InferenceResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::InvalidResponse(format!("not inference JSON: {e}")))?;

        Ok(TranscribeResponse {
            text: api_response.text.trim().to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
