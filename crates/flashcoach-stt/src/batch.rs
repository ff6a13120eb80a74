//! Concurrent batch transcription.
//!
//! Runs many audio recordings through one backend with bounded
//! parallelism and retries on transient errors. Transcription
//! failures never abort the batch: the affected card degrades to an
//! empty transcript (audio present), which the scoring core then
//! reports as the empty-transcript feedback category.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use flashcoach_core::model::TranscriptEntry;
use flashcoach_core::traits::{TranscribeRequest, Transcriber};

use crate::error::TranscribeError;

/// Configuration for a batch transcription run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum concurrent transcriptions.
    pub parallelism: usize,
    /// Retries on transient backend errors.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub retry_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Transcribe a batch of recordings, keyed by card id.
///
/// Returns one `TranscriptEntry` per input recording. Every entry has
/// `has_audio = true`: audio bytes existed, even if transcription
/// ultimately failed and the text degraded to empty.
pub async fn transcribe_batch(
    transcriber: Arc<dyn Transcriber>,
    recordings: Vec<(String, TranscribeRequest)>,
    config: &BatchConfig,
) -> HashMap<String, TranscriptEntry> {
    let semaphore = Arc::new(Semaphore::new(config.parallelism.max(1)));
    let mut futures = FuturesUnordered::new();

    for (card_id, request) in recordings {
        let transcriber = Arc::clone(&transcriber);
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();

        futures.push(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (card_id, String::new());
            };

            let mut retry_delay = config.retry_delay;
            let mut last_error = None;
            for retry in 0..=config.max_retries {
                if retry > 0 {
                    tokio::time::sleep(retry_delay).await;
                    retry_delay = (retry_delay * 2).min(Duration::from_secs(30));
                }
                match transcriber.transcribe(&request).await {
                    Ok(response) => return (card_id, response.text),
                    Err(e) => {
                        let permanent = e
                            .downcast_ref::<TranscribeError>()
                            .is_some_and(TranscribeError::is_permanent);
                        if permanent {
                            last_error = Some(e);
                            break;
                        }
                        last_error = Some(e);
                    }
                }
            }

            if let Some(e) = last_error {
                tracing::error!("transcription failed for {card_id}: {e:#}");
            }
            (card_id, String::new())
        });
    }

    let mut entries = HashMap::new();
    while let Some((card_id, text)) = futures.next().await {
        entries.insert(
            card_id.clone(),
            TranscriptEntry {
                id: card_id,
                text,
                has_audio: true,
            },
        );
    }

    entries
}
