//! Aggregate statistics for a scoring session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::results::{round3, CardResult};

/// Aggregate statistics across all cards of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Number of cards scored.
    pub card_count: usize,
    /// Number of cards with captured audio.
    pub cards_with_audio: usize,
    /// Mean composite score.
    pub mean_score: f64,
    /// Mean keyword F1.
    pub mean_f1: f64,
    /// Mean string similarity.
    pub mean_similarity: f64,
    /// Per-feedback-category counts, keyed by the fixed wire string.
    pub feedback_counts: HashMap<String, usize>,
}

/// Compute aggregate statistics from a session's results.
pub fn compute_session_stats(results: &[CardResult]) -> SessionStats {
    let n = results.len();
    let denom = n.max(1) as f64;

    let mut feedback_counts: HashMap<String, usize> = HashMap::new();
    for r in results {
        *feedback_counts
            .entry(r.feedback.as_str().to_string())
            .or_default() += 1;
    }

    SessionStats {
        card_count: n,
        cards_with_audio: results.iter().filter(|r| r.has_audio).count(),
        mean_score: round3(results.iter().map(|r| r.score).sum::<f64>() / denom),
        mean_f1: round3(results.iter().map(|r| r.f1).sum::<f64>() / denom),
        mean_similarity: round3(results.iter().map(|r| r.similarity).sum::<f64>() / denom),
        feedback_counts,
    }
}
