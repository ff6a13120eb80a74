//! Per-card scoring results.

use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;

/// Relative weight of keyword F1 in the composite score.
pub const F1_WEIGHT: f64 = 0.6;
/// Relative weight of string similarity in the composite score.
pub const SIMILARITY_WEIGHT: f64 = 0.4;

/// The scored outcome for one flashcard. Created once per card per
/// scoring pass and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResult {
    /// The card identifier.
    pub id: String,
    /// Echoed card prompt.
    pub front: String,
    /// Echoed reference answer.
    pub back: String,
    /// Echoed advisory duration.
    pub duration_secs: Option<f64>,
    /// Whether any audio was captured.
    pub has_audio: bool,
    /// The raw transcript text.
    pub transcript: String,
    /// Ratcliff/Obershelp similarity ratio, rounded to 3 decimals.
    pub similarity: f64,
    /// Keyword precision, rounded to 3 decimals.
    pub precision: f64,
    /// Keyword recall, rounded to 3 decimals.
    pub recall: f64,
    /// Keyword F1, rounded to 3 decimals.
    pub f1: f64,
    /// Reference keywords the answer missed (sorted, at most 6).
    pub missing_keywords: Vec<String>,
    /// Answer keywords not in the reference (sorted, at most 6).
    pub extra_terms: Vec<String>,
    /// Qualitative feedback category.
    pub feedback: Feedback,
    /// Composite score: `round(0.6*f1 + 0.4*similarity, 3)`.
    pub score: f64,
}

/// Round to 3 decimal places, half away from zero.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
