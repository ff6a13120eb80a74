//! Qualitative feedback classification.
//!
//! Maps quality metrics to one of five fixed categories. Rules are
//! evaluated in a fixed priority order and the first match wins; the
//! thresholds are policy constants, not derived values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// F1 at or above this is high coverage.
pub const F1_HIGH: f64 = 0.75;
/// Similarity at or above this is high coverage.
pub const SIMILARITY_HIGH: f64 = 0.8;
/// F1 at or above this is partial coverage.
pub const F1_PARTIAL: f64 = 0.45;
/// Similarity at or above this is partial coverage.
pub const SIMILARITY_PARTIAL: f64 = 0.6;

/// The feedback category attached to a scored card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// No audio was captured for this card.
    #[serde(rename = "no audio captured, re-record")]
    NoAudio,
    /// Audio was captured but transcription produced nothing.
    #[serde(rename = "audio present but empty transcript")]
    EmptyTranscript,
    /// The answer covers the key ideas.
    #[serde(rename = "high coverage")]
    High,
    /// Some keywords are present, others are listed as missing.
    #[serde(rename = "partial coverage, missing keywords shown")]
    Partial,
    /// The answer misses the core meaning.
    #[serde(rename = "low coverage, restate core meaning")]
    Low,
}

impl Feedback {
    /// The fixed wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::NoAudio => "no audio captured, re-record",
            Feedback::EmptyTranscript => "audio present but empty transcript",
            Feedback::High => "high coverage",
            Feedback::Partial => "partial coverage, missing keywords shown",
            Feedback::Low => "low coverage, restate core meaning",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one card's metrics into a feedback category.
///
/// `transcript_empty` refers to the normalized transcript: audio that
/// transcribed to pure punctuation counts as empty.
pub fn classify(has_audio: bool, transcript_empty: bool, f1: f64, similarity: f64) -> Feedback {
    if !has_audio {
        Feedback::NoAudio
    } else if transcript_empty {
        Feedback::EmptyTranscript
    } else if f1 >= F1_HIGH || similarity >= SIMILARITY_HIGH {
        Feedback::High
    } else if f1 >= F1_PARTIAL || similarity >= SIMILARITY_PARTIAL {
        Feedback::Partial
    } else {
        Feedback::Low
    }
}
