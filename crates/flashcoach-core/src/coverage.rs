//! Keyword coverage scoring over token sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How many missing/extra keywords a result carries at most.
pub const KEYWORD_LIST_LIMIT: usize = 6;

/// Set-based precision/recall/F1 between a reference token set and a
/// transcript token set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    /// Fraction of transcript tokens that appear in the reference.
    pub precision: f64,
    /// Fraction of reference tokens that appear in the transcript.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Reference tokens absent from the transcript, lexically sorted,
    /// truncated to [`KEYWORD_LIST_LIMIT`].
    pub missing: Vec<String>,
    /// Transcript tokens absent from the reference, lexically sorted,
    /// truncated to [`KEYWORD_LIST_LIMIT`].
    pub extra: Vec<String>,
}

/// Score transcript tokens against reference tokens.
///
/// An empty transcript set yields precision 0.0; an empty reference
/// set yields recall 0.0 through the `max(1, ·)` denominator guard.
/// The latter is observable legacy behavior, kept as-is even though an
/// empty reference arguably should not penalize recall.
pub fn coverage(reference: &BTreeSet<String>, transcript: &BTreeSet<String>) -> Coverage {
    let intersection = reference.intersection(transcript).count();

    let precision = if transcript.is_empty() {
        0.0
    } else {
        intersection as f64 / transcript.len().max(1) as f64
    };
    let recall = if reference.is_empty() {
        0.0
    } else {
        intersection as f64 / reference.len().max(1) as f64
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    // BTreeSet differences iterate in lexical order already
    let missing = reference
        .difference(transcript)
        .take(KEYWORD_LIST_LIMIT)
        .cloned()
        .collect();
    let extra = transcript
        .difference(reference)
        .take(KEYWORD_LIST_LIMIT)
        .cloned()
        .collect();

    Coverage {
        precision,
        recall,
        f1,
        missing,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn identical_sets_score_one() {
        let g = set(&["cell", "mitochondria", "powerhouse"]);
        let cov = coverage(&g, &g.clone());
        assert_eq!(cov.precision, 1.0);
        assert_eq!(cov.recall, 1.0);
        assert_eq!(cov.f1, 1.0);
        assert!(cov.missing.is_empty());
        assert!(cov.extra.is_empty());
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let g = set(&["alpha", "beta"]);
        let t = set(&["gamma", "delta"]);
        let cov = coverage(&g, &t);
        assert_eq!(cov.precision, 0.0);
        assert_eq!(cov.recall, 0.0);
        assert_eq!(cov.f1, 0.0);
        assert_eq!(cov.missing, vec!["alpha", "beta"]);
        assert_eq!(cov.extra, vec!["delta", "gamma"]);
    }

    #[test]
    fn partial_overlap() {
        let g = set(&["one", "two", "three"]);
        let t = set(&["two", "three", "four"]);
        let cov = coverage(&g, &t);
        assert!((cov.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!((cov.recall - 2.0 / 3.0).abs() < 1e-9);
        assert!((cov.f1 - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(cov.missing, vec!["one"]);
        assert_eq!(cov.extra, vec!["four"]);
    }

    #[test]
    fn empty_transcript_set() {
        let g = set(&["paris"]);
        let cov = coverage(&g, &BTreeSet::new());
        assert_eq!(cov.precision, 0.0);
        assert_eq!(cov.recall, 0.0);
        assert_eq!(cov.f1, 0.0);
        assert_eq!(cov.missing, vec!["paris"]);
    }

    #[test]
    fn empty_reference_forces_zero_recall() {
        let t = set(&["anything"]);
        let cov = coverage(&BTreeSet::new(), &t);
        assert_eq!(cov.recall, 0.0);
        assert_eq!(cov.precision, 0.0);
        assert_eq!(cov.extra, vec!["anything"]);
    }

    #[test]
    fn missing_and_extra_truncate_to_six() {
        let g = set(&["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8"]);
        let t = set(&["b1", "b2", "b3", "b4", "b5", "b6", "b7"]);
        let cov = coverage(&g, &t);
        assert_eq!(cov.missing.len(), 6);
        assert_eq!(cov.extra.len(), 6);
        assert_eq!(cov.missing[0], "a1");
        assert_eq!(cov.extra[0], "b1");
    }

    #[test]
    fn cjk_two_of_three() {
        let g = set(&["首", "都", "京"]);
        let t = set(&["首", "都"]);
        let cov = coverage(&g, &t);
        assert_eq!(cov.precision, 1.0);
        assert!((cov.recall - 2.0 / 3.0).abs() < 1e-9);
        assert!((cov.f1 - 0.8).abs() < 1e-9);
    }
}
