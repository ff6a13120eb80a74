//! Session report types with JSON persistence and progress comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::results::CardResult;
use crate::statistics::SessionStats;

/// A complete scoring session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session was scored.
    pub created_at: DateTime<Utc>,
    /// Summary of the deck.
    pub deck: DeckSummary,
    /// Individual card results, in deck order.
    pub results: Vec<CardResult>,
    /// Aggregate statistics.
    pub stats: SessionStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a deck (without the full card definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: String,
    pub name: String,
    pub card_count: usize,
}

impl SessionReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this session against an earlier one to track progress
    /// per card. Cards whose composite score moved by more than
    /// `threshold` in either direction are reported.
    pub fn compare(&self, baseline: &SessionReport, threshold: f64) -> ProgressReport {
        use std::collections::HashMap;

        let score_map = |report: &SessionReport| -> HashMap<String, f64> {
            report
                .results
                .iter()
                .map(|r| (r.id.clone(), r.score))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_cards = 0usize;

        for r in &self.results {
            if let Some(&baseline_score) = baseline_scores.get(&r.id) {
                let delta = r.score - baseline_score;
                if delta < -threshold {
                    regressions.push(CardDelta {
                        card_id: r.id.clone(),
                        baseline_score,
                        current_score: r.score,
                        delta,
                    });
                } else if delta > threshold {
                    improvements.push(CardDelta {
                        card_id: r.id.clone(),
                        baseline_score,
                        current_score: r.score,
                        delta,
                    });
                } else {
                    unchanged += 1;
                }
            } else {
                new_cards += 1;
            }
        }

        let removed_cards = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        ProgressReport {
            regressions,
            improvements,
            unchanged,
            new_cards,
            removed_cards,
        }
    }
}

/// Result of comparing two session reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Cards where the score went down.
    pub regressions: Vec<CardDelta>,
    /// Cards where the score went up.
    pub improvements: Vec<CardDelta>,
    /// Cards with no significant change.
    pub unchanged: usize,
    /// Cards in current but not baseline.
    pub new_cards: usize,
    /// Cards in baseline but not current.
    pub removed_cards: usize,
}

/// A per-card score movement between two sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDelta {
    pub card_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Card | Baseline | Current | Delta |\n");
            md.push_str("|------|----------|---------|-------|\n");
            for r in &self.regressions {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:.1}% |\n",
                    r.card_id,
                    r.baseline_score * 100.0,
                    r.current_score * 100.0,
                    r.delta * 100.0
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Card | Baseline | Current | Delta |\n");
            md.push_str("|------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | +{:.1}% |\n",
                    i.card_id,
                    i.baseline_score * 100.0,
                    i.current_score * 100.0,
                    i.delta * 100.0
                ));
            }
        }

        md
    }

    /// Returns true if any card scored worse than in the baseline.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
