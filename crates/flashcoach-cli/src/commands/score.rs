//! The `flashcoach score` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use flashcoach_core::engine::score_deck;
use flashcoach_core::model::{Deck, TranscriptEntry};
use flashcoach_core::parser;
use flashcoach_core::report::{DeckSummary, SessionReport};
use flashcoach_core::statistics::compute_session_stats;
use flashcoach_core::traits::TranscribeRequest;
use flashcoach_report::write_html_report;
use flashcoach_stt::batch::{transcribe_batch, BatchConfig};
use flashcoach_stt::config::load_config_from;
use flashcoach_stt::create_transcriber;

/// Audio extensions looked up under --audio-dir, in preference order.
const AUDIO_EXTENSIONS: &[&str] = &["webm", "wav", "ogg", "mp3", "m4a"];

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    deck_path: PathBuf,
    transcripts_path: Option<PathBuf>,
    audio_dir: Option<PathBuf>,
    parallelism: usize,
    output: PathBuf,
    format: String,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    // Validate inputs
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    anyhow::ensure!(
        transcripts_path.is_some() || audio_dir.is_some(),
        "provide --transcripts or --audio-dir"
    );

    // Load decks
    let mut decks = if deck_path.is_dir() {
        parser::load_deck_directory(&deck_path)?
    } else {
        vec![parser::parse_deck(&deck_path)?]
    };

    // Apply tag filter
    if let Some(filter_tags) = &filter {
        let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
        for deck in &mut decks {
            deck.cards
                .retain(|c| c.tags.iter().any(|t| tags.contains(&t.as_str())));
        }
    }

    for deck in &decks {
        let start = Instant::now();

        let transcripts = match (&transcripts_path, &audio_dir) {
            (Some(path), _) => load_transcripts(path)?,
            (None, Some(dir)) => {
                transcribe_audio_dir(deck, dir, parallelism, config_path.as_deref()).await?
            }
            (None, None) => unreachable!("guarded by ensure above"),
        };

        eprintln!(
            "flashcoach — scoring {} cards from deck '{}'",
            deck.cards.len(),
            deck.name
        );

        let results = score_deck(&deck.cards, &transcripts);
        let stats = compute_session_stats(&results);
        let duration_ms = start.elapsed().as_millis() as u64;

        let report = SessionReport {
            id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            deck: DeckSummary {
                id: deck.id.clone(),
                name: deck.name.clone(),
                card_count: deck.cards.len(),
            },
            results,
            stats,
            duration_ms,
        };

        print_summary(&report);

        // Save outputs
        std::fs::create_dir_all(&output)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

        let formats: Vec<&str> = if format == "all" {
            vec!["json", "html"]
        } else {
            format.split(',').collect()
        };

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("session-{}-{timestamp}.json", deck.id));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("session-{}-{timestamp}.html", deck.id));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {
                    eprintln!("Unknown format: {fmt}");
                }
            }
        }
    }

    Ok(())
}

/// Load a prepared transcript mapping from a JSON file.
///
/// Every card id listed in the file counts as audio-present, even
/// with an empty transcript; cards absent from the file degrade to
/// the no-audio branch during scoring.
fn load_transcripts(path: &Path) -> Result<HashMap<String, TranscriptEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcripts from {}", path.display()))?;
    let raw: HashMap<String, String> =
        serde_json::from_str(&content).context("failed to parse transcripts JSON")?;

    Ok(raw
        .into_iter()
        .map(|(id, text)| {
            (
                id.clone(),
                TranscriptEntry {
                    id,
                    text,
                    has_audio: true,
                },
            )
        })
        .collect())
}

/// Transcribe `<audio-dir>/<card-id>.<ext>` recordings through the
/// configured backend.
async fn transcribe_audio_dir(
    deck: &Deck,
    dir: &Path,
    parallelism: usize,
    config_path: Option<&Path>,
) -> Result<HashMap<String, TranscriptEntry>> {
    let config = load_config_from(config_path)?;
    let transcriber = Arc::from(create_transcriber(&config.backend));
    tracing::info!("transcribing with backend '{}'", config.backend.name());

    let mut recordings = Vec::new();
    for card in &deck.cards {
        let Some(path) = find_recording(dir, &card.id) else {
            continue; // no recording means no audio for this card
        };
        let audio = std::fs::read(&path)
            .with_context(|| format!("failed to read audio file {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| card.id.clone());
        recordings.push((
            card.id.clone(),
            TranscribeRequest {
                audio,
                filename,
                language: None,
            },
        ));
    }

    let batch_config = BatchConfig {
        parallelism,
        max_retries: config.max_retries,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
    };

    Ok(transcribe_batch(transcriber, recordings, &batch_config).await)
}

/// Find the recording for a card, trying known audio extensions.
fn find_recording(dir: &Path, card_id: &str) -> Option<PathBuf> {
    AUDIO_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{card_id}.{ext}")))
        .find(|p| p.exists())
}

fn print_summary(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Card", "Score", "F1", "Similarity", "Feedback"]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(format!("{:.1}%", r.score * 100.0)),
            Cell::new(format!("{:.1}%", r.f1 * 100.0)),
            Cell::new(format!("{:.1}%", r.similarity * 100.0)),
            Cell::new(r.feedback.as_str()),
        ]);
    }

    println!("{table}");
    println!(
        "Mean score {:.1}% over {} cards ({} with audio)",
        report.stats.mean_score * 100.0,
        report.stats.card_count,
        report.stats.cards_with_audio
    );
}
