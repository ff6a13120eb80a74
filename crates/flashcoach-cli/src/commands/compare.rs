//! The `flashcoach compare` command.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};

use flashcoach_core::report::{ProgressReport, SessionReport};

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = SessionReport::load_json(&baseline_path)
        .with_context(|| format!("failed to load baseline {}", baseline_path.display()))?;
    let current = SessionReport::load_json(&current_path)
        .with_context(|| format!("failed to load current {}", current_path.display()))?;

    let progress = current.compare(&baseline, threshold);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&progress)?),
        "markdown" => println!("{}", progress.to_markdown()),
        _ => print_text(&progress),
    }

    if fail_on_regression && progress.has_regressions() {
        process::exit(1);
    }

    Ok(())
}

fn print_text(progress: &ProgressReport) {
    println!(
        "{} regressions, {} improvements, {} unchanged, {} new, {} removed",
        progress.regressions.len(),
        progress.improvements.len(),
        progress.unchanged,
        progress.new_cards,
        progress.removed_cards
    );

    for r in &progress.regressions {
        println!(
            "  ↓ {}: {:.1}% -> {:.1}% ({:.1}%)",
            r.card_id,
            r.baseline_score * 100.0,
            r.current_score * 100.0,
            r.delta * 100.0
        );
    }

    for i in &progress.improvements {
        println!(
            "  ↑ {}: {:.1}% -> {:.1}% (+{:.1}%)",
            i.card_id,
            i.baseline_score * 100.0,
            i.current_score * 100.0,
            i.delta * 100.0
        );
    }
}
