//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use flashcoach_core::feedback::Feedback;
use flashcoach_core::report::{DeckSummary, SessionReport};
use flashcoach_core::results::CardResult;
use flashcoach_core::statistics::compute_session_stats;

fn flashcoach() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("flashcoach").unwrap()
}

#[test]
fn validate_example_deck() {
    flashcoach()
        .arg("validate")
        .arg("--deck")
        .arg("../../decks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cards"))
        .stdout(predicate::str::contains("All decks valid"));
}

#[test]
fn validate_directory() {
    flashcoach()
        .arg("validate")
        .arg("--deck")
        .arg("../../decks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Biology Basics"));
}

#[test]
fn validate_nonexistent_file() {
    flashcoach()
        .arg("validate")
        .arg("--deck")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_warns_on_empty_back() {
    let dir = TempDir::new().unwrap();
    let deck_path = dir.path().join("bad.toml");
    std::fs::write(
        &deck_path,
        r#"[deck]
id = "bad"
name = "Bad Deck"

[[cards]]
id = "c1"
front = "A prompt"
back = ""
"#,
    )
    .unwrap();

    flashcoach()
        .arg("validate")
        .arg("--deck")
        .arg(&deck_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("score 0"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    flashcoach()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created flashcoach.toml"))
        .stdout(predicate::str::contains("Created decks/example.toml"));

    assert!(dir.path().join("flashcoach.toml").exists());
    assert!(dir.path().join("decks/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    flashcoach()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    flashcoach()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn score_with_prepared_transcripts() {
    let dir = TempDir::new().unwrap();
    let deck_path = dir.path().join("deck.toml");
    std::fs::write(
        &deck_path,
        r#"[deck]
id = "demo"
name = "Demo"

[[cards]]
id = "cell-energy"
front = "What is the powerhouse of the cell?"
back = "The mitochondria produces energy for the cell"
"#,
    )
    .unwrap();

    let transcripts_path = dir.path().join("transcripts.json");
    std::fs::write(
        &transcripts_path,
        r#"{"cell-energy": "mitochondria produce energy"}"#,
    )
    .unwrap();

    let output_dir = dir.path().join("out");

    flashcoach()
        .arg("score")
        .arg("--deck")
        .arg(&deck_path)
        .arg("--transcripts")
        .arg(&transcripts_path)
        .arg("--output")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("cell-energy"))
        .stdout(predicate::str::contains("Mean score"));

    // A session JSON file is written to the output directory
    let saved: Vec<_> = std::fs::read_dir(&output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(saved.len(), 1);

    let report = SessionReport::load_json(&saved[0].path()).unwrap();
    assert_eq!(report.results.len(), 1);
    assert!(report.results[0].has_audio);
    assert!(report.results[0].score > 0.0);
}

#[test]
fn score_requires_transcripts_or_audio() {
    flashcoach()
        .arg("score")
        .arg("--deck")
        .arg("../../decks/example.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--transcripts or --audio-dir"));
}

#[test]
fn compare_detects_regression() {
    let dir = TempDir::new().unwrap();

    let baseline = make_test_report("cell-energy", 0.9);
    let current = make_test_report("cell-energy", 0.4);

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    baseline.save_json(&baseline_path).unwrap();
    current.save_json(&current_path).unwrap();

    flashcoach()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 regressions"));
}

#[test]
fn compare_fail_on_regression_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    let baseline = make_test_report("cell-energy", 0.9);
    let current = make_test_report("cell-energy", 0.4);

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    baseline.save_json(&baseline_path).unwrap();
    current.save_json(&current_path).unwrap();

    flashcoach()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .arg("--fail-on-regression")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    flashcoach()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn help_output() {
    flashcoach()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spoken flashcard answer grading"));
}

#[test]
fn version_output() {
    flashcoach()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flashcoach"));
}

/// Build a minimal single-card session report with the given score.
fn make_test_report(card_id: &str, score: f64) -> SessionReport {
    let result = CardResult {
        id: card_id.to_string(),
        front: "prompt".to_string(),
        back: "reference answer".to_string(),
        duration_secs: None,
        has_audio: true,
        transcript: "spoken answer".to_string(),
        similarity: score,
        precision: score,
        recall: score,
        f1: score,
        missing_keywords: vec![],
        extra_terms: vec![],
        feedback: Feedback::Partial,
        score,
    };
    let stats = compute_session_stats(std::slice::from_ref(&result));

    SessionReport {
        id: uuid::Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        deck: DeckSummary {
            id: "test-deck".to_string(),
            name: "Test Deck".to_string(),
            card_count: 1,
        },
        results: vec![result],
        stats,
        duration_ms: 10,
    }
}
