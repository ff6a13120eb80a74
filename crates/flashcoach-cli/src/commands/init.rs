//! The `flashcoach init` command.

use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_CONFIG: &str = r#"# flashcoach configuration

parallelism = 4
max_retries = 2
retry_delay_ms = 1000
output_dir = "./flashcoach-results"

[backend]
type = "stub"

# To grade against a whisper.cpp server instead:
# [backend]
# type = "whisper"
# base_url = "http://localhost:8080"
# language = "en"
"#;

const SAMPLE_DECK: &str = r#"[deck]
id = "biology-basics"
name = "Biology Basics"
description = "Introductory cell biology"

[[cards]]
id = "cell-energy"
front = "What is the powerhouse of the cell?"
back = "The mitochondria produces energy for the cell"
tags = ["biology"]

[[cards]]
id = "photosynthesis"
front = "What do plants use to convert sunlight into energy?"
back = "Plants use photosynthesis to convert sunlight into chemical energy"
tags = ["biology", "plants"]
"#;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("flashcoach.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("decks").context("failed to create decks directory")?;
    write_if_absent(Path::new("decks/example.toml"), SAMPLE_DECK)?;

    println!();
    println!("Next steps:");
    println!("  1. Edit decks/example.toml or add your own decks");
    println!("  2. Record answers and transcribe them, or prepare a transcripts JSON");
    println!("  3. Run: flashcoach score --deck decks/example.toml --transcripts answers.json");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping", path.display());
        return Ok(());
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
