//! TOML deck parser.
//!
//! Loads decks from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Deck, FlashcardItem};

/// Intermediate TOML structure for parsing deck files.
#[derive(Debug, Deserialize)]
struct TomlDeckFile {
    deck: TomlDeckHeader,
    #[serde(default)]
    cards: Vec<TomlCard>,
}

#[derive(Debug, Deserialize)]
struct TomlDeckHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCard {
    id: String,
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
    #[serde(default)]
    duration_secs: Option<f64>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into a `Deck`.
pub fn parse_deck(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;

    parse_deck_str(&content, path)
}

/// Parse a TOML string into a `Deck` (useful for testing).
pub fn parse_deck_str(content: &str, source_path: &Path) -> Result<Deck> {
    let parsed: TomlDeckFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let cards = parsed
        .cards
        .into_iter()
        .map(|c| FlashcardItem {
            id: c.id,
            front: c.front,
            back: c.back,
            duration_secs: c.duration_secs,
            tags: c.tags,
        })
        .collect();

    Ok(Deck {
        id: parsed.deck.id,
        name: parsed.deck.name,
        description: parsed.deck.description,
        cards,
    })
}

/// Recursively load all `.toml` deck files from a directory.
pub fn load_deck_directory(dir: &Path) -> Result<Vec<Deck>> {
    let mut decks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            decks.extend(load_deck_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_deck(&path) {
                Ok(deck) => decks.push(deck),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(decks)
}

/// A warning from deck validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The card ID (if applicable).
    pub card_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a deck for common issues.
pub fn validate_deck(deck: &Deck) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate card IDs
    let mut seen_ids = std::collections::HashSet::new();
    for card in &deck.cards {
        if !seen_ids.insert(&card.id) {
            warnings.push(ValidationWarning {
                card_id: Some(card.id.clone()),
                message: format!("duplicate card ID: {}", card.id),
            });
        }
    }

    // An empty reference answer scores zero against everything
    for card in &deck.cards {
        if card.back.trim().is_empty() {
            warnings.push(ValidationWarning {
                card_id: Some(card.id.clone()),
                message: "reference answer (back) is empty; every response will score 0".into(),
            });
        }
    }

    for card in &deck.cards {
        if card.front.trim().is_empty() {
            warnings.push(ValidationWarning {
                card_id: Some(card.id.clone()),
                message: "prompt (front) is empty".into(),
            });
        }
    }

    // A reference answer made only of stop words has no keywords
    for card in &deck.cards {
        if !card.back.trim().is_empty() && crate::text::tokens(&card.back).is_empty() {
            warnings.push(ValidationWarning {
                card_id: Some(card.id.clone()),
                message: "reference answer contains no scorable keywords".into(),
            });
        }
    }

    warnings
}
