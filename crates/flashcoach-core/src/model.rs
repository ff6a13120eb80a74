//! Core data model types for flashcoach.
//!
//! These are the fundamental types the entire flashcoach system uses
//! to represent flashcards, decks, and transcripts.

use serde::{Deserialize, Serialize};

/// A single flashcard with a prompt and a reference answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardItem {
    /// Unique identifier for this card within a deck.
    pub id: String,
    /// The prompt shown to the learner. Opaque to scoring.
    #[serde(default)]
    pub front: String,
    /// The reference answer the spoken response is graded against.
    #[serde(default)]
    pub back: String,
    /// Advisory answer duration in seconds. Unused by scoring.
    #[serde(default)]
    pub duration_secs: Option<f64>,
    /// Tags for filtering cards.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A collection of flashcards studied together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Unique identifier for this deck.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this deck covers.
    #[serde(default)]
    pub description: String,
    /// The cards in this deck.
    #[serde(default)]
    pub cards: Vec<FlashcardItem>,
}

/// A speech transcript for one card, as produced by a transcription
/// backend or read from a prepared mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The card this transcript belongs to.
    pub id: String,
    /// The transcript text. May be empty when the recording yielded
    /// nothing usable.
    #[serde(default)]
    pub text: String,
    /// Whether any audio was captured for this card. A card with no
    /// entry at all is treated as audio-absent, not as an error.
    #[serde(default)]
    pub has_audio: bool,
}

impl TranscriptEntry {
    /// An entry for a card whose audio was never captured.
    pub fn absent(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: String::new(),
            has_audio: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashcard_serde_roundtrip() {
        let card = FlashcardItem {
            id: "capital-france".into(),
            front: "What is the capital of France?".into(),
            back: "Paris".into(),
            duration_secs: Some(10.0),
            tags: vec!["geography".into()],
        };
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: FlashcardItem = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, "capital-france");
        assert_eq!(deserialized.duration_secs, Some(10.0));
    }

    #[test]
    fn flashcard_missing_optional_fields() {
        let card: FlashcardItem = serde_json::from_str(r#"{"id": "bare"}"#).unwrap();
        assert_eq!(card.id, "bare");
        assert!(card.front.is_empty());
        assert!(card.back.is_empty());
        assert!(card.duration_secs.is_none());
        assert!(card.tags.is_empty());
    }

    #[test]
    fn absent_entry_has_no_audio() {
        let entry = TranscriptEntry::absent("card-1");
        assert_eq!(entry.id, "card-1");
        assert!(entry.text.is_empty());
        assert!(!entry.has_audio);
    }
}
