//! The scoring engine.
//!
//! Combines the text pipeline, similarity estimator, coverage scorer,
//! and feedback classifier into one result per card. Scoring is a pure
//! transformation over in-memory data: each card is independent, no
//! state is shared between cards, and nothing here can fail — missing
//! transcripts degrade to the no-audio feedback branch.

use std::collections::HashMap;

use crate::coverage::coverage;
use crate::feedback::classify;
use crate::model::{FlashcardItem, TranscriptEntry};
use crate::results::{round3, CardResult, F1_WEIGHT, SIMILARITY_WEIGHT};
use crate::similarity::similarity_ratio;
use crate::text::{normalize, tokens};

/// Score one card against its transcript entry.
pub fn score_card(card: &FlashcardItem, entry: &TranscriptEntry) -> CardResult {
    let back_norm = normalize(&card.back);
    let back_tokens = tokens(&card.back);

    let transcript_norm = normalize(&entry.text);
    let transcript_tokens = tokens(&transcript_norm);

    let cov = coverage(&back_tokens, &transcript_tokens);
    let similarity = if transcript_norm.is_empty() {
        0.0
    } else {
        similarity_ratio(&back_norm, &transcript_norm)
    };

    let feedback = classify(
        entry.has_audio,
        transcript_norm.is_empty(),
        cov.f1,
        similarity,
    );
    let score = round3(F1_WEIGHT * cov.f1 + SIMILARITY_WEIGHT * similarity);

    CardResult {
        id: card.id.clone(),
        front: card.front.clone(),
        back: card.back.clone(),
        duration_secs: card.duration_secs,
        has_audio: entry.has_audio,
        transcript: entry.text.clone(),
        similarity: round3(similarity),
        precision: round3(cov.precision),
        recall: round3(cov.recall),
        f1: round3(cov.f1),
        missing_keywords: cov.missing,
        extra_terms: cov.extra,
        feedback,
        score,
    }
}

/// Score every card in a deck, in input order.
///
/// Cards with no transcript entry are scored as audio-absent rather
/// than treated as an error.
pub fn score_deck(
    cards: &[FlashcardItem],
    transcripts: &HashMap<String, TranscriptEntry>,
) -> Vec<CardResult> {
    cards
        .iter()
        .map(|card| match transcripts.get(&card.id) {
            Some(entry) => score_card(card, entry),
            None => score_card(card, &TranscriptEntry::absent(&card.id)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Feedback;

    fn card(id: &str, back: &str) -> FlashcardItem {
        FlashcardItem {
            id: id.into(),
            front: format!("front of {id}"),
            back: back.into(),
            duration_secs: None,
            tags: vec![],
        }
    }

    fn entry(id: &str, text: &str) -> TranscriptEntry {
        TranscriptEntry {
            id: id.into(),
            text: text.into(),
            has_audio: true,
        }
    }

    #[test]
    fn identical_answer_scores_one() {
        let result = score_card(&card("c1", "Paris"), &entry("c1", "Paris"));
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.f1, 1.0);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.feedback, Feedback::High);
    }

    #[test]
    fn keyword_only_answer_is_high_coverage() {
        let result = score_card(
            &card("c1", "The mitochondria is the powerhouse of the cell"),
            &entry("c1", "mitochondria powerhouse cell"),
        );
        assert_eq!(result.precision, 1.0);
        assert_eq!(result.recall, 1.0);
        assert_eq!(result.f1, 1.0);
        assert_eq!(result.feedback, Feedback::High);
        assert!(result.missing_keywords.is_empty());
        assert!(result.extra_terms.is_empty());
    }

    #[test]
    fn empty_transcript_with_audio() {
        let result = score_card(&card("c1", "Paris"), &entry("c1", ""));
        assert_eq!(result.feedback, Feedback::EmptyTranscript);
        assert_eq!(result.f1, 0.0);
        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn punctuation_only_transcript_counts_as_empty() {
        let result = score_card(&card("c1", "Paris"), &entry("c1", "... !!"));
        assert_eq!(result.feedback, Feedback::EmptyTranscript);
    }

    #[test]
    fn missing_entry_degrades_to_no_audio() {
        let cards = vec![card("c1", "Paris"), card("c2", "Berlin")];
        let mut transcripts = HashMap::new();
        transcripts.insert("c1".to_string(), entry("c1", "paris"));

        let results = score_deck(&cards, &transcripts);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].feedback, Feedback::High);
        assert_eq!(results[1].feedback, Feedback::NoAudio);
        assert!(!results[1].has_audio);
        assert!(results[1].transcript.is_empty());
    }

    #[test]
    fn no_audio_wins_over_matching_text() {
        let result = score_card(
            &card("c1", "Paris"),
            &TranscriptEntry {
                id: "c1".into(),
                text: "Paris".into(),
                has_audio: false,
            },
        );
        assert_eq!(result.feedback, Feedback::NoAudio);
    }

    #[test]
    fn results_preserve_card_order() {
        let cards = vec![card("z", "zebra"), card("a", "ant"), card("m", "moth")];
        let results = score_deck(&cards, &HashMap::new());
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn score_is_weighted_blend() {
        // reference tokens {alpha, beta, gamma, delta}, transcript
        // tokens {alpha, beta}: precision 1.0, recall 0.5, f1 = 2/3.
        // similarity: 10-char common prefix over 22 + 10 chars
        // = 20/32 = 0.625. score = 0.6 * 2/3 + 0.4 * 0.625 = 0.65.
        let result = score_card(
            &card("c1", "alpha beta gamma delta"),
            &entry("c1", "alpha beta"),
        );
        assert_eq!(result.precision, 1.0);
        assert_eq!(result.recall, 0.5);
        assert_eq!(result.f1, 0.667);
        assert_eq!(result.similarity, 0.625);
        assert_eq!(result.score, 0.65);
        assert_eq!(result.feedback, Feedback::Partial);
    }

    #[test]
    fn cjk_partial_answer() {
        let result = score_card(&card("c1", "首都京"), &entry("c1", "首都"));
        assert_eq!(result.precision, 1.0);
        assert_eq!(result.recall, 0.667);
        assert_eq!(result.f1, 0.8);
        assert_eq!(result.feedback, Feedback::High);
    }

    #[test]
    fn disjoint_answer_is_low_with_keyword_lists() {
        let result = score_card(
            &card("c1", "photosynthesis chlorophyll sunlight"),
            &entry("c1", "gravity acceleration mass"),
        );
        assert_eq!(result.f1, 0.0);
        assert_eq!(result.feedback, Feedback::Low);
        assert_eq!(
            result.missing_keywords,
            vec!["chlorophyll", "photosynthesis", "sunlight"]
        );
        assert_eq!(
            result.extra_terms,
            vec!["acceleration", "gravity", "mass"]
        );
    }

    #[test]
    fn empty_reference_answer_scores_zero() {
        let result = score_card(&card("c1", ""), &entry("c1", "some spoken words"));
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.precision, 0.0);
        assert_eq!(result.f1, 0.0);
    }
}
