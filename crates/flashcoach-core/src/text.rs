//! Text normalization and tokenization.
//!
//! The tokenizer handles mixed-script answers: CJK ideographs become
//! one-character tokens (there are no whitespace word boundaries to
//! split on), while Latin text is split into lowercase words with
//! common English function words removed.

use std::collections::BTreeSet;

/// English stop words excluded from keyword token sets. Sorted, so
/// membership is a binary search. Read-only process-wide policy.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against",
    "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by",
    "can", "did", "do", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his",
    "how", "i", "if", "in", "into", "is",
    "it", "its", "itself", "just", "me", "more",
    "most", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Returns `true` if `word` is a common English function word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Returns `true` for CJK ideographs in the unified block (U+4E00–U+9FFF).
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Canonicalize raw text into a comparable single-line form.
///
/// Lowercases everything, collapses each maximal run of characters
/// that is neither alphanumeric, underscore, nor a CJK ideograph into
/// one space, and strips leading/trailing whitespace. Pure and total:
/// any input, including empty, produces a valid (possibly empty)
/// output.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || is_cjk(c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the deduplicated keyword token set from raw text.
///
/// The input is normalized first. CJK ideographs each contribute a
/// one-character token; maximal runs of ASCII letters contribute a
/// token when at least two characters long and not a stop word.
/// Digits and underscores separate Latin runs but never appear in
/// tokens.
pub fn tokens(text: &str) -> BTreeSet<String> {
    let norm = normalize(text);
    let mut set = BTreeSet::new();
    let mut run = String::new();

    for c in norm.chars() {
        if c.is_ascii_alphabetic() {
            run.push(c);
            continue;
        }
        flush_latin_run(&mut run, &mut set);
        if is_cjk(c) {
            set.insert(c.to_string());
        }
    }
    flush_latin_run(&mut run, &mut set);

    set
}

fn flush_latin_run(run: &mut String, set: &mut BTreeSet<String>) {
    if run.len() >= 2 && !is_stop_word(run) {
        set.insert(std::mem::take(run));
    } else {
        run.clear();
    }
}
