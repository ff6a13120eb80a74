//! Whole-string similarity between normalized texts.
//!
//! Implements the Ratcliff/Obershelp matching-blocks ratio: find the
//! longest common contiguous substring, recurse on the fragments to
//! the left and right, and sum the matched lengths. The ratio is
//! twice the matched total over the combined length, which captures
//! word order and partial phrasing overlap that set-based keyword
//! comparison misses.

/// Similarity ratio in `[0.0, 1.0]` between two normalized strings.
///
/// Defined as 0.0 when the transcript side is empty, bypassing the
/// algorithm: an empty transcript must never look like a full match
/// against an empty reference.
pub fn similarity_ratio(reference: &str, transcript: &str) -> f64 {
    if transcript.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = reference.chars().collect();
    let b: Vec<char> = transcript.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let matched = matched_len(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total length of matching blocks between `a` and `b`.
fn matched_len(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..ai], &b[..bi]) + matched_len(&a[ai + len..], &b[bi + len..])
}

/// Find the longest common contiguous substring of `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, length)`. Ties resolve to the
/// earliest starting position in `a`, then in `b`. Runs in O(|a|·|b|)
/// time with a single O(|b|) row of state.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    // lengths[j] = length of the common suffix of a[..=i] and b[..=j]
    let mut lengths = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        // iterate j in reverse so lengths[j] still holds the previous row
        for j in (0..b.len()).rev() {
            if ca == b[j] {
                let k = lengths[j] + 1;
                lengths[j + 1] = k;
                // reverse-j visits equal-length blocks at the same
                // start in `a` from largest `b` start down, so an
                // equal-length block must still win on a smaller one
                if k > best.2 || (k == best.2 && i + 1 - k == best.0 && j + 1 - k < best.1) {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                lengths[j + 1] = 0;
            }
        }
        lengths[0] = 0;
    }

    best
}
