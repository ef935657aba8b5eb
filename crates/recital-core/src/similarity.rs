//! Token-pair similarity in [0, 1].
//!
//! Exact matches score 1.0, phonetic equivalents 0.9, and everything else
//! falls back to a length-normalized Levenshtein distance.

use crate::phonetic::are_equivalent;

/// Score given to phonetically equivalent but differently spelled words.
pub const PHONETIC_MATCH_SCORE: f64 = 0.9;

/// Bonus added for words longer than [`LONG_WORD_MIN_LEN`] characters.
pub const LONG_WORD_BONUS: f64 = 0.1;

/// Words strictly longer than this get [`LONG_WORD_BONUS`].
pub const LONG_WORD_MIN_LEN: usize = 5;

/// Character-level Levenshtein distance (unit costs).
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity of two normalized words.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if are_equivalent(a, b) {
        return PHONETIC_MATCH_SCORE;
    }

    let distance = levenshtein(a, b) as f64;
    let max_len = a.chars().count().max(b.chars().count());
    let bonus = if max_len > LONG_WORD_MIN_LEN {
        LONG_WORD_BONUS
    } else {
        0.0
    };

    (1.0 - distance / max_len as f64 + bonus).clamp(0.0, 1.0)
}
