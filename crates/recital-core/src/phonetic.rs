//! Phonetic equivalence table.
//!
//! Groups of words speech recognizers routinely confuse with one another.
//! The table is read-only; lookups go through a lazily built index.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Interchangeable spellings, lowercase.
pub const EQUIVALENCE_GROUPS: &[&[&str]] = &[
    &["there", "their", "they're"],
    &["to", "too", "two"],
    &["write", "right", "rite"],
    &["see", "sea"],
    &["for", "four", "fore"],
    &["ate", "eight"],
    &["no", "know"],
    &["hear", "here"],
    &["your", "you're"],
    &["its", "it's"],
    &["whose", "who's"],
    &["new", "knew"],
    &["one", "won"],
    &["by", "buy", "bye"],
    &["be", "bee"],
    &["weather", "whether"],
    &["where", "wear"],
    &["which", "witch"],
    &["week", "weak"],
    &["son", "sun"],
    &["meet", "meat"],
    &["road", "rode"],
    &["flower", "flour"],
    &["hour", "our"],
    &["piece", "peace"],
    &["plane", "plain"],
    &["wait", "weight"],
    &["would", "wood"],
];

static GROUP_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    EQUIVALENCE_GROUPS
        .iter()
        .enumerate()
        .flat_map(|(idx, group)| group.iter().map(move |word| (*word, idx)))
        .collect()
});

/// Index of the group containing `word`, if any.
pub fn group_of(word: &str) -> Option<usize> {
    GROUP_INDEX.get(word).copied()
}

/// Returns true if `a` and `b` are the same word or share a group.
pub fn are_equivalent(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (group_of(a), group_of(b)) {
        (Some(ga), Some(gb)) => ga == gb,
        _ => false,
    }
}
