//! Text normalization and tokenization.
//!
//! Tokenization assumes space-delimited scripts. Languages written without
//! word separators must be segmented before they reach this module.

use crate::model::Token;

/// Characters removed before splitting. Apostrophes are handled separately
/// so contractions like "they're" survive.
const STRIPPED_CHARS: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`',
    '~', '(', ')', '?', '"', '[', ']', '<', '>', '|', '\\', '+', '@', '¿', '¡', '«', '»', '“',
    '”', '„', '–', '—', '…',
];

/// Filler phrases dropped from transcripts, as token sequences.
const FILLER_PHRASES: &[&[&str]] = &[
    &["um"],
    &["umm"],
    &["uh"],
    &["uhh"],
    &["er"],
    &["erm"],
    &["ah"],
    &["hmm"],
    &["mm"],
    &["like"],
    &["you", "know"],
    &["sort", "of"],
    &["kind", "of"],
    &["i", "mean"],
];

fn is_stripped(c: char) -> bool {
    STRIPPED_CHARS.contains(&c)
}

/// Lowercase, strip punctuation and collapse whitespace.
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02bc}' => '\'',
            c if is_stripped(c) => ' ',
            c => c,
        })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize a string. Never fails; empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    clean_text(text)
        .split(' ')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, w)| Token::new(w, i))
        .collect()
}

/// Remove filler phrases from transcript tokens.
///
/// A filler phrase that also occurs in the reference is treated as content
/// and left in place. Surviving tokens are renumbered.
pub fn strip_fillers(tokens: Vec<Token>, reference: &[Token]) -> Vec<Token> {
    let words: Vec<&str> = tokens.iter().map(Token::text).collect();
    let reference_words: Vec<&str> = reference.iter().map(Token::text).collect();

    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < words.len() {
        let filler = FILLER_PHRASES.iter().find(|phrase| {
            words[i..].starts_with(phrase) && !contains_phrase(&reference_words, phrase)
        });
        match filler {
            Some(phrase) => i += phrase.len(),
            None => {
                kept.push(Token::new(words[i], kept.len()));
                i += 1;
            }
        }
    }
    kept
}

fn contains_phrase(haystack: &[&str], phrase: &[&str]) -> bool {
    haystack.windows(phrase.len()).any(|w| w == phrase)
}

/// Tokenize the reference side. Reference text is never filler-filtered.
pub fn normalize_reference(text: &str) -> Vec<Token> {
    tokenize(text)
}

/// Tokenize the transcript side and drop fillers.
pub fn normalize_transcript(text: &str, reference: &[Token]) -> Vec<Token> {
    strip_fillers(tokenize(text), reference)
}
