//! Core data model types for recital.
//!
//! These are the records the engine produces for every assessment: the
//! normalized tokens, the per-word comparison records and the final
//! [`Assessment`] handed back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized word plus its position in the token sequence it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    position: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// The normalized word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of this token in its sequence.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// How a word was matched, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Spoken as written.
    Exact,
    /// Matched an approximate or phonetically equivalent word.
    Similar,
    /// Reference word with no usable counterpart in the transcript.
    Missing,
    /// Transcript word not consumed by any reference word.
    Extra,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Similar => write!(f, "similar"),
            MatchKind::Missing => write!(f, "missing"),
            MatchKind::Extra => write!(f, "extra"),
        }
    }
}

/// Per-word verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordComparison {
    pub word: String,
    pub is_correct: bool,
    pub match_kind: MatchKind,
}

/// Which alignment algorithm pairs reference and transcript words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    /// Windowed greedy left-to-right matching.
    #[default]
    Greedy,
    /// Order-preserving alignment over the full token matrix.
    Global,
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentStrategy::Greedy => write!(f, "greedy"),
            AlignmentStrategy::Global => write!(f, "global"),
        }
    }
}

impl FromStr for AlignmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" | "window" | "windowed" => Ok(AlignmentStrategy::Greedy),
            "global" | "dp" => Ok(AlignmentStrategy::Global),
            other => Err(format!("unknown alignment strategy: {other}")),
        }
    }
}

/// The full result of assessing one transcript against its reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub overall_score: u32,
    pub accuracy_score: u32,
    pub completeness_score: u32,
    pub reference_words: Vec<String>,
    /// Transcript tokens after filler removal.
    pub transcribed_words: Vec<String>,
    /// One record per reference word, in reference order.
    pub word_comparisons: Vec<WordComparison>,
    /// Transcript words left unconsumed, in transcript order.
    #[serde(default)]
    pub extra_words: Vec<WordComparison>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub missing_count: u32,
    pub extra_count: u32,
    pub feedback: String,
    #[serde(default)]
    pub strategy: AlignmentStrategy,
}

impl Assessment {
    /// Number of reference words assessed.
    pub fn total_words(&self) -> usize {
        self.reference_words.len()
    }

    /// True when nothing in the transcript matched the reference.
    pub fn is_all_missing(&self) -> bool {
        self.missing_count as usize == self.total_words()
    }
}
