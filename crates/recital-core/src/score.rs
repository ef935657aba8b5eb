//! Score aggregation.
//!
//! Turns alignment counts into the three 0–100 scores reported to learners.

use serde::{Deserialize, Serialize};

use crate::align::Alignment;
use crate::config::AssessmentConfig;
use crate::model::MatchKind;

/// Per-assessment word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub correct: u32,
    /// Matched, but not closely enough to count as correct.
    pub incorrect: u32,
    pub missing: u32,
    /// Transcript words no reference word consumed.
    pub extra: u32,
}

/// Narrow a word count, saturating at `u32::MAX`.
pub(crate) fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl MatchCounts {
    pub fn from_alignment(alignment: &Alignment) -> Self {
        let mut counts = MatchCounts {
            extra: count_u32(alignment.extra_count()),
            ..Default::default()
        };
        for comparison in &alignment.comparisons {
            match (comparison.is_correct, comparison.match_kind) {
                (true, _) => counts.correct = counts.correct.saturating_add(1),
                (false, MatchKind::Missing) => counts.missing = counts.missing.saturating_add(1),
                (false, _) => counts.incorrect = counts.incorrect.saturating_add(1),
            }
        }
        counts
    }

    /// Reference words that found a counterpart, correct or not.
    pub fn matched(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Accuracy, completeness and their weighted blend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub overall: u32,
    pub accuracy: u32,
    pub completeness: u32,
}

fn percent(part: u32, total: usize) -> f64 {
    100.0 * part as f64 / total as f64
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Compute scores for `total` reference words. An empty reference scores 0.
pub fn compute_scores(counts: &MatchCounts, total: usize, config: &AssessmentConfig) -> Scores {
    if total == 0 {
        return Scores::default();
    }

    let accuracy = to_score(percent(counts.correct, total));
    let completeness = to_score(percent(counts.matched(), total));
    let overall = to_score(
        config.accuracy_weight * accuracy as f64 + config.completeness_weight * completeness as f64,
    );

    Scores {
        overall,
        accuracy,
        completeness,
    }
}
