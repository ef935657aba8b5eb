//! Aggregate statistics over a batch of drill results.

use serde::{Deserialize, Serialize};

use crate::batch::DrillResult;

/// Word-level totals summed across drills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTotals {
    pub reference_words: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub missing: u64,
    pub extra: u64,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub drill_count: usize,
    pub mean_overall: f64,
    pub mean_accuracy: f64,
    pub mean_completeness: f64,
    pub median_overall: f64,
    /// Drills that had a pass mark.
    pub graded: usize,
    pub passed: usize,
    /// `passed / graded`, or `None` when nothing was graded.
    pub pass_rate: Option<f64>,
    pub words: WordTotals,
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Median of a list of scores. Even-length lists average the middle pair.
pub fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Compute summary statistics from drill results.
pub fn compute_batch_stats(results: &[DrillResult]) -> BatchStats {
    let overall: Vec<u32> = results.iter().map(|r| r.assessment.overall_score).collect();
    let accuracy: Vec<u32> = results.iter().map(|r| r.assessment.accuracy_score).collect();
    let completeness: Vec<u32> = results
        .iter()
        .map(|r| r.assessment.completeness_score)
        .collect();

    let graded = results.iter().filter(|r| r.passed.is_some()).count();
    let passed = results.iter().filter(|r| r.passed == Some(true)).count();
    let pass_rate = (graded > 0).then(|| passed as f64 / graded as f64);

    let words = results.iter().fold(WordTotals::default(), |mut acc, r| {
        let a = &r.assessment;
        acc.reference_words += a.total_words() as u64;
        acc.correct += a.correct_count as u64;
        acc.incorrect += a.incorrect_count as u64;
        acc.missing += a.missing_count as u64;
        acc.extra += a.extra_count as u64;
        acc
    });

    BatchStats {
        drill_count: results.len(),
        mean_overall: mean(&overall),
        mean_accuracy: mean(&accuracy),
        mean_completeness: mean(&completeness),
        median_overall: median(&overall),
        graded,
        passed,
        pass_rate,
        words,
    }
}
