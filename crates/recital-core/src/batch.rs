//! Batch assessment of a drill set.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drill::DrillSet;
use crate::engine::Assessor;
use crate::model::Assessment;
use crate::report::{BatchReport, DrillSetSummary};
use crate::statistics::compute_batch_stats;

/// The assessment of one drill plus its pass/fail verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillResult {
    pub drill_id: String,
    /// Pass mark in effect, if the drill or its set defines one.
    #[serde(default)]
    pub pass_mark: Option<u32>,
    /// `None` when the drill has no pass mark.
    #[serde(default)]
    pub passed: Option<bool>,
    pub assessment: Assessment,
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_drill_complete(&self, result: &DrillResult);
    fn on_set_complete(&self, total: usize, passed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_drill_complete(&self, _: &DrillResult) {}
    fn on_set_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Assess every drill in `set` and collect the results into a report.
pub fn run_drill_set(
    set: &DrillSet,
    assessor: &Assessor,
    progress: &dyn ProgressReporter,
) -> BatchReport {
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    tracing::info!(
        drill_set = %set.id,
        drills = set.drills.len(),
        strategy = %assessor.config().strategy,
        "running drill set"
    );

    let mut results = Vec::with_capacity(set.drills.len());
    for drill in &set.drills {
        let assessment = assessor.assess(&drill.reference, &drill.transcript);
        let pass_mark = set.pass_mark(drill);
        let passed = pass_mark.map(|mark| assessment.overall_score >= mark);
        if assessment.is_all_missing() && !assessment.reference_words.is_empty() {
            tracing::warn!("drill {}: no reference word was recognized", drill.id);
        }

        let result = DrillResult {
            drill_id: drill.id.clone(),
            pass_mark,
            passed,
            assessment,
        };
        progress.on_drill_complete(&result);
        results.push(result);
    }

    let stats = compute_batch_stats(&results);
    let elapsed = start.elapsed();
    progress.on_set_complete(results.len(), stats.passed, elapsed);

    BatchReport {
        id: run_id,
        created_at: chrono::Utc::now(),
        drill_set: DrillSetSummary {
            id: set.id.clone(),
            name: set.name.clone(),
            drill_count: set.drills.len(),
        },
        strategy: assessor.config().strategy,
        results,
        stats,
        duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    }
}
