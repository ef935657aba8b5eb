//! Batch report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::DrillResult;
use crate::model::AlignmentStrategy;
use crate::statistics::BatchStats;

/// A complete batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the drill set.
    pub drill_set: DrillSetSummary,
    /// Alignment strategy used for every drill.
    pub strategy: AlignmentStrategy,
    /// Individual drill results.
    pub results: Vec<DrillResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a drill set (without the drills themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillSetSummary {
    pub id: String,
    pub name: String,
    pub drill_count: usize,
}

impl BatchReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Default file name for this report inside an output directory.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}.json",
            self.drill_set.id,
            self.strategy,
            self.created_at.format("%Y%m%dT%H%M%S")
        )
    }

    /// Compare this report against a baseline, drill by drill.
    ///
    /// `threshold` is in score points; changes of at most that size count
    /// as unchanged.
    pub fn compare(&self, baseline: &BatchReport, threshold: f64) -> ComparisonReport {
        let score_map = |report: &BatchReport| -> HashMap<String, u32> {
            report
                .results
                .iter()
                .map(|r| (r.drill_id.clone(), r.assessment.overall_score))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_drills = 0usize;

        for result in &self.results {
            let current = result.assessment.overall_score;
            let Some(&baseline_val) = baseline_scores.get(&result.drill_id) else {
                new_drills += 1;
                continue;
            };
            let delta = current as f64 - baseline_val as f64;
            let change = ScoreChange {
                drill_id: result.drill_id.clone(),
                baseline_score: baseline_val,
                current_score: current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_drills = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        ComparisonReport {
            baseline_strategy: baseline.strategy,
            current_strategy: self.strategy,
            mean_delta: self.stats.mean_overall - baseline.stats.mean_overall,
            regressions,
            improvements,
            unchanged,
            new_drills,
            removed_drills,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline_strategy: AlignmentStrategy,
    pub current_strategy: AlignmentStrategy,
    /// Change in mean overall score.
    pub mean_delta: f64,
    /// Drills whose score went down.
    pub regressions: Vec<ScoreChange>,
    /// Drills whose score went up.
    pub improvements: Vec<ScoreChange>,
    /// Drills with no significant change.
    pub unchanged: usize,
    /// Drills in current but not baseline.
    pub new_drills: usize,
    /// Drills in baseline but not current.
    pub removed_drills: usize,
}

/// A score change for one drill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub drill_id: String,
    pub baseline_score: u32,
    pub current_score: u32,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged ({} → {}, mean {:+.1})\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged,
            self.baseline_strategy,
            self.current_strategy,
            self.mean_delta
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Drill | Baseline | Current | Delta |\n");
            md.push_str("|-------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {} | {} | {:+} |\n",
                    c.drill_id, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{run_drill_set, NoopReporter};
    use crate::config::AssessmentConfig;
    use crate::drill::{Drill, DrillSet};
    use crate::engine::Assessor;

    fn set(drills: &[(&str, &str, &str)]) -> DrillSet {
        DrillSet {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            default_min_score: None,
            drills: drills
                .iter()
                .map(|(id, reference, transcript)| Drill {
                    id: id.to_string(),
                    description: String::new(),
                    reference: reference.to_string(),
                    transcript: transcript.to_string(),
                    min_score: None,
                    tags: vec![],
                })
                .collect(),
        }
    }

    fn report(drills: &[(&str, &str, &str)]) -> BatchReport {
        run_drill_set(&set(drills), &Assessor::default(), &NoopReporter)
    }

    #[test]
    fn compare_identical_reports() {
        let drills = [("d1", "hello world", "hello world")];
        let comparison = report(&drills).compare(&report(&drills), 5.0);
        assert!(comparison.regressions.is_empty());
        assert!(comparison.improvements.is_empty());
        assert_eq!(comparison.unchanged, 1);
    }

    #[test]
    fn compare_with_regression() {
        let baseline = report(&[("d1", "hello world", "hello world")]);
        let current = report(&[("d1", "hello world", "")]);

        let comparison = current.compare(&baseline, 5.0);
        assert!(comparison.has_regressions());
        assert_eq!(comparison.regressions[0].drill_id, "d1");
        assert_eq!(comparison.regressions[0].delta, -100.0);
        assert_eq!(comparison.mean_delta, -100.0);
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = report(&[("old", "a", "a")]);
        let current = report(&[("new", "a", "a")]);

        let comparison = current.compare(&baseline, 5.0);
        assert_eq!(comparison.new_drills, 1);
        assert_eq!(comparison.removed_drills, 1);
    }

    #[test]
    fn compare_greedy_against_global() {
        let drills = [("swap", "hello world", "world hello")];
        let greedy = report(&drills);
        let global = run_drill_set(
            &set(&drills),
            &Assessor::new(AssessmentConfig::with_strategy(AlignmentStrategy::Global)),
            &NoopReporter,
        );

        let comparison = global.compare(&greedy, 5.0);
        assert_eq!(comparison.baseline_strategy, AlignmentStrategy::Greedy);
        assert_eq!(comparison.current_strategy, AlignmentStrategy::Global);
        assert!(comparison.has_regressions());
    }

    #[test]
    fn json_roundtrip() {
        let report = report(&[("d1", "good morning", "good morning")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = BatchReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.drill_set.id, "test");
        assert_eq!(loaded.results, report.results);
    }

    #[test]
    fn markdown_output() {
        let baseline = report(&[("d1", "hello world", "hello world")]);
        let current = report(&[("d1", "hello world", "")]);

        let md = current.compare(&baseline, 5.0).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("| d1 | 100 | 0 | -100 |"));
    }

    #[test]
    fn file_name_includes_set_and_strategy() {
        let name = report(&[("d1", "a", "a")]).file_name();
        assert!(name.starts_with("test-greedy-"));
        assert!(name.ends_with(".json"));
    }
}
