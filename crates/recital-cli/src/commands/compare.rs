//! The `recital compare` command.

use std::path::PathBuf;

use anyhow::Result;

use recital_core::report::BatchReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = BatchReport::load_json(&baseline_path)?;
    let current = BatchReport::load_json(&current_path)?;

    if baseline.drill_set.id != current.drill_set.id {
        tracing::warn!(
            "comparing different drill sets: {} vs {}",
            baseline.drill_set.id,
            current.drill_set.id
        );
    }

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );
            println!(
                "Strategy: {} -> {}, mean overall {:+.1}",
                report.baseline_strategy, report.current_strategy, report.mean_delta
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {} -> {} ({:+})",
                        r.drill_id, r.baseline_score, r.current_score, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {} -> {} ({:+})",
                        i.drill_id, i.baseline_score, i.current_score, i.delta
                    );
                }
            }

            if report.new_drills > 0 {
                println!("\n{} new drill(s)", report.new_drills);
            }
            if report.removed_drills > 0 {
                println!("{} removed drill(s)", report.removed_drills);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
