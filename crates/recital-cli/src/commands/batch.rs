//! The `recital batch` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use recital_core::batch::{run_drill_set, DrillResult, ProgressReporter};
use recital_core::parser;
use recital_core::report::BatchReport;
use recital_core::Assessor;

use super::resolve_config;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_drill_complete(&self, result: &DrillResult) {
        let verdict = match result.passed {
            Some(true) => " PASS",
            Some(false) => " FAIL",
            None => "",
        };
        let a = &result.assessment;
        eprintln!(
            "  {}: overall {} ({} correct, {} incorrect, {} missing, {} extra){}",
            result.drill_id,
            a.overall_score,
            a.correct_count,
            a.incorrect_count,
            a.missing_count,
            a.extra_count,
            verdict,
        );
    }

    fn on_set_complete(&self, total: usize, passed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {total} drills, {passed} passed ({:.1}ms)",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

pub fn execute(
    drills_path: PathBuf,
    strategy: Option<String>,
    output: Option<PathBuf>,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path, strategy)?;
    let output = output.unwrap_or(config.output_dir);

    let mut drill_sets = parser::load_drills(&drills_path)?;
    anyhow::ensure!(
        !drill_sets.is_empty(),
        "no drill sets found in {}",
        drills_path.display()
    );

    if let Some(filter_tags) = &filter {
        let tags: Vec<String> = filter_tags.split(',').map(|s| s.trim().to_string()).collect();
        for set in &mut drill_sets {
            set.filter_by_tags(&tags);
        }
    }

    let assessor = Assessor::try_new(config.assessment)?;
    let reporter = ConsoleReporter;

    for drill_set in &drill_sets {
        eprintln!(
            "recital v{} - assessing {} drills from {} ({} alignment)",
            env!("CARGO_PKG_VERSION"),
            drill_set.drills.len(),
            drill_set.name,
            assessor.config().strategy
        );
        eprintln!();

        let report = run_drill_set(drill_set, &assessor, &reporter);
        print_summary(&report);

        let path = output.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &BatchReport) {
    use comfy_table::{Cell, Table};

    let stats = &report.stats;
    let mut table = Table::new();
    table.set_header(vec![
        "Drill set",
        "Drills",
        "Mean overall",
        "Median",
        "Accuracy",
        "Completeness",
        "Pass rate",
    ]);
    table.add_row(vec![
        Cell::new(&report.drill_set.name),
        Cell::new(stats.drill_count),
        Cell::new(format!("{:.1}", stats.mean_overall)),
        Cell::new(format!("{:.1}", stats.median_overall)),
        Cell::new(format!("{:.1}", stats.mean_accuracy)),
        Cell::new(format!("{:.1}", stats.mean_completeness)),
        Cell::new(
            stats
                .pass_rate
                .map(|r| format!("{:.1}%", r * 100.0))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);

    eprintln!("\n{table}");
}
