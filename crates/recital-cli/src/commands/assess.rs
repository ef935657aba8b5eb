//! The `recital assess` command.

use std::path::PathBuf;

use anyhow::Result;

use recital_core::{Assessment, Assessor};

use super::resolve_config;

pub fn execute(
    reference: String,
    transcript: String,
    strategy: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path, strategy)?;
    let assessor = Assessor::try_new(config.assessment)?;
    let assessment = assessor.assess(&reference, &transcript);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&assessment)?),
        "text" => print_assessment(&assessment),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_assessment(assessment: &Assessment) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Word", "Result", "Correct"]);

    for (i, cmp) in assessment.word_comparisons.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&cmp.word),
            Cell::new(cmp.match_kind),
            Cell::new(if cmp.is_correct { "yes" } else { "no" }),
        ]);
    }
    for extra in &assessment.extra_words {
        table.add_row(vec![
            Cell::new("+"),
            Cell::new(&extra.word),
            Cell::new(extra.match_kind),
            Cell::new("-"),
        ]);
    }

    println!("{table}");
    println!(
        "Overall: {}  Accuracy: {}  Completeness: {}",
        assessment.overall_score, assessment.accuracy_score, assessment.completeness_score
    );
    println!(
        "Correct: {}  Incorrect: {}  Missing: {}  Extra: {}",
        assessment.correct_count,
        assessment.incorrect_count,
        assessment.missing_count,
        assessment.extra_count
    );
    println!("{}", assessment.feedback);
}
