//! The `recital validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(drills_path: PathBuf) -> Result<()> {
    let sets = recital_core::parser::load_drills(&drills_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        println!("Drill set: {} ({} drills)", set.name, set.drills.len());

        let warnings = recital_core::parser::validate_drill_set(set);
        for w in &warnings {
            let prefix = w
                .drill_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if sets.is_empty() {
        println!("No drill sets found.");
    } else if total_warnings == 0 {
        println!("All drill sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
