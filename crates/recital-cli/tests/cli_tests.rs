//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn recital() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("recital").unwrap();
    cmd.env_remove("RECITAL_STRATEGY");
    cmd
}

/// The single report file written into `dir`.
fn only_report(dir: &Path) -> PathBuf {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(entries.len(), 1, "expected one report in {}", dir.display());
    entries.pop().unwrap()
}

#[test]
fn assess_perfect_reading_text() {
    recital()
        .arg("assess")
        .arg("--reference")
        .arg("Hello, world!")
        .arg("--transcript")
        .arg("hello world")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 100"))
        .stdout(predicate::str::contains("exact"))
        .stdout(predicate::str::contains("Excellent pronunciation!"));
}

#[test]
fn assess_json_output() {
    let output = recital()
        .arg("assess")
        .arg("--reference")
        .arg("I want to buy two tickets")
        .arg("--transcript")
        .arg("i want too by to tickets")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["overallScore"], 100);
    assert_eq!(json["correctCount"], 6);
    assert_eq!(json["wordComparisons"][3]["word"], "buy");
    assert_eq!(json["wordComparisons"][3]["matchKind"], "similar");
    assert_eq!(json["strategy"], "greedy");
}

#[test]
fn assess_empty_transcript() {
    recital()
        .arg("assess")
        .arg("--reference")
        .arg("good morning")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0"))
        .stdout(predicate::str::contains("You missed 2 words."));
}

#[test]
fn assess_global_strategy() {
    let output = recital()
        .arg("assess")
        .arg("--reference")
        .arg("hello world")
        .arg("--transcript")
        .arg("world hello")
        .arg("--strategy")
        .arg("global")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategy"], "global");
    assert_eq!(json["overallScore"], 50);
}

#[test]
fn assess_invalid_strategy() {
    recital()
        .arg("assess")
        .arg("--reference")
        .arg("hello")
        .arg("--strategy")
        .arg("fuzzy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn assess_unknown_format() {
    recital()
        .arg("assess")
        .arg("--reference")
        .arg("hello")
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn assess_reads_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("recital.toml"),
        "[assessment]\nstrategy = \"global\"\n",
    )
    .unwrap();

    recital()
        .current_dir(dir.path())
        .arg("assess")
        .arg("--reference")
        .arg("hello world")
        .arg("--transcript")
        .arg("world hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 50"));
}

#[test]
fn assess_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[assessment]\ncorrect_threshold = 1.5\n").unwrap();

    recital()
        .arg("assess")
        .arg("--reference")
        .arg("hello")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("correct_threshold"));
}

#[test]
fn validate_greetings() {
    recital()
        .arg("validate")
        .arg("--drills")
        .arg("../../drill-sets/greetings.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 drills"))
        .stdout(predicate::str::contains("All drill sets valid"));
}

#[test]
fn validate_directory() {
    recital()
        .arg("validate")
        .arg("--drills")
        .arg("../../drill-sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Greetings"))
        .stdout(predicate::str::contains("Homophones"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.toml");
    std::fs::write(
        &path,
        r#"
[drill_set]
id = "dupes"
name = "Dupes"

[[drills]]
id = "a"
reference = "one"
transcript = "one"

[[drills]]
id = "a"
reference = "two"
transcript = ""
"#,
    )
    .unwrap();

    recital()
        .arg("validate")
        .arg("--drills")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate drill ID"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    recital()
        .arg("validate")
        .arg("--drills")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    recital()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recital.toml"))
        .stdout(predicate::str::contains("Created drills/example.toml"));

    assert!(dir.path().join("recital.toml").exists());
    assert!(dir.path().join("drills/example.toml").exists());

    // The generated files are usable as-is.
    recital()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--drills")
        .arg("drills/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All drill sets valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    recital().current_dir(dir.path()).arg("init").assert().success();

    // Second init should skip
    recital()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn batch_writes_report() {
    let dir = TempDir::new().unwrap();

    recital()
        .arg("batch")
        .arg("--drills")
        .arg("../../drill-sets/greetings.toml")
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("hello-world: overall 100"))
        .stderr(predicate::str::contains("Results saved to"));

    let report = only_report(dir.path());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["drill_set"]["id"], "greetings");
    assert_eq!(json["results"].as_array().unwrap().len(), 6);
    assert_eq!(json["stats"]["drill_count"], 6);
}

#[test]
fn batch_with_tag_filter() {
    let dir = TempDir::new().unwrap();

    recital()
        .arg("batch")
        .arg("--drills")
        .arg("../../drill-sets/greetings.toml")
        .arg("--filter")
        .arg("order, fillers")
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(only_report(dir.path())).unwrap()).unwrap();
    let ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["drill_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["nice-to-meet", "word-order"]);
}

#[test]
fn compare_greedy_against_global() {
    let greedy_dir = TempDir::new().unwrap();
    let global_dir = TempDir::new().unwrap();

    for (strategy, dir) in [("greedy", &greedy_dir), ("global", &global_dir)] {
        recital()
            .arg("batch")
            .arg("--drills")
            .arg("../../drill-sets/greetings.toml")
            .arg("--strategy")
            .arg(strategy)
            .arg("--output")
            .arg(dir.path())
            .assert()
            .success();
    }

    let baseline = only_report(greedy_dir.path());
    let current = only_report(global_dir.path());

    recital()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("Regressions:"))
        .stdout(predicate::str::contains("word-order 100 -> 50"));

    recital()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("| word-order | 100 | 50 | -50 |"));

    recital()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-regression")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    recital()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn help_output() {
    recital()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pronunciation assessment engine"));
}

#[test]
fn version_output() {
    recital()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recital"));
}
