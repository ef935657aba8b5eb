//! TOML drill set parser.
//!
//! Loads drill sets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::drill::{Drill, DrillSet};

/// Intermediate TOML structure for parsing drill set files.
#[derive(Debug, Deserialize)]
struct TomlDrillFile {
    drill_set: TomlDrillSetHeader,
    #[serde(default)]
    drills: Vec<TomlDrill>,
}

#[derive(Debug, Deserialize)]
struct TomlDrillSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_min_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TomlDrill {
    id: String,
    #[serde(default)]
    description: String,
    reference: String,
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    min_score: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into a `DrillSet`.
pub fn parse_drill_set(path: &Path) -> Result<DrillSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read drill set file: {}", path.display()))?;

    parse_drill_set_str(&content, path)
}

/// Parse a TOML string into a `DrillSet` (useful for testing).
pub fn parse_drill_set_str(content: &str, source_path: &Path) -> Result<DrillSet> {
    let parsed: TomlDrillFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let drills = parsed
        .drills
        .into_iter()
        .map(|d| Drill {
            id: d.id,
            description: d.description,
            reference: d.reference,
            transcript: d.transcript,
            min_score: d.min_score,
            tags: d.tags,
        })
        .collect();

    Ok(DrillSet {
        id: parsed.drill_set.id,
        name: parsed.drill_set.name,
        description: parsed.drill_set.description,
        default_min_score: parsed.drill_set.default_min_score,
        drills,
    })
}

/// Recursively load all `.toml` drill set files from a directory.
pub fn load_drill_directory(dir: &Path) -> Result<Vec<DrillSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_drill_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_drill_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file or every drill set under a directory.
pub fn load_drills(path: &Path) -> Result<Vec<DrillSet>> {
    if path.is_dir() {
        load_drill_directory(path)
    } else {
        Ok(vec![parse_drill_set(path)?])
    }
}

/// A warning from drill set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The drill ID (if applicable).
    pub drill_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a drill set for common issues.
pub fn validate_drill_set(set: &DrillSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.drills.is_empty() {
        warnings.push(ValidationWarning {
            drill_id: None,
            message: "drill set has no drills".into(),
        });
    }

    if set.default_min_score.is_some_and(|s| s > 100) {
        warnings.push(ValidationWarning {
            drill_id: None,
            message: "default_min_score is above 100 and can never be met".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for drill in &set.drills {
        if !seen_ids.insert(&drill.id) {
            warnings.push(ValidationWarning {
                drill_id: Some(drill.id.clone()),
                message: format!("duplicate drill ID: {}", drill.id),
            });
        }
    }

    for drill in &set.drills {
        if drill.reference.trim().is_empty() {
            warnings.push(ValidationWarning {
                drill_id: Some(drill.id.clone()),
                message: "reference is empty; every score will be 0".into(),
            });
        }
        if drill.transcript.trim().is_empty() {
            warnings.push(ValidationWarning {
                drill_id: Some(drill.id.clone()),
                message: "transcript is empty; every word will be missing".into(),
            });
        }
        if drill.min_score.is_some_and(|s| s > 100) {
            warnings.push(ValidationWarning {
                drill_id: Some(drill.id.clone()),
                message: "min_score is above 100 and can never be met".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[drill_set]
id = "greetings"
name = "Greetings"
description = "Everyday greetings"
default_min_score = 70

[[drills]]
id = "hello"
reference = "Hello, how are you?"
transcript = "hello how are you"
tags = ["basics"]

[[drills]]
id = "morning"
description = "Morning greeting with a homophone"
reference = "Good morning to you"
transcript = "good morning two you"
min_score = 90
"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_drill_set_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.id, "greetings");
        assert_eq!(set.name, "Greetings");
        assert_eq!(set.default_min_score, Some(70));
        assert_eq!(set.drills.len(), 2);
        assert_eq!(set.drills[0].tags, vec!["basics"]);
        assert_eq!(set.drills[1].min_score, Some(90));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[drill_set]
id = "minimal"
name = "Minimal"

[[drills]]
id = "one"
reference = "one"
"#;
        let set = parse_drill_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.default_min_score, None);
        assert_eq!(set.drills[0].transcript, "");
        assert!(set.drills[0].tags.is_empty());
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[drill_set]
id = "dupes"
name = "Dupes"

[[drills]]
id = "same"
reference = "a"
transcript = "a"

[[drills]]
id = "same"
reference = "b"
transcript = "b"
"#;
        let set = parse_drill_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_drill_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_empty_sides_and_bad_scores() {
        let toml = r#"
[drill_set]
id = "odd"
name = "Odd"

[[drills]]
id = "blank"
reference = "  "
transcript = ""
min_score = 150
"#;
        let set = parse_drill_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_drill_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("reference is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("transcript is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("above 100")));
    }

    #[test]
    fn valid_set_has_no_warnings() {
        let set = parse_drill_set_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_drill_set(&set).is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_drill_set_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sets = load_drill_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "greetings");
    }

    #[test]
    fn load_drills_accepts_file_or_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("set.toml");
        std::fs::write(&file, VALID_TOML).unwrap();

        assert_eq!(load_drills(&file).unwrap().len(), 1);
        assert_eq!(load_drills(dir.path()).unwrap().len(), 1);
        assert!(load_drills(&dir.path().join("missing.toml")).is_err());
    }
}
