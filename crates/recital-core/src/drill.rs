//! Drill sets: reference/transcript pairs assessed together.

use serde::{Deserialize, Serialize};

/// One reference sentence and the transcript to score against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    /// Unique identifier within the set.
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// What the learner was asked to say.
    pub reference: String,
    /// What the recognizer heard.
    pub transcript: String,
    /// Overall score needed to pass, overriding the set default.
    #[serde(default)]
    pub min_score: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named collection of drills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Pass mark for drills that don't set their own.
    #[serde(default)]
    pub default_min_score: Option<u32>,
    #[serde(default)]
    pub drills: Vec<Drill>,
}

impl DrillSet {
    /// Effective pass mark for a drill, if any.
    pub fn pass_mark(&self, drill: &Drill) -> Option<u32> {
        drill.min_score.or(self.default_min_score)
    }

    /// Keep only drills carrying at least one of `tags`.
    pub fn filter_by_tags(&mut self, tags: &[String]) {
        if tags.is_empty() {
            return;
        }
        self.drills.retain(|d| d.tags.iter().any(|t| tags.contains(t)));
    }
}
