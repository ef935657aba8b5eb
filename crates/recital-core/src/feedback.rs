//! Learner-facing feedback messages.

use serde::{Deserialize, Serialize};

use crate::score::MatchCounts;

/// Qualitative band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
    KeepTrying,
}

impl FeedbackTier {
    pub fn from_score(overall: u32) -> Self {
        match overall {
            90.. => FeedbackTier::Excellent,
            75..=89 => FeedbackTier::Good,
            60..=74 => FeedbackTier::Fair,
            40..=59 => FeedbackTier::NeedsPractice,
            _ => FeedbackTier::KeepTrying,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "Excellent pronunciation! You spoke clearly and accurately.",
            FeedbackTier::Good => "Good job! Your pronunciation is mostly accurate.",
            FeedbackTier::Fair => "Fair attempt. Keep practicing to improve your accuracy.",
            FeedbackTier::NeedsPractice => {
                "This needs more practice. Try speaking more slowly and clearly."
            }
            FeedbackTier::KeepTrying => {
                "Keep trying! Listen to the sentence again and practice it word by word."
            }
        }
    }
}

fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Build the feedback message. Extra words are mentioned once they exceed
/// `extra_ratio` of the reference length.
pub fn generate_feedback(
    overall: u32,
    counts: &MatchCounts,
    total: usize,
    extra_ratio: f64,
) -> String {
    let mut message = FeedbackTier::from_score(overall).message().to_string();

    if counts.missing > 0 {
        message.push_str(&format!(
            " You missed {}.",
            plural(counts.missing, "word", "words")
        ));
    }

    if counts.extra as f64 > extra_ratio * total as f64 {
        message.push_str(" You added some words that are not in the sentence.");
    }

    if counts.incorrect > 0 {
        message.push_str(&format!(
            " {} close but not quite right.",
            plural(counts.incorrect, "word was", "words were")
        ));
    }

    message
}
