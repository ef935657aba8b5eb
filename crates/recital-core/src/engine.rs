//! The assessment pipeline.
//!
//! Normalizes both strings, aligns the tokens, aggregates scores and
//! attaches feedback. The assessor holds only its configuration, so one
//! instance can be shared freely across threads.

use crate::align::{aligner_for, WordAligner};
use crate::config::AssessmentConfig;
use crate::error::ConfigError;
use crate::feedback::generate_feedback;
use crate::model::{Assessment, Token};
use crate::normalize::{normalize_reference, normalize_transcript};
use crate::score::{compute_scores, MatchCounts};

/// Assesses transcripts against reference sentences.
pub struct Assessor {
    config: AssessmentConfig,
    aligner: Box<dyn WordAligner>,
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(AssessmentConfig::default())
    }
}

impl std::fmt::Debug for Assessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assessor")
            .field("config", &self.config)
            .finish()
    }
}

impl Assessor {
    /// Build an assessor without checking the config. Use [`Assessor::try_new`]
    /// for settings that did not come through `load_config_from`.
    pub fn new(config: AssessmentConfig) -> Self {
        let aligner = aligner_for(&config);
        Self { config, aligner }
    }

    /// Build an assessor after [`AssessmentConfig::validate`] accepts the config.
    pub fn try_new(config: AssessmentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Assess raw reference and transcript strings.
    pub fn assess(&self, reference_text: &str, transcribed_text: &str) -> Assessment {
        let reference = normalize_reference(reference_text);
        let transcribed = normalize_transcript(transcribed_text, &reference);
        self.assess_tokens(&reference, &transcribed)
    }

    /// Assess tokens that were segmented upstream.
    ///
    /// Use this for scripts without spaces between words; the tokens are
    /// taken as-is and no filler filtering is applied.
    pub fn assess_tokens(&self, reference: &[Token], transcribed: &[Token]) -> Assessment {
        let alignment = self.aligner.align(reference, transcribed);
        let counts = MatchCounts::from_alignment(&alignment);
        let total = reference.len();
        let scores = compute_scores(&counts, total, &self.config);
        let feedback = generate_feedback(
            scores.overall,
            &counts,
            total,
            self.config.extra_word_ratio,
        );

        tracing::debug!(
            strategy = %self.aligner.strategy(),
            total,
            correct = counts.correct,
            incorrect = counts.incorrect,
            missing = counts.missing,
            extra = counts.extra,
            overall = scores.overall,
            "assessed transcript"
        );

        Assessment {
            overall_score: scores.overall,
            accuracy_score: scores.accuracy,
            completeness_score: scores.completeness,
            reference_words: reference.iter().map(|t| t.text().to_string()).collect(),
            transcribed_words: transcribed.iter().map(|t| t.text().to_string()).collect(),
            extra_words: alignment.extra_words(transcribed),
            word_comparisons: alignment.comparisons,
            correct_count: counts.correct,
            incorrect_count: counts.incorrect,
            missing_count: counts.missing,
            extra_count: counts.extra,
            feedback,
            strategy: self.aligner.strategy(),
        }
    }
}

/// Assess with the default configuration.
pub fn assess(reference_text: &str, transcribed_text: &str) -> Assessment {
    Assessor::default().assess(reference_text, transcribed_text)
}
