//! Assessment settings and config file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::AlignmentStrategy;

/// Adjusted score at or above which a reference word counts as correct.
pub const CORRECT_THRESHOLD: f64 = 0.7;
/// Adjusted score at or above which a word is matched but marked incorrect.
pub const SIMILAR_THRESHOLD: f64 = 0.5;
/// Raw similarity at or above which a correct match is labelled exact.
pub const EXACT_THRESHOLD: f64 = 0.95;
/// Transcript positions searched before the reference index.
pub const WINDOW_BEFORE: usize = 3;
/// Transcript positions searched after the reference index.
pub const WINDOW_AFTER: usize = 3;
/// Added to candidates within [`POSITION_BONUS_DISTANCE`] of the reference index.
pub const POSITION_BONUS: f64 = 0.05;
pub const POSITION_BONUS_DISTANCE: usize = 1;
pub const ACCURACY_WEIGHT: f64 = 0.6;
pub const COMPLETENESS_WEIGHT: f64 = 0.4;
/// Extra words above this share of the reference length earn a feedback note.
pub const EXTRA_WORD_RATIO: f64 = 0.2;

const STRATEGY_ENV: &str = "RECITAL_STRATEGY";

/// Thresholds and weights used by the assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub strategy: AlignmentStrategy,
    pub correct_threshold: f64,
    pub similar_threshold: f64,
    pub exact_threshold: f64,
    pub window_before: usize,
    pub window_after: usize,
    pub position_bonus: f64,
    pub position_bonus_distance: usize,
    pub accuracy_weight: f64,
    pub completeness_weight: f64,
    pub extra_word_ratio: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            strategy: AlignmentStrategy::Greedy,
            correct_threshold: CORRECT_THRESHOLD,
            similar_threshold: SIMILAR_THRESHOLD,
            exact_threshold: EXACT_THRESHOLD,
            window_before: WINDOW_BEFORE,
            window_after: WINDOW_AFTER,
            position_bonus: POSITION_BONUS,
            position_bonus_distance: POSITION_BONUS_DISTANCE,
            accuracy_weight: ACCURACY_WEIGHT,
            completeness_weight: COMPLETENESS_WEIGHT,
            extra_word_ratio: EXTRA_WORD_RATIO,
        }
    }
}

impl AssessmentConfig {
    /// Same defaults with a different alignment strategy.
    pub fn with_strategy(strategy: AlignmentStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Check that thresholds and weights describe a usable scoring scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("correct_threshold", self.correct_threshold),
            ("similar_threshold", self.similar_threshold),
            ("exact_threshold", self.exact_threshold),
            ("position_bonus", self.position_bonus),
            ("accuracy_weight", self.accuracy_weight),
            ("completeness_weight", self.completeness_weight),
            ("extra_word_ratio", self.extra_word_ratio),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::out_of_range(name, value));
            }
        }

        if self.similar_threshold > self.correct_threshold {
            return Err(ConfigError::ThresholdOrder {
                similar: self.similar_threshold,
                correct: self.correct_threshold,
            });
        }

        let weight_sum = self.accuracy_weight + self.completeness_weight;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::WeightSum(weight_sum));
        }

        Ok(())
    }
}

/// Top-level recital configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitalConfig {
    #[serde(default)]
    pub assessment: AssessmentConfig,
    /// Where batch reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./recital-results")
}

impl Default for RecitalConfig {
    fn default() -> Self {
        Self {
            assessment: AssessmentConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `recital.toml` in the current directory
/// 2. `~/.config/recital/config.toml`
///
/// `RECITAL_STRATEGY` overrides the alignment strategy.
pub fn load_config_from(path: Option<&Path>) -> Result<RecitalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("recital.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RecitalConfig::default(),
    };

    if let Ok(value) = std::env::var(STRATEGY_ENV) {
        config.assessment.strategy = value
            .parse::<AlignmentStrategy>()
            .map_err(|message| ConfigError::InvalidOverride {
                var: STRATEGY_ENV,
                message,
            })?;
    }

    config.assessment.validate()?;
    Ok(config)
}

/// Parse a config file body and resolve `${VAR}` references in paths.
pub fn parse_config_str(content: &str) -> Result<RecitalConfig> {
    let mut config: RecitalConfig = toml::from_str(content)?;
    let output_dir = config.output_dir.to_string_lossy().into_owned();
    config.output_dir = PathBuf::from(resolve_env_vars(&output_dir));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("recital"))
}
