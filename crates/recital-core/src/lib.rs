//! recital-core — pronunciation assessment engine.
//!
//! Compares what a learner was asked to say with what a speech recognizer
//! heard, classifies every reference word, and folds the result into scores
//! and feedback. Batch tooling for drill sets lives alongside the engine.

pub mod align;
pub mod batch;
pub mod config;
pub mod drill;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod phonetic;
pub mod report;
pub mod score;
pub mod similarity;
pub mod statistics;

pub use engine::{assess, Assessor};
pub use model::{AlignmentStrategy, Assessment, MatchKind, Token, WordComparison};
