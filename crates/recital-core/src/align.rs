//! Word alignment between reference and transcript tokens.
//!
//! Two strategies share one trait:
//!
//! - [`GreedyAligner`] walks the reference left to right and, for each
//!   word, picks the best unconsumed transcript token inside a small window
//!   around the same index. A consumed token is never reassigned.
//! - [`GlobalAligner`] solves an order-preserving alignment over the whole
//!   token matrix, maximizing the summed similarity of matched pairs. It is
//!   slower and exists mainly to compare against the greedy results.

use crate::config::AssessmentConfig;
use crate::model::{AlignmentStrategy, MatchKind, Token, WordComparison};
use crate::similarity::similarity;

/// Output of an aligner.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// One record per reference token, in order.
    pub comparisons: Vec<WordComparison>,
    /// Transcript index matched by each reference token, if any.
    pub matched: Vec<Option<usize>>,
    /// Whether each transcript token was consumed by a match.
    pub consumed: Vec<bool>,
}

impl Alignment {
    fn new(reference_len: usize, transcript_len: usize) -> Self {
        Self {
            comparisons: Vec::with_capacity(reference_len),
            matched: Vec::with_capacity(reference_len),
            consumed: vec![false; transcript_len],
        }
    }

    fn push(&mut self, word: &Token, verdict: Option<(usize, Verdict)>) {
        let comparison = match verdict {
            Some((j, verdict)) => {
                self.consumed[j] = true;
                self.matched.push(Some(j));
                WordComparison {
                    word: word.text().to_string(),
                    is_correct: verdict.is_correct,
                    match_kind: verdict.kind,
                }
            }
            None => {
                self.matched.push(None);
                WordComparison {
                    word: word.text().to_string(),
                    is_correct: false,
                    match_kind: MatchKind::Missing,
                }
            }
        };
        self.comparisons.push(comparison);
    }

    /// Number of transcript tokens consumed by a match.
    pub fn consumed_count(&self) -> usize {
        self.consumed.iter().filter(|&&c| c).count()
    }

    /// Number of transcript tokens left over.
    pub fn extra_count(&self) -> usize {
        self.consumed.len() - self.consumed_count()
    }

    /// Unconsumed transcript tokens, tagged [`MatchKind::Extra`].
    pub fn extra_words(&self, transcribed: &[Token]) -> Vec<WordComparison> {
        transcribed
            .iter()
            .zip(&self.consumed)
            .filter(|(_, &consumed)| !consumed)
            .map(|(token, _)| WordComparison {
                word: token.text().to_string(),
                is_correct: false,
                match_kind: MatchKind::Extra,
            })
            .collect()
    }
}

/// Strategy for pairing reference words with transcript words.
pub trait WordAligner: Send + Sync {
    fn strategy(&self) -> AlignmentStrategy;

    /// Align `reference` against `transcribed`, consuming each transcript
    /// token at most once.
    fn align(&self, reference: &[Token], transcribed: &[Token]) -> Alignment;
}

/// Build the aligner selected by `config.strategy`.
pub fn aligner_for(config: &AssessmentConfig) -> Box<dyn WordAligner> {
    match config.strategy {
        AlignmentStrategy::Greedy => Box::new(GreedyAligner::new(config.clone())),
        AlignmentStrategy::Global => Box::new(GlobalAligner::new(config.clone())),
    }
}

#[derive(Debug, Clone, Copy)]
struct Verdict {
    is_correct: bool,
    kind: MatchKind,
}

/// Thresholds applied to a candidate pair. `adjusted` decides whether the
/// pair matches at all; `raw` decides whether a correct match is exact.
fn classify(config: &AssessmentConfig, raw: f64, adjusted: f64) -> Option<Verdict> {
    if adjusted >= config.correct_threshold {
        let kind = if raw >= config.exact_threshold {
            MatchKind::Exact
        } else {
            MatchKind::Similar
        };
        Some(Verdict {
            is_correct: true,
            kind,
        })
    } else if adjusted >= config.similar_threshold {
        Some(Verdict {
            is_correct: false,
            kind: MatchKind::Similar,
        })
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    raw: f64,
    adjusted: f64,
}

/// Windowed greedy aligner.
#[derive(Debug, Clone, Default)]
pub struct GreedyAligner {
    config: AssessmentConfig,
}

impl GreedyAligner {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    /// Transcript indices searched for reference index `i`.
    fn window(&self, i: usize, transcript_len: usize) -> std::ops::Range<usize> {
        let start = i.saturating_sub(self.config.window_before);
        let end = (i + self.config.window_after + 1).min(transcript_len);
        start..end
    }

    fn best_candidate(
        &self,
        i: usize,
        word: &Token,
        transcribed: &[Token],
        consumed: &[bool],
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for j in self.window(i, transcribed.len()) {
            if consumed[j] {
                continue;
            }
            let raw = similarity(word.text(), transcribed[j].text());
            let adjusted = if i.abs_diff(j) <= self.config.position_bonus_distance {
                (raw + self.config.position_bonus).min(1.0)
            } else {
                raw
            };
            // strict comparison keeps the lowest index on ties
            if best.map_or(true, |b| adjusted > b.adjusted) {
                best = Some(Candidate {
                    index: j,
                    raw,
                    adjusted,
                });
            }
        }
        best
    }
}

impl WordAligner for GreedyAligner {
    fn strategy(&self) -> AlignmentStrategy {
        AlignmentStrategy::Greedy
    }

    fn align(&self, reference: &[Token], transcribed: &[Token]) -> Alignment {
        let mut alignment = Alignment::new(reference.len(), transcribed.len());

        for (i, word) in reference.iter().enumerate() {
            let verdict = self
                .best_candidate(i, word, transcribed, &alignment.consumed)
                .and_then(|c| classify(&self.config, c.raw, c.adjusted).map(|v| (c.index, v)));
            alignment.push(word, verdict);
        }

        alignment
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Pair,
    SkipReference,
    SkipTranscript,
}

/// Order-preserving dynamic-programming aligner.
#[derive(Debug, Clone, Default)]
pub struct GlobalAligner {
    config: AssessmentConfig,
}

impl GlobalAligner {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }
}

impl WordAligner for GlobalAligner {
    fn strategy(&self) -> AlignmentStrategy {
        AlignmentStrategy::Global
    }

    fn align(&self, reference: &[Token], transcribed: &[Token]) -> Alignment {
        let (n, t) = (reference.len(), transcribed.len());

        let sim: Vec<Vec<f64>> = reference
            .iter()
            .map(|r| {
                transcribed
                    .iter()
                    .map(|h| similarity(r.text(), h.text()))
                    .collect()
            })
            .collect();

        // score[i][j]: best total over reference[..i] and transcribed[..j]
        let mut score = vec![vec![0.0f64; t + 1]; n + 1];
        let mut step = vec![vec![Step::SkipReference; t + 1]; n + 1];
        for j in 1..=t {
            step[0][j] = Step::SkipTranscript;
        }

        for i in 1..=n {
            for j in 1..=t {
                let s = sim[i - 1][j - 1];
                let mut best = (score[i - 1][j], Step::SkipReference);
                if score[i][j - 1] > best.0 {
                    best = (score[i][j - 1], Step::SkipTranscript);
                }
                if s >= self.config.similar_threshold && score[i - 1][j - 1] + s >= best.0 {
                    best = (score[i - 1][j - 1] + s, Step::Pair);
                }
                score[i][j] = best.0;
                step[i][j] = best.1;
            }
        }

        let mut pairs: Vec<Option<usize>> = vec![None; n];
        let (mut i, mut j) = (n, t);
        while i > 0 && j > 0 {
            match step[i][j] {
                Step::Pair => {
                    pairs[i - 1] = Some(j - 1);
                    i -= 1;
                    j -= 1;
                }
                Step::SkipReference => i -= 1,
                Step::SkipTranscript => j -= 1,
            }
        }

        let mut alignment = Alignment::new(n, t);
        for (i, (word, pair)) in reference.iter().zip(pairs).enumerate() {
            let verdict = pair.and_then(|j| {
                let raw = sim[i][j];
                classify(&self.config, raw, raw).map(|v| (j, v))
            });
            alignment.push(word, verdict);
        }
        alignment
    }
}
