pub mod base;
pub mod factory;
pub mod per;
pub mod references;
pub mod regularisation;
pub mod statistics;
pub mod wer;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::data::ScoreData;
use crate::preprocess::PreprocessError;
use crate::types::{Candidates, ConfigError, Diff, ScoreSequence, ScoreStats};

pub use base::ScorerBase;
pub use factory::{create_scorer, ScorerKind};
pub use per::PerScorer;
pub use references::ReferenceSet;
pub use regularisation::RegularisationStrategy;
pub use statistics::score_trajectory;
pub use wer::WerScorer;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("Score data not loaded")]
    ScoreDataNotSet,
    #[error("Invalid sentence index: '{0}'")]
    InvalidSentenceIndex(String),
    #[error("Sentence {sentence} out of range ({len} sentences)")]
    SentenceOutOfRange { sentence: usize, len: usize },
    #[error("Candidate {candidate} out of range for sentence {sentence} ({len} candidates)")]
    CandidateOutOfRange {
        sentence: usize,
        candidate: usize,
        len: usize,
    },
    #[error("Expected one candidate per sentence ({expected}), got {found}")]
    CandidateCountMismatch { expected: usize, found: usize },
    #[error("Statistics record has {found} values, expected {expected}")]
    StatsWidthMismatch { expected: usize, found: usize },
    #[error("Factors and filter must be set before any sentence is preprocessed")]
    AlreadyPreprocessing,
    #[error("Reference files must be set before preparing statistics")]
    ReferencesNotLoaded,
    #[error("No reference files given")]
    NoReferenceFiles,
    #[error("Reference file {path} has {found} lines, expected {expected}")]
    ReferenceLengthMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("Unknown scorer: {0}")]
    UnknownScorer(String),
    #[error("Scoring produced no scores")]
    EmptyScoreSequence,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parse a textual sentence index. Surrounding whitespace is ignored;
/// anything else that is not a non-negative integer is rejected.
pub fn parse_sentence_index(raw: &str) -> Result<usize, ScorerError> {
    raw.trim()
        .parse()
        .map_err(|_| ScorerError::InvalidSentenceIndex(raw.to_string()))
}

/// A translation quality metric over sufficient statistics.
///
/// Implementors supply the statistics extraction (`prepare_stats`) and the
/// corpus-level aggregation (`score_diffs`). Configuration, vocabulary,
/// factor selection, the filter and the attached store live in the shared
/// [`ScorerBase`].
pub trait Scorer: Send {
    fn base(&self) -> &ScorerBase;

    fn base_mut(&mut self) -> &mut ScorerBase;

    /// Width of every statistics record this metric produces.
    fn number_of_scores(&self) -> usize;

    /// Register reference translations. Must precede `prepare_stats`.
    fn set_reference_files(&mut self, _files: &[PathBuf]) -> Result<(), ScorerError> {
        Ok(())
    }

    /// Preprocess `text`, a hypothesis for sentence `sentence`, and write its
    /// statistics into `entry`.
    fn prepare_stats(
        &mut self,
        sentence: usize,
        text: &str,
        entry: &mut ScoreStats,
    ) -> Result<(), ScorerError>;

    fn prepare_stats_str(
        &mut self,
        sentence: &str,
        text: &str,
        entry: &mut ScoreStats,
    ) -> Result<(), ScorerError> {
        let sentence = parse_sentence_index(sentence)?;
        self.prepare_stats(sentence, text, entry)
    }

    /// Score `candidates`, then apply each diff in turn and score again.
    ///
    /// Returns `1 + diffs.len()` scores in trajectory order.
    fn score_diffs(&self, candidates: &Candidates, diffs: &[Diff]) -> Result<ScoreSequence, ScorerError>;

    /// Score one full selection of 1-best candidates.
    fn score(&self, candidates: &Candidates) -> Result<f32, ScorerError> {
        self.score_diffs(candidates, &[])?
            .first()
            .copied()
            .ok_or(ScorerError::EmptyScoreSequence)
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    /// An empty store sized for this metric's records.
    fn empty_score_data(&self) -> ScoreData {
        ScoreData::new(self.name(), self.number_of_scores())
    }

    fn reference_size(&self) -> usize {
        self.base().reference_size()
    }

    fn set_score_data(&mut self, data: Arc<ScoreData>) {
        self.base_mut().set_score_data(data);
    }

    fn set_factors(&mut self, spec: &str) -> Result<(), ScorerError> {
        self.base_mut().set_factors(spec)
    }

    fn set_filter(&mut self, command: &str) -> Result<(), ScorerError> {
        self.base_mut().set_filter(command)
    }

    fn config_value<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.base().config_value(key, default)
    }
}
