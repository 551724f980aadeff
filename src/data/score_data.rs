use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ScoreStats;

#[derive(Debug, Error)]
pub enum ScoreDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Statistics record has {found} values, expected {expected}")]
    WidthMismatch { expected: usize, found: usize },
    #[error("Sentence {sentence} added out of order: store holds {len} sentences")]
    NonContiguousSentence { sentence: usize, len: usize },
    #[error("Unsupported score data format version: {0}")]
    UnsupportedFormat(u32),
    #[error("Checksum mismatch: header says {expected}, content hashes to {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("Header declares {declared} sentences, found {found}")]
    SentenceCountMismatch { declared: usize, found: usize },
}

/// All statistics records gathered for one sentence, indexed by candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreArray {
    index: usize,
    stats: Vec<ScoreStats>,
}

impl ScoreArray {
    pub fn new(index: usize) -> Self {
        Self { index, stats: Vec::new() }
    }

    /// Sentence index this array belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, candidate: usize) -> Option<&ScoreStats> {
        self.stats.get(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreStats> {
        self.stats.iter()
    }

    fn push(&mut self, stats: ScoreStats) {
        self.stats.push(stats);
    }
}

/// Corpus statistics store.
///
/// Populated sentence by sentence while preparing statistics, then shared
/// read-only with a scorer through an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    scorer: String,
    number_of_scores: usize,
    arrays: Vec<ScoreArray>,
}

impl ScoreData {
    pub fn new(scorer: impl Into<String>, number_of_scores: usize) -> Self {
        Self {
            scorer: scorer.into(),
            number_of_scores,
            arrays: Vec::new(),
        }
    }

    pub(crate) fn from_parts(scorer: String, number_of_scores: usize, arrays: Vec<ScoreArray>) -> Self {
        Self {
            scorer,
            number_of_scores,
            arrays,
        }
    }

    /// Name of the scorer that produced these statistics.
    pub fn scorer(&self) -> &str {
        &self.scorer
    }

    pub fn number_of_scores(&self) -> usize {
        self.number_of_scores
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn arrays(&self) -> &[ScoreArray] {
        &self.arrays
    }

    pub fn get(&self, sentence: usize) -> Option<&ScoreArray> {
        self.arrays.get(sentence)
    }

    pub fn stats(&self, sentence: usize, candidate: usize) -> Option<&ScoreStats> {
        self.arrays.get(sentence).and_then(|array| array.get(candidate))
    }

    /// Append a candidate record for `sentence`.
    ///
    /// A new sentence may only be opened directly after the last one.
    /// Returns the candidate index assigned to the record.
    pub fn add(&mut self, sentence: usize, stats: ScoreStats) -> Result<usize, ScoreDataError> {
        if stats.len() != self.number_of_scores {
            return Err(ScoreDataError::WidthMismatch {
                expected: self.number_of_scores,
                found: stats.len(),
            });
        }

        let len = self.arrays.len();
        if sentence > len {
            return Err(ScoreDataError::NonContiguousSentence { sentence, len });
        }
        if sentence == len {
            self.arrays.push(ScoreArray::new(sentence));
        }

        let array = &mut self.arrays[sentence];
        array.push(stats);
        Ok(array.len() - 1)
    }

    pub(crate) fn validate(&self) -> Result<(), ScoreDataError> {
        for (position, array) in self.arrays.iter().enumerate() {
            if array.index != position {
                return Err(ScoreDataError::NonContiguousSentence {
                    sentence: array.index,
                    len: position,
                });
            }
            for stats in array.iter() {
                if stats.len() != self.number_of_scores {
                    return Err(ScoreDataError::WidthMismatch {
                        expected: self.number_of_scores,
                        found: stats.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
