use serde::{Deserialize, Serialize};

/// One hypothesis index per sentence, in sentence order.
pub type Candidates = [usize];

/// Baseline score followed by one score per applied diff.
pub type ScoreSequence = Vec<f32>;

/// Sufficient statistics for one (sentence, candidate) pair.
///
/// The width is fixed by the scorer that produced it, see
/// [`Scorer::number_of_scores`](crate::scorer::Scorer::number_of_scores).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreStats(Vec<f32>);

impl ScoreStats {
    /// A zeroed record of the given width.
    pub fn zeros(width: usize) -> Self {
        ScoreStats(vec![0.0; width])
    }

    pub fn from_values(values: Vec<f32>) -> Self {
        ScoreStats(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Replace the contents, keeping the allocation.
    pub fn set(&mut self, values: &[f32]) {
        self.0.clear();
        self.0.extend_from_slice(values);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<f32>> for ScoreStats {
    fn from(values: Vec<f32>) -> Self {
        ScoreStats(values)
    }
}

/// Swap the chosen candidate of a single sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diff {
    pub sentence: usize,
    pub candidate: usize,
}

impl Diff {
    pub fn new(sentence: usize, candidate: usize) -> Self {
        Self { sentence, candidate }
    }
}
