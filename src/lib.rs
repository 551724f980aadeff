//! Sufficient-statistics scoring core for minimum error rate training.
//!
//! `mert-core` turns every candidate of an n-best list into a fixed-width
//! record of sufficient statistics, stores the records per sentence, and
//! rescores the corpus incrementally while a line search swaps the chosen
//! candidate of one sentence at a time. Each swap costs one record
//! subtraction and one addition instead of a full corpus pass.

pub mod data;
pub mod preprocess;
pub mod scorer;
pub mod types;

pub use data::{ScoreArray, ScoreData, ScoreDataError};
pub use scorer::{create_scorer, Scorer, ScorerBase, ScorerError, ScorerKind};
pub use types::{Candidates, Diff, ScoreSequence, ScoreStats, ScorerConfig};
