//! Text normalisation shared by every metric: external filter, factor
//! selection and vocabulary encoding.

pub mod factors;
pub mod filter;
pub mod vocabulary;

use thiserror::Error;

pub use factors::{FactorSelection, DEFAULT_FACTOR_DELIMITER};
pub use filter::PreProcessFilter;
pub use vocabulary::Vocabulary;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Invalid factor specification: '{0}'")]
    InvalidFactorSpec(String),
    #[error("Factor index {factor} out of range for token '{token}'")]
    FactorOutOfRange { factor: usize, token: String },
    #[error("Vocabulary is full after {size} ids")]
    VocabularyFull { size: usize },
    #[error("Filter IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Filter command '{command}' failed with status {status:?}")]
    Filter { command: String, status: Option<i32> },
}
