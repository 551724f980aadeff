pub mod config;
pub mod stats;

pub use config::{ConfigError, ScorerConfig};
pub use stats::{Candidates, Diff, ScoreSequence, ScoreStats};
