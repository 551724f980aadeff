use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::scorer::per::PerScorer;
use crate::scorer::wer::WerScorer;
use crate::scorer::{Scorer, ScorerError};

/// Metrics that can be built by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScorerKind {
    Per,
    Wer,
}

impl ScorerKind {
    pub fn all() -> &'static [ScorerKind] {
        &[ScorerKind::Per, ScorerKind::Wer]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScorerKind::Per => PerScorer::NAME,
            ScorerKind::Wer => WerScorer::NAME,
        }
    }

    pub fn build(&self, config: &str) -> Result<Box<dyn Scorer>, ScorerError> {
        let scorer: Box<dyn Scorer> = match self {
            ScorerKind::Per => Box::new(PerScorer::new(config)?),
            ScorerKind::Wer => Box::new(WerScorer::new(config)?),
        };
        debug!(scorer = self.name(), config, "created scorer");
        Ok(scorer)
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScorerKind {
    type Err = ScorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScorerKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScorerError::UnknownScorer(s.to_string()))
    }
}

/// Build the metric registered under `name` (case-insensitive).
pub fn create_scorer(name: &str, config: &str) -> Result<Box<dyn Scorer>, ScorerError> {
    name.parse::<ScorerKind>()?.build(config)
}
