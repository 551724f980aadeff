use std::fmt;
use std::str::FromStr;

use crate::types::ScoreSequence;

/// How neighbouring scores of a trajectory are combined into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegularisationStrategy {
    /// Every score stands on its own.
    #[default]
    None,
    Average,
    Minimum,
}

impl RegularisationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegularisationStrategy::None => "none",
            RegularisationStrategy::Average => "average",
            RegularisationStrategy::Minimum => "min",
        }
    }
}

impl fmt::Display for RegularisationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegularisationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(RegularisationStrategy::None),
            "average" | "avg" => Ok(RegularisationStrategy::Average),
            "min" | "minimum" => Ok(RegularisationStrategy::Minimum),
            other => Err(other.to_string()),
        }
    }
}

/// Smallest score in `scores[start..end]`.
///
/// An empty, inverted or out-of-range window yields `f32::MAX`, which callers
/// treat as "unset".
pub(crate) fn score_min(scores: &[f32], start: usize, end: usize) -> f32 {
    let mut min = f32::MAX;
    for &score in scores.get(start..end).unwrap_or(&[]) {
        if score < min {
            min = score;
        }
    }
    min
}

/// Mean of `scores[start..end]`, `0.0` for an empty, inverted or
/// out-of-range window.
pub(crate) fn score_average(scores: &[f32], start: usize, end: usize) -> f32 {
    let window = scores.get(start..end).unwrap_or(&[]);
    if window.is_empty() {
        return 0.0;
    }
    let total: f32 = window.iter().sum();
    total / window.len() as f32
}

/// Replace every score by the reduction over its `window` neighbours on
/// either side, clamped to the sequence.
pub(crate) fn regularise(
    scores: &[f32],
    strategy: RegularisationStrategy,
    window: usize,
) -> ScoreSequence {
    let reduce: fn(&[f32], usize, usize) -> f32 = match strategy {
        RegularisationStrategy::None => return scores.to_vec(),
        _ if window == 0 => return scores.to_vec(),
        RegularisationStrategy::Average => score_average,
        RegularisationStrategy::Minimum => score_min,
    };

    let n = scores.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(window);
            let end = (i + window + 1).min(n);
            reduce(scores, start, end)
        })
        .collect()
}
