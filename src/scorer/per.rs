use std::collections::HashMap;
use std::path::PathBuf;

use crate::scorer::base::ScorerBase;
use crate::scorer::references::{encode_hypothesis, ReferenceSet};
use crate::scorer::statistics::score_trajectory;
use crate::scorer::{Scorer, ScorerError};
use crate::types::{Candidates, Diff, ScoreSequence, ScoreStats};

/// Position-independent error rate, reported as `1 - PER`.
///
/// Statistics: matched tokens (bag-of-words intersection), hypothesis length,
/// reference length.
#[derive(Debug)]
pub struct PerScorer {
    base: ScorerBase,
    references: Option<ReferenceSet>,
}

impl PerScorer {
    pub const NAME: &'static str = "PER";
    const NUMBER_OF_SCORES: usize = 3;

    pub fn new(config: &str) -> Result<Self, ScorerError> {
        Ok(Self {
            base: ScorerBase::new(Self::NAME, config)?,
            references: None,
        })
    }

    /// Corpus score from summed statistics. Surplus hypothesis tokens count
    /// as errors; an empty reference side or a malformed record scores 0.
    pub fn calculate_score(totals: &[f32]) -> f32 {
        let &[matched, hypothesis, reference] = totals else {
            return 0.0;
        };
        if reference <= 0.0 {
            return 0.0;
        }
        (matched - (hypothesis - reference).max(0.0)) / reference
    }
}

fn matched_tokens(hypothesis: &[u32], reference: &[u32]) -> usize {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &id in reference {
        *counts.entry(id).or_insert(0) += 1;
    }

    let mut matched = 0;
    for id in hypothesis {
        if let Some(count) = counts.get_mut(id) {
            if *count > 0 {
                *count -= 1;
                matched += 1;
            }
        }
    }
    matched
}

impl Scorer for PerScorer {
    fn base(&self) -> &ScorerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScorerBase {
        &mut self.base
    }

    fn number_of_scores(&self) -> usize {
        Self::NUMBER_OF_SCORES
    }

    fn set_reference_files(&mut self, files: &[PathBuf]) -> Result<(), ScorerError> {
        self.references = Some(ReferenceSet::load(&mut self.base, files)?);
        Ok(())
    }

    fn prepare_stats(
        &mut self,
        sentence: usize,
        text: &str,
        entry: &mut ScoreStats,
    ) -> Result<(), ScorerError> {
        let (hypothesis, references) =
            encode_hypothesis(&mut self.base, self.references.as_ref(), sentence, text)?;

        let mut best: Option<([f32; 3], f32)> = None;
        for reference in references {
            let stats = [
                matched_tokens(&hypothesis, reference) as f32,
                hypothesis.len() as f32,
                reference.len() as f32,
            ];
            let score = Self::calculate_score(&stats);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((stats, score));
            }
        }

        let (stats, _) = best.ok_or(ScorerError::ReferencesNotLoaded)?;
        entry.set(&stats);
        Ok(())
    }

    fn score_diffs(&self, candidates: &Candidates, diffs: &[Diff]) -> Result<ScoreSequence, ScorerError> {
        score_trajectory(
            &self.base,
            Self::NUMBER_OF_SCORES,
            candidates,
            diffs,
            Self::calculate_score,
        )
    }
}
