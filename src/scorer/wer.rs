use std::path::PathBuf;

use crate::scorer::base::ScorerBase;
use crate::scorer::references::{encode_hypothesis, ReferenceSet};
use crate::scorer::statistics::score_trajectory;
use crate::scorer::{Scorer, ScorerError};
use crate::types::{Candidates, Diff, ScoreSequence, ScoreStats};

/// Word error rate, reported as `1 - WER`.
///
/// Statistics: token-level edit distance, reference length.
#[derive(Debug)]
pub struct WerScorer {
    base: ScorerBase,
    references: Option<ReferenceSet>,
}

impl WerScorer {
    pub const NAME: &'static str = "WER";
    const NUMBER_OF_SCORES: usize = 2;

    pub fn new(config: &str) -> Result<Self, ScorerError> {
        Ok(Self {
            base: ScorerBase::new(Self::NAME, config)?,
            references: None,
        })
    }

    /// Corpus score from summed statistics; an empty reference side or a
    /// malformed record scores 0.
    pub fn calculate_score(totals: &[f32]) -> f32 {
        let &[edits, reference] = totals else {
            return 0.0;
        };
        if reference <= 0.0 {
            return 0.0;
        }
        1.0 - edits / reference
    }
}

/// Levenshtein distance over token ids with unit costs.
fn edit_distance(hypothesis: &[u32], reference: &[u32]) -> usize {
    let mut previous: Vec<usize> = (0..=reference.len()).collect();
    let mut current = vec![0; reference.len() + 1];

    for (i, h) in hypothesis.iter().enumerate() {
        current[0] = i + 1;
        for (j, r) in reference.iter().enumerate() {
            let substitution = previous[j] + usize::from(h != r);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[reference.len()]
}

impl Scorer for WerScorer {
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

        // Closest reference wins: fewest edits relative to its length.
        let best = references
            .iter()
            .map(|reference| {
                [
                    edit_distance(&hypothesis, reference) as f32,
                    reference.len() as f32,
                ]
            })
            .fold(None::<[f32; 2]>, |best, stats| match best {
                Some(b) if Self::calculate_score(&b) >= Self::calculate_score(&stats) => Some(b),
                _ => Some(stats),
            })
            .ok_or(ScorerError::ReferencesNotLoaded)?;

        entry.set(&best);
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
