use crate::data::ScoreData;
use crate::scorer::base::ScorerBase;
use crate::scorer::ScorerError;
use crate::types::{Candidates, Diff, ScoreSequence};

fn lookup<'a>(
    data: &'a ScoreData,
    width: usize,
    sentence: usize,
    candidate: usize,
) -> Result<&'a [f32], ScorerError> {
    let array = data.get(sentence).ok_or(ScorerError::SentenceOutOfRange {
        sentence,
        len: data.len(),
    })?;
    let stats = array.get(candidate).ok_or(ScorerError::CandidateOutOfRange {
        sentence,
        candidate,
        len: array.len(),
    })?;
    if stats.len() != width {
        return Err(ScorerError::StatsWidthMismatch {
            expected: width,
            found: stats.len(),
        });
    }
    Ok(stats.as_slice())
}

/// Score a baseline selection and every step of a diff trajectory for a
/// metric whose corpus score is a function of the summed sentence statistics.
///
/// The corpus totals are built once. Each diff then swaps exactly one
/// sentence's record in the totals, so a step costs `width` additions no
/// matter how large the corpus is.
pub fn score_trajectory<F>(
    base: &ScorerBase,
    width: usize,
    candidates: &Candidates,
    diffs: &[Diff],
    calculate: F,
) -> Result<ScoreSequence, ScorerError>
where
    F: Fn(&[f32]) -> f32,
{
    let data = base.score_data()?;
    if candidates.len() != data.len() {
        return Err(ScorerError::CandidateCountMismatch {
            expected: data.len(),
            found: candidates.len(),
        });
    }

    let mut totals = vec![0.0f32; width];
    for (sentence, &candidate) in candidates.iter().enumerate() {
        let stats = lookup(data, width, sentence, candidate)?;
        for (total, value) in totals.iter_mut().zip(stats) {
            *total += value;
        }
    }

    let mut current = candidates.to_vec();
    let mut scores = Vec::with_capacity(diffs.len() + 1);
    scores.push(calculate(&totals));

    for diff in diffs {
        let previous = *current.get(diff.sentence).ok_or(ScorerError::SentenceOutOfRange {
            sentence: diff.sentence,
            len: current.len(),
        })?;
        let old = lookup(data, width, diff.sentence, previous)?;
        let new = lookup(data, width, diff.sentence, diff.candidate)?;
        for ((total, removed), added) in totals.iter_mut().zip(old).zip(new) {
            *total += added - removed;
        }
        current[diff.sentence] = diff.candidate;
        scores.push(calculate(&totals));
    }

    Ok(base.regularise(&scores))
}
