use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::scorer::base::ScorerBase;
use crate::scorer::ScorerError;

/// Encoded reference translations, one or more per sentence.
///
/// Each reference file holds one sentence per line; file `k` supplies the
/// `k`-th reference of every sentence.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    sentences: Vec<Vec<Vec<u32>>>,
}

impl ReferenceSet {
    /// Read, preprocess and encode every reference file through `base`, so
    /// references and hypotheses share one vocabulary and one normalisation.
    pub fn load(base: &mut ScorerBase, files: &[PathBuf]) -> Result<Self, ScorerError> {
        if files.is_empty() {
            return Err(ScorerError::NoReferenceFiles);
        }

        let mut sentences: Vec<Vec<Vec<u32>>> = Vec::new();
        for (file_index, path) in files.iter().enumerate() {
            let content = fs::read_to_string(path)?;
            let lines: Vec<&str> = content.lines().collect();

            if file_index == 0 {
                sentences = vec![Vec::with_capacity(files.len()); lines.len()];
            } else if lines.len() != sentences.len() {
                return Err(ScorerError::ReferenceLengthMismatch {
                    path: path.clone(),
                    expected: sentences.len(),
                    found: lines.len(),
                });
            }

            for (refs, line) in sentences.iter_mut().zip(lines) {
                let line = base.preprocess_sentence(line)?;
                let mut encoded = Vec::new();
                base.tokenize_and_encode(&line, &mut encoded)?;
                refs.push(encoded);
            }
            debug!(path = %path.display(), scorer = base.name(), "loaded reference file");
        }

        Ok(Self { sentences })
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// All references for `sentence`.
    pub fn get(&self, sentence: usize) -> Result<&[Vec<u32>], ScorerError> {
        self.sentences
            .get(sentence)
            .map(Vec::as_slice)
            .ok_or(ScorerError::SentenceOutOfRange {
                sentence,
                len: self.sentences.len(),
            })
    }
}

/// Preprocess and encode the hypothesis `text` for `sentence`, paired with
/// that sentence's references. Fails before touching `base` when no
/// references are loaded or `sentence` has none.
pub(crate) fn encode_hypothesis<'r>(
    base: &mut ScorerBase,
    references: Option<&'r ReferenceSet>,
    sentence: usize,
    text: &str,
) -> Result<(Vec<u32>, &'r [Vec<u32>]), ScorerError> {
    let references = references
        .ok_or(ScorerError::ReferencesNotLoaded)?
        .get(sentence)?;

    let text = base.preprocess_sentence(text)?;
    let mut hypothesis = Vec::new();
    base.tokenize_and_encode(&text, &mut hypothesis)?;
    Ok((hypothesis, references))
}
