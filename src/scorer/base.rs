use std::sync::Arc;

use crate::data::ScoreData;
use crate::preprocess::{FactorSelection, PreProcessFilter, Vocabulary, DEFAULT_FACTOR_DELIMITER};
use crate::scorer::regularisation::{self, RegularisationStrategy};
use crate::scorer::ScorerError;
use crate::types::{ConfigError, ScoreSequence, ScorerConfig};

/// State every metric shares: configuration, vocabulary, factor selection,
/// the optional filter and the attached statistics store.
#[derive(Debug)]
pub struct ScorerBase {
    name: String,
    config: ScorerConfig,
    vocab: Vocabulary,
    factors: FactorSelection,
    filter: Option<PreProcessFilter>,
    score_data: Option<Arc<ScoreData>>,
    preserve_case: bool,
    regularisation: RegularisationStrategy,
    regularisation_window: usize,
    preprocessing_started: bool,
}

impl ScorerBase {
    /// Recognised keys: `case`, `regtype`, `regwin`, `factordelim`.
    pub fn new(name: impl Into<String>, config: &str) -> Result<Self, ScorerError> {
        let config = ScorerConfig::parse(config)?;

        let preserve_case = config.parse_or("case", true)?;
        let regularisation = match config.get("regtype") {
            None => RegularisationStrategy::None,
            Some(raw) => raw.parse().map_err(|value| ConfigError::InvalidValue {
                key: "regtype".to_string(),
                value,
            })?,
        };
        let regularisation_window = config.parse_or("regwin", 0usize)?;
        let delimiter = config.get_or("factordelim", DEFAULT_FACTOR_DELIMITER);
        if delimiter.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "factordelim".to_string(),
                value: String::new(),
            }
            .into());
        }
        let factors = FactorSelection::parse("", delimiter)?;

        Ok(Self {
            name: name.into(),
            config,
            vocab: Vocabulary::new(),
            factors,
            filter: None,
            score_data: None,
            preserve_case,
            regularisation,
            regularisation_window,
            preprocessing_started: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Configured value for `key`, or `default` when absent.
    pub fn config_value<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.config.get_or(key, default)
    }

    pub fn preserve_case(&self) -> bool {
        self.preserve_case
    }

    pub fn regularisation(&self) -> (RegularisationStrategy, usize) {
        (self.regularisation, self.regularisation_window)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn factors(&self) -> &FactorSelection {
        &self.factors
    }

    pub fn filter(&self) -> Option<&PreProcessFilter> {
        self.filter.as_ref()
    }

    pub fn set_factors(&mut self, spec: &str) -> Result<(), ScorerError> {
        if self.preprocessing_started {
            return Err(ScorerError::AlreadyPreprocessing);
        }
        self.factors = FactorSelection::parse(spec, self.factors.delimiter())?;
        Ok(())
    }

    pub fn set_filter(&mut self, command: &str) -> Result<(), ScorerError> {
        if self.preprocessing_started {
            return Err(ScorerError::AlreadyPreprocessing);
        }
        self.filter = if command.trim().is_empty() {
            None
        } else {
            Some(PreProcessFilter::new(command))
        };
        Ok(())
    }

    pub fn set_score_data(&mut self, data: Arc<ScoreData>) {
        self.score_data = Some(data);
    }

    /// The attached store, or [`ScorerError::ScoreDataNotSet`].
    pub fn score_data(&self) -> Result<&ScoreData, ScorerError> {
        self.score_data.as_deref().ok_or(ScorerError::ScoreDataNotSet)
    }

    /// Number of sentences in the attached store, 0 when none is attached.
    pub fn reference_size(&self) -> usize {
        self.score_data.as_ref().map_or(0, |data| data.len())
    }

    /// Filter, then factor selection. Every metric runs its text through here.
    pub fn preprocess_sentence(&mut self, sentence: &str) -> Result<String, ScorerError> {
        self.preprocessing_started = true;
        let filtered = match &self.filter {
            Some(filter) => filter.process(sentence)?,
            None => sentence.to_string(),
        };
        Ok(self.factors.apply(&filtered)?)
    }

    /// Split on whitespace runs and append the id of every token to `encoded`.
    pub fn tokenize_and_encode(&mut self, line: &str, encoded: &mut Vec<u32>) -> Result<(), ScorerError> {
        let lowered;
        let text = if self.preserve_case {
            line
        } else {
            lowered = line.to_lowercase();
            &lowered
        };
        for token in text.split_whitespace() {
            encoded.push(self.vocab.encode(token)?);
        }
        Ok(())
    }

    pub(crate) fn regularise(&self, scores: &[f32]) -> ScoreSequence {
        regularisation::regularise(scores, self.regularisation, self.regularisation_window)
    }
}
