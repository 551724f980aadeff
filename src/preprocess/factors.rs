use crate::preprocess::PreprocessError;

/// Separator between the factors of a factored token (`surface|pos|lemma`).
pub const DEFAULT_FACTOR_DELIMITER: &str = "|";

/// Which factors of each token a metric should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorSelection {
    factors: Vec<usize>,
    delimiter: String,
}

impl Default for FactorSelection {
    fn default() -> Self {
        Self {
            factors: Vec::new(),
            delimiter: DEFAULT_FACTOR_DELIMITER.to_string(),
        }
    }
}

impl FactorSelection {
    /// Parse a delimiter-separated list of factor positions, e.g. `"0|2"`.
    ///
    /// An empty specification selects nothing and leaves text untouched.
    pub fn parse(spec: &str, delimiter: &str) -> Result<Self, PreprocessError> {
        let mut factors = Vec::new();
        let spec = spec.trim();
        if !spec.is_empty() {
            for raw in spec.split(delimiter) {
                let factor = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| PreprocessError::InvalidFactorSpec(spec.to_string()))?;
                factors.push(factor);
            }
        }
        Ok(Self {
            factors,
            delimiter: delimiter.to_string(),
        })
    }

    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Rebuild `sentence` keeping only the selected factors of every token,
    /// in selection order. Tokens are re-joined with single spaces.
    pub fn apply(&self, sentence: &str) -> Result<String, PreprocessError> {
        if self.factors.is_empty() {
            return Ok(sentence.to_string());
        }

        let mut out = String::with_capacity(sentence.len());
        for token in sentence.split_whitespace() {
            let fields: Vec<&str> = token.split(self.delimiter.as_str()).collect();
            if !out.is_empty() {
                out.push(' ');
            }
            for (i, &factor) in self.factors.iter().enumerate() {
                let field = fields.get(factor).ok_or_else(|| PreprocessError::FactorOutOfRange {
                    factor,
                    token: token.to_string(),
                })?;
                if i > 0 {
                    out.push_str(&self.delimiter);
                }
                out.push_str(field);
            }
        }
        Ok(out)
    }
}
