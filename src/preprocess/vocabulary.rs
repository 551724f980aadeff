use std::collections::HashMap;

use crate::preprocess::PreprocessError;

/// Token string to integer id mapping.
///
/// Ids are handed out densely in first-seen order and never reused.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
    tokens: Vec<String>,
    limit: Option<usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vocabulary that refuses to assign more than `limit` ids.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Id for `token`, assigning the next free id if it is new.
    ///
    /// Fails with [`PreprocessError::VocabularyFull`] once the id space (the
    /// configured limit, or `u32`) is exhausted. Known tokens still resolve.
    pub fn encode(&mut self, token: &str) -> Result<u32, PreprocessError> {
        if let Some(&id) = self.ids.get(token) {
            return Ok(id);
        }
        let size = self.tokens.len();
        if self.limit.is_some_and(|limit| size >= limit) {
            return Err(PreprocessError::VocabularyFull { size });
        }
        let id = u32::try_from(size).map_err(|_| PreprocessError::VocabularyFull { size })?;
        self.tokens.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        Ok(id)
    }

    pub fn lookup(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    pub fn decode(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
