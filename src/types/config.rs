use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing colon when processing scorer config entry '{entry}' in '{config}'")]
    MissingColon { config: String, entry: String },
    #[error("Invalid value '{value}' for scorer config key '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Immutable scorer configuration.
///
/// Parsed once from a `key1:value1,key2:value2` string. Unknown keys are kept
/// and simply never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScorerConfig {
    entries: BTreeMap<String, String>,
}

impl ScorerConfig {
    pub fn parse(config: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        if config.is_empty() {
            return Ok(Self { entries });
        }

        for entry in config.split(',') {
            // Split at the first colon only; values may carry their own.
            let (key, value) = entry.split_once(':').ok_or_else(|| ConfigError::MissingColon {
                config: config.to_string(),
                entry: entry.to_string(),
            })?;
            entries.insert(key.to_string(), value.to_string());
        }

        Ok(Self { entries })
    }

    /// Configured value for `key`, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Parse the value for `key` as `T`, falling back to `default` when absent.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.entries.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}

impl FromStr for ScorerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
