//! Configuration for the OutcomeParser

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Parser configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration values are inconsistent
    #[error("Invalid parser configuration: {0}")]
    Invalid(String),
}

const DEFAULT_YES: &[&str] = &[
    "BOUGHT", "BUY", "YES", "MOON", "LONG", "BULLISH", "UP", "RISE", "GAIN",
];
const DEFAULT_NO: &[&str] = &[
    "SOLD", "SELL", "NO", "RUG", "SHORT", "BEARISH", "DOWN", "FALL", "LOSS",
];

/// Configuration for outcome inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Words counted as evidence for a yes outcome
    pub yes_keywords: Vec<String>,

    /// Words counted as evidence for a no outcome
    pub no_keywords: Vec<String>,

    /// Winning keyword count at or above which confidence is Medium instead of Low
    pub medium_confidence_count: usize,

    /// Run the keyword heuristic when no structured outcome is found
    pub keyword_fallback: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            yes_keywords: DEFAULT_YES.iter().map(|s| s.to_string()).collect(),
            no_keywords: DEFAULT_NO.iter().map(|s| s.to_string()).collect(),
            medium_confidence_count: 2,
            keyword_fallback: true,
        }
    }
}

impl ParserConfig {
    /// Structured-only preset: outcomes must be reported explicitly by the agent
    pub fn structured_only() -> Self {
        Self {
            keyword_fallback: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword_fallback && (self.yes_keywords.is_empty() || self.no_keywords.is_empty())
        {
            return Err(ConfigError::Invalid(
                "yes_keywords and no_keywords must both be non-empty".to_string(),
            ));
        }
        if self.medium_confidence_count == 0 {
            return Err(ConfigError::Invalid(
                "medium_confidence_count must be greater than 0".to_string(),
            ));
        }
        if let Some(word) = self.yes_keywords.iter().find(|yes| {
            self.no_keywords
                .iter()
                .any(|no| no.eq_ignore_ascii_case(yes))
        }) {
            return Err(ConfigError::Invalid(format!(
                "keyword '{}' appears in both yes and no sets",
                word
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
