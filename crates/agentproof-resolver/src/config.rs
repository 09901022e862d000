//! Configuration for resolution
//!
//! # Examples
//!
//! ```
//! use agentproof_domain::Confidence;
//! use agentproof_resolver::ResolverConfig;
//!
//! let config = ResolverConfig::from_toml(r#"
//!     payment_token = "tok"
//!     min_confidence = "medium"
//!
//!     [[targets]]
//!     agent = "AgentPubkey111"
//!     market_id = "btc-100k"
//! "#).unwrap();
//! assert_eq!(config.min_confidence, Confidence::Medium);
//! assert!(config.require_signature);
//! assert_eq!(config.targets.len(), 1);
//! ```

use agentproof_domain::Confidence;
use agentproof_parser::ParserConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Resolver configuration error
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
    #[error("Invalid resolver configuration: {0}")]
    Invalid(String),
}

/// An (agent, market) pair the worker tries to resolve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTarget {
    /// Agent address
    pub agent: String,
    /// Market identifier
    pub market_id: String,
}

impl ResolutionTarget {
    /// Create a target
    pub fn new(agent: impl Into<String>, market_id: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            market_id: market_id.into(),
        }
    }
}

/// Configuration for the orchestrator and its scheduled worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Credential sent to paid proof endpoints as `Authorization: Signature <token>`
    pub payment_token: Option<String>,

    /// Lowest confidence accepted for resolution
    /// Default: low (any determined outcome resolves, with a warning)
    pub min_confidence: Confidence,

    /// Reject unsigned proofs
    /// Default: true
    pub require_signature: bool,

    /// Maximum log entries accepted in a proof
    pub max_logs: Option<usize>,

    /// How often the worker re-invokes pending targets (in seconds)
    /// Default: 60
    pub poll_interval_secs: u64,

    /// Attempts per target before the worker gives up (0 = never)
    /// Default: 0
    pub max_attempts: u32,

    /// Outcome inference settings
    pub parser: ParserConfig,

    /// Pairs for the worker to resolve
    pub targets: Vec<ResolutionTarget>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            payment_token: None,
            min_confidence: Confidence::Low,
            require_signature: true,
            max_logs: None,
            poll_interval_secs: 60,
            max_attempts: 0,
            parser: ParserConfig::default(),
            targets: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Strict preset: only structured or repeated signals resolve a market
    pub fn strict() -> Self {
        Self {
            min_confidence: Confidence::Medium,
            max_logs: Some(100_000),
            ..Self::default()
        }
    }

    /// Lenient preset: unsigned proofs accepted, for development agents
    pub fn lenient() -> Self {
        Self {
            require_signature: false,
            ..Self::default()
        }
    }

    /// Get the worker poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_logs == Some(0) {
            return Err(ConfigError::Invalid(
                "max_logs must be greater than 0".to_string(),
            ));
        }
        if matches!(&self.payment_token, Some(token) if token.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "payment_token must not be blank".to_string(),
            ));
        }
        self.parser
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = toml::from_str(toml_str)?;
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
