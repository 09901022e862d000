//! Agent server configuration

use agentproof_chain::{KeyError, ProofSigner};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Agent configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Signing key could not be loaded
    #[error("Invalid signing key: {0}")]
    SigningKey(#[from] KeyError),
}

/// Agent configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 4000)
    pub bind_port: u16,

    /// Name reported by the health endpoint
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Ed25519 secret seed: 64 hex characters, or base58 seed / wallet keypair
    pub signing_key: String,

    /// Maximum entries kept in memory (oldest dropped first)
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Require an `Authorization` header on `GET /proof`
    #[serde(default)]
    pub proof_requires_payment: bool,
}

fn default_agent_name() -> String {
    "agent".to_string()
}

impl AgentConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(contents)?;

        if config.signing_key.trim().is_empty() {
            return Err(ConfigError::MissingField("signing_key".to_string()));
        }
        // Fail at load time rather than on the first proof request
        config.signer()?;

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        AgentConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 4000,
            agent_name: "test-agent".to_string(),
            signing_key: "07".repeat(32),
            capacity: Some(1000),
            proof_requires_payment: false,
        }
    }

    /// Socket address string
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Load the signing key
    pub fn signer(&self) -> Result<ProofSigner, ConfigError> {
        Ok(ProofSigner::from_seed_str(&self.signing_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind_address = "0.0.0.0"
bind_port = 4100
signing_key = "{}"
proof_requires_payment = true
"#,
            "11".repeat(32)
        )
        .unwrap();

        let config = AgentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:4100");
        assert_eq!(config.agent_name, "agent");
        assert!(config.proof_requires_payment);
        assert_eq!(config.capacity, None);
    }

    #[test]
    fn test_missing_signing_key() {
        let err = AgentConfig::from_toml(
            r#"
bind_address = "127.0.0.1"
bind_port = 4000
signing_key = ""
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn test_bad_signing_key() {
        let err = AgentConfig::from_toml(
            r#"
bind_address = "127.0.0.1"
bind_port = 4000
signing_key = "not-a-key"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::SigningKey(_)));
    }

    #[test]
    fn test_default_test_config_signer() {
        let config = AgentConfig::default_test_config();
        assert_eq!(
            config.signer().unwrap().public_key(),
            ProofSigner::from_seed(&[7u8; 32]).public_key()
        );
    }
}
