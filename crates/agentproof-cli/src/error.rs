//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Proof fetch error
    #[error("Fetch error: {0}")]
    Client(#[from] agentproof_client::ClientError),

    /// Resolution flow error
    #[error("Resolution failed ({kind}): {0}", kind = .0.kind())]
    Resolution(#[from] agentproof_resolver::ResolutionError),

    /// Signing key error
    #[error("Key error: {0}")]
    Key(#[from] agentproof_chain::KeyError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The proof was checked and rejected
    #[error("Proof rejected: {0}")]
    Rejected(String),
}
