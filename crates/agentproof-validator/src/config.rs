//! Validator configuration

use serde::{Deserialize, Serialize};

/// Configuration for structural validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject packages without signing fields
    pub require_signature: bool,

    /// Maximum number of log entries accepted (`None` = unbounded)
    pub max_logs: Option<usize>,

    /// Require a non-empty `current_hash` on every entry
    pub require_entry_hashes: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_signature: false,
            max_logs: None,
            require_entry_hashes: false,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (unsigned and legacy proofs accepted)
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Create a strict configuration for resolution paths
    pub fn strict() -> Self {
        Self {
            require_signature: true,
            max_logs: Some(100_000),
            require_entry_hashes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!ValidationConfig::permissive().require_signature);
        let strict = ValidationConfig::strict();
        assert!(strict.require_signature);
        assert!(strict.require_entry_hashes);
        assert_eq!(strict.max_logs, Some(100_000));
    }

    #[test]
    fn test_toml_defaults() {
        let config: ValidationConfig = toml::from_str("require_signature = true").unwrap();
        assert!(config.require_signature);
        assert_eq!(config.max_logs, None);
    }
}
