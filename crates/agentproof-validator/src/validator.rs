//! Proof structure validation

use crate::ValidationConfig;
use agentproof_domain::ProofPackage;
use thiserror::Error;
use tracing::debug;

/// Why a proof package was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// No log entries
    #[error("Proof contains no log entries")]
    EmptyLogs,

    /// More entries than configured
    #[error("Proof contains {count} log entries (max: {max})")]
    TooManyLogs {
        /// Entries in the package
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// Some but not all signing fields present
    #[error("Incomplete signing fields: missing {}", .missing.join(", "))]
    PartialSignature {
        /// Names of the absent fields
        missing: Vec<&'static str>,
    },

    /// No signing fields where a signature is required
    #[error("Proof is unsigned: chain_root_hash, signature and agent_public_key are required")]
    Unsigned,

    /// Root hash has the wrong length
    #[error("chain_root_hash must be 64 hex characters, got {0}")]
    RootHashLength(usize),

    /// Root hash has non-hex characters
    #[error("chain_root_hash contains non-hex characters")]
    RootHashNotHex,

    /// Entry without a `current_hash`
    #[error("Entry {0} has no current_hash")]
    MissingEntryHash(usize),
}

/// Result of structural validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the package passed
    pub valid: bool,

    /// Human-readable reason for rejection
    pub error: Option<String>,

    /// Typed reason for rejection
    pub reason: Option<RejectionReason>,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            valid: true,
            error: None,
            reason: None,
        }
    }

    fn rejected(reason: RejectionReason) -> Self {
        Self {
            valid: false,
            error: Some(reason.to_string()),
            reason: Some(reason),
        }
    }
}

/// Validates proof packages before verification
#[derive(Debug, Clone, Default)]
pub struct ProofValidator {
    config: ValidationConfig,
}

impl ProofValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check shape only; never panics and never touches cryptography
    pub fn validate_proof_structure(&self, package: &ProofPackage) -> ValidationResult {
        let result = match self.check(package) {
            Ok(()) => ValidationResult::accepted(),
            Err(reason) => ValidationResult::rejected(reason),
        };
        debug!(valid = result.valid, entries = package.logs.len(), "proof structure checked");
        result
    }

    fn check(&self, package: &ProofPackage) -> Result<(), RejectionReason> {
        // 1. Log presence and size
        if package.logs.is_empty() {
            return Err(RejectionReason::EmptyLogs);
        }
        if let Some(max) = self.config.max_logs {
            if package.logs.len() > max {
                return Err(RejectionReason::TooManyLogs {
                    count: package.logs.len(),
                    max,
                });
            }
        }

        // 2. Signing fields: all or nothing
        let fields = [
            ("chain_root_hash", &package.chain_root_hash),
            ("signature", &package.signature),
            ("agent_public_key", &package.agent_public_key),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        match missing.len() {
            0 => {
                let root = package.chain_root_hash.as_deref().unwrap_or_default();
                if root.chars().count() != 64 {
                    return Err(RejectionReason::RootHashLength(root.chars().count()));
                }
                if !root.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(RejectionReason::RootHashNotHex);
                }
            }
            3 if !self.config.require_signature => {}
            3 => return Err(RejectionReason::Unsigned),
            _ => return Err(RejectionReason::PartialSignature { missing }),
        }

        // 3. Optional per-entry hash presence
        if self.config.require_entry_hashes {
            if let Some(index) = package.logs.iter().position(|e| e.current_hash.is_empty()) {
                return Err(RejectionReason::MissingEntryHash(index));
            }
        }

        Ok(())
    }
}
