//! agentproof Proof Validator
//!
//! Structural checks on a proof package before any cryptography runs:
//! - the log is non-empty (and within the configured size)
//! - signing fields are all present or all absent
//! - the root hash is well-formed hex
//!
//! # Examples
//!
//! ```
//! use agentproof_domain::ProofPackage;
//! use agentproof_validator::{ProofValidator, ValidationConfig};
//!
//! let validator = ProofValidator::new(ValidationConfig::default());
//! let result = validator.validate_proof_structure(&ProofPackage::unsigned(vec![]));
//! assert!(!result.valid);
//! assert_eq!(result.error.as_deref(), Some("Proof contains no log entries"));
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{ProofValidator, RejectionReason, ValidationResult};
