//! Chain verification
//!
//! Nothing here returns `Err` or panics on malformed input: every failure lands in the
//! `errors`/`valid` fields so that a read-only viewer can render a degraded chain and
//! the resolution path can reject it, from the same result.

use crate::codec::{Base58Codec, Codec};
use crate::hashing::{calculate_chain_root_hash, recompute_entry_hash};
use agentproof_domain::{ErrorKind, LogEntry, ProofPackage};
use chrono::DateTime;
use ed25519_dalek::{Signature, VerifyingKey};
use serde::Serialize;
use tracing::debug;

/// Result of walking the hash chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Whether linkage and every present hash check out
    pub valid: bool,
    /// One message per break, each naming the entry index
    pub errors: Vec<String>,
    /// Advisory findings that do not invalidate the chain
    pub warnings: Vec<String>,
}

/// Result of checking a signature over a root hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureCheck {
    /// Whether the signature verifies
    pub valid: bool,
    /// Why verification failed
    pub error: Option<String>,
}

impl SignatureCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Display status for read paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Intact chain, matching root, authentic signature
    Verified,
    /// Intact chain but no signature to check
    Unverified,
    /// Any integrity, root or signature failure
    Failed,
}

/// Result of verifying a complete proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainVerification {
    /// Integrity passed, root matches and signature verifies
    pub valid: bool,
    /// All failure reasons, integrity first
    pub errors: Vec<String>,
    /// Advisory findings
    pub warnings: Vec<String>,
    /// Signature verifies and the declared root matches the recomputed one
    pub signature_valid: bool,
    /// Hash chain linkage and digests are consistent
    pub integrity_valid: bool,
    /// Declared root equals the recomputed root
    pub root_matches: bool,
    /// Whether signing fields were supplied at all
    pub signed: bool,
    /// Root recomputed from the entries
    pub computed_root: String,
}

impl ChainVerification {
    /// Status for display
    pub fn status(&self) -> VerificationStatus {
        if self.valid {
            VerificationStatus::Verified
        } else if !self.signed && self.integrity_valid {
            VerificationStatus::Unverified
        } else {
            VerificationStatus::Failed
        }
    }

    /// Taxonomy kind of the failure, if any
    ///
    /// Chain and root problems are integrity failures; a bad or missing signature
    /// over an intact chain is an authenticity failure.
    pub fn failure_kind(&self) -> Option<ErrorKind> {
        if self.valid {
            None
        } else if !self.integrity_valid || (self.signed && !self.root_matches) {
            Some(ErrorKind::Integrity)
        } else {
            Some(ErrorKind::Authenticity)
        }
    }
}

/// Verifies hash chains, roots and signatures
///
/// Generic over the codec used for signatures and public keys; base58 by default.
#[derive(Debug, Clone, Default)]
pub struct ChainVerifier<C: Codec = Base58Codec> {
    codec: C,
}

impl ChainVerifier<Base58Codec> {
    /// Create a verifier for base58 signatures and keys
    pub fn new() -> Self {
        Self { codec: Base58Codec }
    }
}

impl<C: Codec> ChainVerifier<C> {
    /// Create a verifier with a custom codec
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Walk the chain once, checking linkage and recomputing present hashes
    ///
    /// Linkage compares each `previous_hash` against the prior entry's *declared*
    /// `current_hash`; hashing recomputes each entry's own digest. The two checks
    /// report independently and all breaks are accumulated.
    pub fn verify_chain_integrity(&self, logs: &[LogEntry]) -> IntegrityReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if logs.is_empty() {
            warnings.push("Log chain is empty".to_string());
            return IntegrityReport {
                valid: true,
                errors,
                warnings,
            };
        }

        if !logs.iter().any(LogEntry::has_hash_fields) {
            warnings.push(
                "No entry carries hash fields; chain verification unavailable".to_string(),
            );
            return IntegrityReport {
                valid: true,
                errors,
                warnings,
            };
        }

        // A truncated window legitimately starts mid-chain at its own number
        let sequence_base = if logs[0].previous_hash.is_empty() {
            0
        } else {
            logs[0].sequence_number.unwrap_or(0)
        };

        for (index, entry) in logs.iter().enumerate() {
            check_sequence(index, sequence_base, entry, &mut warnings);
            if index == 0 {
                if !entry.previous_hash.is_empty() {
                    errors.push(format!(
                        "Entry 0: previous_hash must be empty for the first entry, found {} (chain may be truncated)",
                        entry.previous_hash
                    ));
                }
            } else {
                let prior = &logs[index - 1];
                if entry.previous_hash != prior.current_hash {
                    errors.push(format!(
                        "Entry {}: previous_hash {} does not match current_hash {} of entry {}",
                        index,
                        display_hash(&entry.previous_hash),
                        display_hash(&prior.current_hash),
                        index - 1
                    ));
                }
                check_timestamp(index, prior, entry, &mut warnings);
            }

            if entry.current_hash.is_empty() {
                warnings.push(format!("Entry {}: current_hash missing", index));
            } else {
                let recomputed = recompute_entry_hash(entry);
                if !recomputed.eq_ignore_ascii_case(&entry.current_hash) {
                    errors.push(format!(
                        "Entry {}: current_hash mismatch (declared {}, computed {})",
                        index, entry.current_hash, recomputed
                    ));
                }
            }
        }

        debug!(
            entries = logs.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "chain integrity checked"
        );

        IntegrityReport {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Root hash over every entry's `current_hash`, in order
    pub fn calculate_chain_root_hash(&self, logs: &[LogEntry]) -> String {
        calculate_chain_root_hash(logs)
    }

    /// Verify a detached Ed25519 signature over the raw bytes of a hex root hash
    pub fn verify_chain_signature(
        &self,
        root_hash: &str,
        signature: &str,
        public_key: &str,
    ) -> SignatureCheck {
        let message = match hex::decode(root_hash.trim()) {
            Ok(bytes) => bytes,
            Err(e) => return SignatureCheck::failed(format!("Invalid root hash hex: {}", e)),
        };

        let signature_bytes = match self.codec.decode(signature) {
            Ok(bytes) => bytes,
            Err(e) => return SignatureCheck::failed(format!("Invalid signature: {}", e)),
        };
        let signature_bytes: [u8; 64] = match signature_bytes.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => {
                return SignatureCheck::failed(format!(
                    "Invalid signature length: expected 64 bytes, got {}",
                    signature_bytes.len()
                ))
            }
        };

        let key_bytes = match self.codec.decode(public_key) {
            Ok(bytes) => bytes,
            Err(e) => return SignatureCheck::failed(format!("Invalid public key: {}", e)),
        };
        let key_bytes: [u8; 32] = match key_bytes.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => {
                return SignatureCheck::failed(format!(
                    "Invalid public key length: expected 32 bytes, got {}",
                    key_bytes.len()
                ))
            }
        };
        let verifying_key = match VerifyingKey::from_bytes(&key_bytes) {
            Ok(key) => key,
            Err(e) => return SignatureCheck::failed(format!("Invalid public key: {}", e)),
        };

        let signature = Signature::from_bytes(&signature_bytes);
        match verifying_key.verify_strict(&message, &signature) {
            Ok(()) => SignatureCheck::ok(),
            Err(_) => SignatureCheck::failed(
                "Signature does not verify against the public key and root hash",
            ),
        }
    }

    /// Check integrity, root and signature together
    ///
    /// All failure reasons are reported, not just the first.
    pub fn verify_complete_chain(
        &self,
        logs: &[LogEntry],
        chain_root_hash: &str,
        signature: &str,
        agent_public_key: &str,
    ) -> ChainVerification {
        let integrity = self.verify_chain_integrity(logs);
        let computed_root = self.calculate_chain_root_hash(logs);
        let root_matches = computed_root.eq_ignore_ascii_case(chain_root_hash.trim());
        let signature_check = self.verify_chain_signature(chain_root_hash, signature, agent_public_key);

        let mut errors = integrity.errors;
        if !root_matches {
            errors.push(format!(
                "Chain root hash mismatch: declared {}, computed {}",
                display_hash(chain_root_hash),
                computed_root
            ));
        }
        if let Some(error) = &signature_check.error {
            errors.push(format!("Signature invalid: {}", error));
        }

        let valid = integrity.valid && root_matches && signature_check.valid;
        debug!(valid, root_matches, signature = signature_check.valid, "complete chain verified");

        ChainVerification {
            valid,
            errors,
            warnings: integrity.warnings,
            signature_valid: signature_check.valid && root_matches,
            integrity_valid: integrity.valid,
            root_matches,
            signed: true,
            computed_root,
        }
    }

    /// Verify a proof package, treating missing signing fields as a failure
    pub fn verify_package(&self, package: &ProofPackage) -> ChainVerification {
        match package.signing_fields() {
            Some((root, signature, key)) => {
                self.verify_complete_chain(&package.logs, root, signature, key)
            }
            None => {
                let integrity = self.verify_chain_integrity(&package.logs);
                let mut errors = integrity.errors;
                errors.push(
                    "Proof is unsigned: chain_root_hash, signature and agent_public_key are required"
                        .to_string(),
                );
                ChainVerification {
                    valid: false,
                    errors,
                    warnings: integrity.warnings,
                    signature_valid: false,
                    integrity_valid: integrity.valid,
                    root_matches: false,
                    signed: false,
                    computed_root: self.calculate_chain_root_hash(&package.logs),
                }
            }
        }
    }
}

fn display_hash(hash: &str) -> &str {
    if hash.is_empty() {
        "(empty)"
    } else {
        hash
    }
}

/// Advisory check: timestamps never go backwards
fn check_timestamp(index: usize, prior: &LogEntry, entry: &LogEntry, warnings: &mut Vec<String>) {
    if let (Ok(previous), Ok(current)) = (
        DateTime::parse_from_rfc3339(&prior.timestamp),
        DateTime::parse_from_rfc3339(&entry.timestamp),
    ) {
        if current < previous {
            warnings.push(format!(
                "Entry {}: timestamp {} is earlier than entry {} ({})",
                index,
                entry.timestamp,
                index - 1,
                prior.timestamp
            ));
        }
    }
}

/// Advisory check: an explicit sequence number matches the array position
fn check_sequence(index: usize, base: u64, entry: &LogEntry, warnings: &mut Vec<String>) {
    let Some(declared) = entry.sequence_number else {
        return;
    };
    let expected = base.checked_add(index as u64);
    if expected != Some(declared) {
        warnings.push(format!(
            "Entry {}: sequence_number {} disagrees with array position (expected {})",
            index,
            declared,
            expected.map_or_else(|| "overflow".to_string(), |n| n.to_string())
        ));
    }
}
