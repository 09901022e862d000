//! agentproof Chain
//!
//! Producer and verifier sides of the hash-chained agent log.
//!
//! # Overview
//!
//! ```text
//! LogStore::append → compute_entry_hash → entries
//! ProofSigner::build_package → chain root → Ed25519 signature → ProofPackage
//! ChainVerifier::verify_complete_chain → integrity + root + signature
//! ```
//!
//! Every entry's `current_hash` is SHA-256 over the previous entry's hash followed by
//! the canonical JSON of its content (see [`hashing`]). The chain root is SHA-256 over
//! the concatenated entry hashes, and the agent signs the raw root bytes.
//!
//! # Example
//!
//! ```
//! use agentproof_chain::{ChainVerifier, LogStore, ProofSigner};
//! use agentproof_domain::LogCategory;
//!
//! let mut store = LogStore::new();
//! store.append("scanning markets", LogCategory::System, None, "2025-01-01T00:00:00.000Z");
//! store.append("bought SOL", LogCategory::ToolUse, None, "2025-01-01T00:00:01.000Z");
//!
//! let signer = ProofSigner::from_seed(&[7u8; 32]);
//! let package = signer.build_package(store.entries());
//!
//! let verification = ChainVerifier::new().verify_package(&package);
//! assert!(verification.valid);
//! ```

#![warn(missing_docs)]

pub mod codec;
mod error;
pub mod hashing;
mod signer;
mod store;
mod verifier;

pub use codec::{Base58Codec, Codec, HexCodec};
pub use error::{CodecError, KeyError};
pub use hashing::{
    calculate_chain_root_hash, canonical_content, compute_entry_hash, EMPTY_CHAIN_ROOT,
};
pub use signer::ProofSigner;
pub use store::{LogStore, REDACTED_MESSAGE};
pub use verifier::{
    ChainVerification, ChainVerifier, IntegrityReport, SignatureCheck, VerificationStatus,
};
