//! agentproof Domain Layer
//!
//! Core data model for the verifiable log chain and resolution protocol. Every
//! other crate in the workspace depends on the types and trait interfaces
//! defined here.
//!
//! ## Key Concepts
//!
//! - **Log entry**: one agent action or utterance, linked to its predecessor by hash
//! - **Proof package**: the log plus its root hash, a detached signature and the agent key
//! - **Outcome**: the binary market result inferred from a log, with a confidence tier
//! - **Proof request**: the registry record a verifier creates when it asks an agent for proof
//! - **Error kind**: the failure taxonomy shared by every component
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Hashing, verification, parsing and I/O live in other crates
//! - Trait definitions for all external interactions (registry, proof source, market)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod outcome;
pub mod proof;
pub mod traits;

// Re-exports for convenience
pub use entry::{EntryId, LogCategory, LogEntry};
pub use error::{Classify, ErrorKind};
pub use outcome::{Confidence, Outcome, OutcomeResult};
pub use proof::{AgentRecord, ProofPackage, ProofRequest};
