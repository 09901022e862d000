//! Failure taxonomy shared across components

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of every failure the protocol can report
///
/// Callers branch on the kind instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or incomplete proof payload
    Structural,

    /// Hash-chain linkage or digest mismatch
    Integrity,

    /// Signature does not verify against the claimed key and root
    Authenticity,

    /// No reliable outcome could be extracted from the log
    InferenceGap,

    /// Registry, HTTP fetch or market resolution call failed
    Collaborator,
}

impl ErrorKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::Integrity => "integrity",
            ErrorKind::Authenticity => "authenticity",
            ErrorKind::InferenceGap => "inference_gap",
            ErrorKind::Collaborator => "collaborator",
        }
    }

    /// Whether re-invoking later can change the result
    ///
    /// Only collaborator failures (network, registry, market) are transient; a corrupt
    /// chain or a forged signature stays corrupt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Collaborator)
    }
}

/// Errors that know their place in the [`ErrorKind`] taxonomy
///
/// Collaborator error types implement this so the kind survives being flattened
/// into a message.
pub trait Classify {
    /// Taxonomy kind of this failure
    fn kind(&self) -> ErrorKind;

    /// The target was already in its final state, so retrying cannot help
    fn is_already_resolved(&self) -> bool {
        false
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
