//! Error types for resolution

use agentproof_domain::{Confidence, ErrorKind};
use thiserror::Error;

/// Terminal failure of one resolution attempt
///
/// Every variant maps onto the shared [`ErrorKind`] taxonomy through
/// [`ResolutionError::kind`]. Collaborator messages are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No proof request exists for the pair
    #[error("Proof not requested yet for agent {agent} on market {market_id}")]
    NotRequested {
        /// Agent address
        agent: String,
        /// Market identifier
        market_id: String,
    },

    /// The agent has not submitted its proof
    #[error("Proof request for agent {agent} on market {market_id} is not yet fulfilled")]
    NotFulfilled {
        /// Agent address
        agent: String,
        /// Market identifier
        market_id: String,
    },

    /// Registry read failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// Agent has no registered proof endpoint
    #[error("No proof endpoint registered for agent {0}")]
    NoEndpoint(String),

    /// Proof retrieval failed
    ///
    /// `kind` is the source's own classification: a body that never decodes is
    /// structural, a dropped connection is a collaborator failure.
    #[error("Failed to fetch proof: {message}")]
    Fetch {
        /// Classification reported by the proof source
        kind: ErrorKind,
        /// Source error message
        message: String,
    },

    /// Proof package is malformed
    #[error("Invalid proof structure: {0}")]
    Structural(String),

    /// Hash chain or root mismatch
    #[error("Chain integrity check failed: {}", .0.join("; "))]
    Integrity(Vec<String>),

    /// Signature missing or invalid
    #[error("Chain authenticity check failed: {}", .0.join("; "))]
    Authenticity(Vec<String>),

    /// No outcome could be read from the log
    #[error("Unable to determine outcome from logs: {reason}")]
    InferenceGap {
        /// Parser's explanation
        reason: String,
    },

    /// Outcome found but below the configured confidence floor
    #[error("Outcome confidence {confidence} is below the required {minimum}: {reason}")]
    BelowMinimumConfidence {
        /// Confidence of the parsed outcome
        confidence: Confidence,
        /// Configured floor
        minimum: Confidence,
        /// Parser's explanation
        reason: String,
    },

    /// Market resolution call failed
    #[error("Market resolution failed: {message}")]
    Resolve {
        /// Classification reported by the market
        kind: ErrorKind,
        /// Market error message
        message: String,
    },

    /// The market was resolved before this attempt reached it
    #[error("Market {market_id} is already resolved: {message}")]
    AlreadyResolved {
        /// Market identifier
        market_id: String,
        /// Market error message
        message: String,
    },
}

impl ResolutionError {
    /// Taxonomy kind of this failure
    ///
    /// Unrequested and unfulfilled proofs are reported as collaborator state that is
    /// not ready yet, so they stay retryable.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolutionError::NotRequested { .. }
            | ResolutionError::NotFulfilled { .. }
            | ResolutionError::Registry(_)
            | ResolutionError::NoEndpoint(_)
            | ResolutionError::AlreadyResolved { .. } => ErrorKind::Collaborator,
            ResolutionError::Fetch { kind, .. } | ResolutionError::Resolve { kind, .. } => *kind,
            ResolutionError::Structural(_) => ErrorKind::Structural,
            ResolutionError::Integrity(_) => ErrorKind::Integrity,
            ResolutionError::Authenticity(_) => ErrorKind::Authenticity,
            ResolutionError::InferenceGap { .. } | ResolutionError::BelowMinimumConfidence { .. } => {
                ErrorKind::InferenceGap
            }
        }
    }

    /// Whether a later attempt could succeed
    ///
    /// An already-resolved market is settled for good even though the market
    /// reported it as a collaborator error.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ResolutionError::AlreadyResolved { .. }) && self.kind().is_transient()
    }
}
