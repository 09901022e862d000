//! Error types for the proof client

use agentproof_domain::{Classify, ErrorKind};
use thiserror::Error;

/// Errors from fetching proofs over HTTP
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint requires a payment credential
    #[error("Payment required: {0}")]
    PaymentRequired(String),

    /// No proof at the requested location
    #[error("Proof not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body is not a proof package
    #[error("Invalid proof response: {0}")]
    InvalidResponse(String),

    /// Connection error (network, DNS, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Request could not be built or sent
    #[error("Request error: {0}")]
    Request(String),
}

/// A body that does not decode is a malformed proof; everything else is the
/// collaborator failing.
impl Classify for ClientError {
    fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidResponse(_) => ErrorKind::Structural,
            _ => ErrorKind::Collaborator,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Request(e.to_string())
        }
    }
}

/// Errors raised by the in-memory collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// Injected failure
    #[error("Mock failure: {0}")]
    Injected(String),

    /// Market already resolved
    #[error("Market {0} is already resolved")]
    AlreadyResolved(String),

    /// No proof registered for the URI or agent
    #[error("No proof available for {0}")]
    NoProof(String),
}

impl Classify for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Collaborator
    }

    fn is_already_resolved(&self) -> bool {
        matches!(self, MockError::AlreadyResolved(_))
    }
}
