//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the protocol and its collaborators.
//! Implementations live in other crates (`agentproof-client` for HTTP and in-memory
//! versions).

use crate::{AgentRecord, Classify, Outcome, ProofPackage, ProofRequest};
use async_trait::async_trait;

/// Read access to the on-chain agent registry
#[async_trait]
pub trait ProofRegistry: Send + Sync {
    /// Error type for registry reads
    type Error: std::fmt::Display + Send;

    /// Get the proof request for an (agent, market) pair, if one exists
    async fn proof_request(
        &self,
        agent: &str,
        market_id: &str,
    ) -> Result<Option<ProofRequest>, Self::Error>;

    /// Get an agent's registry record
    async fn agent(&self, agent: &str) -> Result<Option<AgentRecord>, Self::Error>;
}

/// Retrieval of proof packages
#[async_trait]
pub trait ProofSource: Send + Sync {
    /// Error type for fetch operations
    ///
    /// The kind tells a body that never decodes apart from a network failure.
    type Error: std::fmt::Display + Classify + Send;

    /// Fetch a proof package from a published URI
    async fn fetch_uri(&self, uri: &str) -> Result<ProofPackage, Self::Error>;

    /// Fetch a proof package directly from the agent's proof endpoint
    ///
    /// `credential` is a payment token sent as `Authorization: Signature <token>`.
    async fn fetch_from_agent(
        &self,
        base_url: &str,
        market_id: &str,
        credential: Option<&str>,
    ) -> Result<ProofPackage, Self::Error>;
}

/// The side-effecting market resolution call
///
/// Expected to be the single point of serialization: a second resolution of the
/// same market either no-ops or errors.
#[async_trait]
pub trait MarketResolver: Send + Sync {
    /// Error type for resolution calls
    ///
    /// A market that is already resolved reports it through
    /// [`Classify::is_already_resolved`].
    type Error: std::fmt::Display + Classify + Send;

    /// Finalize a market with the given outcome, returning an operation identifier
    async fn resolve(&self, market_id: &str, outcome: Outcome) -> Result<String, Self::Error>;
}
