//! Proof package and registry records

use crate::LogEntry;
use serde::{Deserialize, Serialize};

/// The externally exchanged proof artifact
///
/// Assembled on demand from the current log sequence plus a freshly computed root
/// and signature; immutable once handed to a verifier. The signing fields are
/// optional so that unsigned (transitional) proofs still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofPackage {
    /// Ordered log entries
    pub logs: Vec<LogEntry>,

    /// Hex root digest over every entry's `current_hash`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_root_hash: Option<String>,

    /// Base58 detached signature over the raw root bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Base58 public key of the signing agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_public_key: Option<String>,
}

impl ProofPackage {
    /// Create an unsigned package
    pub fn unsigned(logs: Vec<LogEntry>) -> Self {
        Self {
            logs,
            chain_root_hash: None,
            signature: None,
            agent_public_key: None,
        }
    }

    /// Create a signed package
    pub fn signed(
        logs: Vec<LogEntry>,
        chain_root_hash: impl Into<String>,
        signature: impl Into<String>,
        agent_public_key: impl Into<String>,
    ) -> Self {
        Self {
            logs,
            chain_root_hash: Some(chain_root_hash.into()),
            signature: Some(signature.into()),
            agent_public_key: Some(agent_public_key.into()),
        }
    }

    /// Root, signature and key, when all three are present and non-empty
    pub fn signing_fields(&self) -> Option<(&str, &str, &str)> {
        let root = non_empty(&self.chain_root_hash)?;
        let signature = non_empty(&self.signature)?;
        let key = non_empty(&self.agent_public_key)?;
        Some((root, signature, key))
    }

    /// Whether the package carries a complete set of signing fields
    pub fn is_signed(&self) -> bool {
        self.signing_fields().is_some()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Registry record created when a verifier asks an agent for proof
///
/// Created unfulfilled, mutated once when the agent submits, never again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRequest {
    /// Address of the agent asked for proof
    pub agent: String,

    /// Market the proof settles
    pub market_id: String,

    /// Address of the party that requested the proof
    #[serde(default)]
    pub requester: String,

    /// Unix time the request was created
    #[serde(default)]
    pub requested_at: i64,

    /// Unix time after which an unfulfilled request becomes slashable
    #[serde(default)]
    pub deadline_ts: i64,

    /// Whether the agent has submitted its proof
    pub fulfilled: bool,

    /// Where the proof package can be fetched; empty when the agent serves it directly
    #[serde(default)]
    pub proof_uri: String,

    /// Root hash the agent committed on-chain with its submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_root: Option<String>,

    /// Base58 signature the agent submitted alongside the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ProofRequest {
    /// Create a pending (unfulfilled) request
    pub fn pending(agent: impl Into<String>, market_id: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            market_id: market_id.into(),
            requester: String::new(),
            requested_at: 0,
            deadline_ts: 0,
            fulfilled: false,
            proof_uri: String::new(),
            log_root: None,
            signature: None,
        }
    }

    /// Mark the request fulfilled with the submitted proof location and root
    pub fn fulfill(mut self, proof_uri: impl Into<String>, log_root: Option<String>) -> Self {
        self.fulfilled = true;
        self.proof_uri = proof_uri.into();
        self.log_root = log_root;
        self
    }

    /// The proof URI, when one was submitted
    pub fn proof_uri(&self) -> Option<&str> {
        Some(self.proof_uri.as_str()).filter(|uri| !uri.is_empty())
    }
}

/// Registry record describing an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Agent address
    pub address: String,

    /// Display name
    pub name: String,

    /// Base URL of the agent's proof endpoint
    pub url: String,
}
