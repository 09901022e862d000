//! In-memory collaborators for testing and dry runs
//!
//! Each mock counts its calls so tests can assert that a step was (or was not)
//! reached.

use crate::MockError;
use agentproof_domain::traits::{MarketResolver, ProofRegistry, ProofSource};
use agentproof_domain::{AgentRecord, Outcome, ProofPackage, ProofRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registry backed by maps of proof requests and agents
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    requests: Arc<Mutex<HashMap<(String, String), ProofRequest>>>,
    agents: Arc<Mutex<HashMap<String, AgentRecord>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a proof request, keyed by its agent and market
    pub fn add_request(&self, request: ProofRequest) {
        let key = (request.agent.clone(), request.market_id.clone());
        lock(&self.requests).insert(key, request);
    }

    /// Store an agent record
    pub fn add_agent(&self, record: AgentRecord) {
        lock(&self.agents).insert(record.address.clone(), record);
    }

    /// Make every subsequent call fail with this message
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Number of registry reads
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> Result<(), MockError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_ref() {
            Some(message) => Err(MockError::Injected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProofRegistry for MockRegistry {
    type Error = MockError;

    async fn proof_request(
        &self,
        agent: &str,
        market_id: &str,
    ) -> Result<Option<ProofRequest>, Self::Error> {
        self.begin_call()?;
        let key = (agent.to_string(), market_id.to_string());
        Ok(lock(&self.requests).get(&key).cloned())
    }

    async fn agent(&self, agent: &str) -> Result<Option<AgentRecord>, Self::Error> {
        self.begin_call()?;
        Ok(lock(&self.agents).get(agent).cloned())
    }
}

/// Market that records resolutions and refuses to resolve twice
#[derive(Debug, Clone, Default)]
pub struct MockMarket {
    resolved: Arc<Mutex<HashMap<String, Outcome>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockMarket {
    /// Create a market with no resolutions
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome recorded for a market, if resolved
    pub fn outcome(&self, market_id: &str) -> Option<Outcome> {
        lock(&self.resolved).get(market_id).copied()
    }

    /// Make every subsequent resolution fail with this message
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Number of resolution attempts
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketResolver for MockMarket {
    type Error = MockError;

    async fn resolve(&self, market_id: &str, outcome: Outcome) -> Result<String, Self::Error> {
        let attempt = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(message) = lock(&self.failure).as_ref() {
            return Err(MockError::Injected(message.clone()));
        }

        let mut resolved = lock(&self.resolved);
        if resolved.contains_key(market_id) {
            return Err(MockError::AlreadyResolved(market_id.to_string()));
        }
        resolved.insert(market_id.to_string(), outcome);
        Ok(format!("mock-resolution-{}-{}", market_id, attempt))
    }
}

/// Proof source serving fixed packages by URI or agent URL
#[derive(Debug, Clone, Default)]
pub struct StaticProofSource {
    by_uri: Arc<Mutex<HashMap<String, ProofPackage>>>,
    by_agent: Arc<Mutex<HashMap<String, ProofPackage>>>,
    credentials: Arc<Mutex<Vec<Option<String>>>>,
    call_count: Arc<AtomicUsize>,
}

impl StaticProofSource {
    /// Create a source with no packages
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a package at a URI
    pub fn add_uri(&self, uri: impl Into<String>, package: ProofPackage) {
        lock(&self.by_uri).insert(uri.into(), package);
    }

    /// Serve a package from an agent base URL
    pub fn add_agent(&self, base_url: impl Into<String>, package: ProofPackage) {
        lock(&self.by_agent).insert(base_url.into(), package);
    }

    /// Number of fetches
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Credentials presented to agent fetches, in order
    pub fn credentials_seen(&self) -> Vec<Option<String>> {
        lock(&self.credentials).clone()
    }
}

#[async_trait]
impl ProofSource for StaticProofSource {
    type Error = MockError;

    async fn fetch_uri(&self, uri: &str) -> Result<ProofPackage, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.by_uri)
            .get(uri)
            .cloned()
            .ok_or_else(|| MockError::NoProof(uri.to_string()))
    }

    async fn fetch_from_agent(
        &self,
        base_url: &str,
        _market_id: &str,
        credential: Option<&str>,
    ) -> Result<ProofPackage, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.credentials).push(credential.map(str::to_string));
        lock(&self.by_agent)
            .get(base_url)
            .cloned()
            .ok_or_else(|| MockError::NoProof(base_url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_lookup_and_count() {
        let registry = MockRegistry::new();
        registry.add_request(ProofRequest::pending("agent", "m1"));

        assert!(registry.proof_request("agent", "m1").await.unwrap().is_some());
        assert!(registry.proof_request("agent", "m2").await.unwrap().is_none());
        assert!(registry.agent("agent").await.unwrap().is_none());
        assert_eq!(registry.call_count(), 3);
    }

    #[tokio::test]
    async fn test_registry_injected_failure() {
        let registry = MockRegistry::new();
        registry.fail_with("rpc down");
        let err = registry.proof_request("a", "m").await.unwrap_err();
        assert_eq!(err, MockError::Injected("rpc down".into()));
    }

    #[tokio::test]
    async fn test_market_rejects_second_resolution() {
        let market = MockMarket::new();
        let tx = market.resolve("m1", Outcome::Yes).await.unwrap();
        assert!(tx.contains("m1"));
        assert_eq!(market.outcome("m1"), Some(Outcome::Yes));

        let err = market.resolve("m1", Outcome::No).await.unwrap_err();
        assert_eq!(err, MockError::AlreadyResolved("m1".into()));
        assert_eq!(market.outcome("m1"), Some(Outcome::Yes));
        assert_eq!(market.call_count(), 2);
    }

    #[tokio::test]
    async fn test_static_source_records_credentials() {
        let source = StaticProofSource::new();
        source.add_agent("http://agent", ProofPackage::unsigned(vec![]));

        source.fetch_from_agent("http://agent", "m", Some("tok")).await.unwrap();
        assert!(source.fetch_uri("ipfs://missing").await.is_err());
        assert_eq!(source.credentials_seen(), vec![Some("tok".to_string())]);
        assert_eq!(source.call_count(), 2);
    }
}
