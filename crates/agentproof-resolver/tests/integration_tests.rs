//! Integration tests for the resolution flow
//!
//! These drive the orchestrator and worker end to end over in-memory collaborators
//! and real signed chains.

use agentproof_chain::{LogStore, ProofSigner};
use agentproof_client::{ClientError, MockMarket, MockRegistry, StaticProofSource};
use agentproof_domain::traits::ProofSource;
use agentproof_domain::{
    AgentRecord, Confidence, ErrorKind, LogCategory, Outcome, ProofPackage, ProofRequest,
};
use agentproof_resolver::{
    ResolutionError, ResolutionOrchestrator, ResolutionTarget, ResolutionWorker, ResolverConfig,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const AGENT: &str = "AgentPubkey111";
const MARKET: &str = "btc-100k";
const PROOF_URI: &str = "https://proofs.example/btc-100k.json";

struct Harness {
    registry: MockRegistry,
    source: StaticProofSource,
    market: MockMarket,
}

impl Harness {
    fn new() -> Self {
        Self {
            registry: MockRegistry::new(),
            source: StaticProofSource::new(),
            market: MockMarket::new(),
        }
    }

    fn orchestrator(
        &self,
        config: ResolverConfig,
    ) -> ResolutionOrchestrator<MockRegistry, StaticProofSource, MockMarket> {
        ResolutionOrchestrator::new(
            self.registry.clone(),
            self.source.clone(),
            self.market.clone(),
            config,
        )
    }

    /// Publish a package at the proof URI and mark the request fulfilled with its root
    fn publish(&self, market_id: &str, package: ProofPackage) {
        let uri = format!("https://proofs.example/{}.json", market_id);
        let root = package.chain_root_hash.clone();
        self.source.add_uri(uri.clone(), package);
        self.registry
            .add_request(ProofRequest::pending(AGENT, market_id).fulfill(uri, root));
    }
}

fn signer() -> ProofSigner {
    ProofSigner::from_seed(&[42u8; 32])
}

fn structured_yes() -> ProofPackage {
    let mut store = LogStore::new();
    store.append("watching BTC", LogCategory::System, None, "2025-01-01T00:00:00.000Z");
    store.append(
        "final report",
        LogCategory::AgentSpeech,
        Some(json!({"outcome": "YES", "reason": "BTC closed above 100k"})),
        "2025-01-01T00:00:01.000Z",
    );
    store.append("SOLD remaining", LogCategory::ToolUse, None, "2025-01-01T00:00:02.000Z");
    signer().build_package(store.entries())
}

fn single_keyword() -> ProofPackage {
    let mut store = LogStore::new();
    store.append("bought SOL", LogCategory::ToolUse, None, "2025-01-01T00:00:00.000Z");
    signer().build_package(store.entries())
}

fn no_signal() -> ProofPackage {
    let mut store = LogStore::new();
    store.append("hello world", LogCategory::Public, None, "2025-01-01T00:00:00.000Z");
    signer().build_package(store.entries())
}

#[tokio::test]
async fn test_resolves_structured_outcome() {
    let h = Harness::new();
    h.publish(MARKET, structured_yes());

    let resolution = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap();

    assert_eq!(resolution.outcome, Outcome::Yes);
    assert_eq!(resolution.confidence, Confidence::High);
    assert_eq!(resolution.reason, "BTC closed above 100k");
    assert!(resolution.warnings.is_empty(), "{:?}", resolution.warnings);
    assert!(resolution.resolution_signature.contains(MARKET));
    assert_eq!(h.market.outcome(MARKET), Some(Outcome::Yes));
}

#[tokio::test]
async fn test_not_requested() {
    let h = Harness::new();
    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::NotRequested { .. }));
    assert_eq!(h.source.call_count(), 0);
}

#[tokio::test]
async fn test_unfulfilled_request_never_fetches() {
    let h = Harness::new();
    h.source.add_uri(PROOF_URI, structured_yes());
    h.registry.add_request(ProofRequest::pending(AGENT, MARKET));

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not yet fulfilled"));
    assert!(err.is_retryable());
    assert_eq!(h.source.call_count(), 0);
    assert_eq!(h.market.call_count(), 0);
}

#[tokio::test]
async fn test_agent_endpoint_receives_payment_token() {
    let h = Harness::new();
    let package = structured_yes();
    let root = package.chain_root_hash.clone();
    h.source.add_agent("http://agent.local:4000", package);
    h.registry.add_agent(AgentRecord {
        address: AGENT.into(),
        name: "degen".into(),
        url: "http://agent.local:4000".into(),
    });
    h.registry
        .add_request(ProofRequest::pending(AGENT, MARKET).fulfill("", root));

    let config = ResolverConfig {
        payment_token: Some("paid-123".into()),
        ..ResolverConfig::default()
    };
    let resolution = h
        .orchestrator(config)
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap();

    assert_eq!(resolution.outcome, Outcome::Yes);
    assert_eq!(h.source.credentials_seen(), vec![Some("paid-123".to_string())]);
}

#[tokio::test]
async fn test_missing_agent_endpoint() {
    let h = Harness::new();
    h.registry
        .add_request(ProofRequest::pending(AGENT, MARKET).fulfill("", None));

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::NoEndpoint(_)));
    assert_eq!(err.kind(), ErrorKind::Collaborator);
}

#[tokio::test]
async fn test_fetch_failure_is_collaborator() {
    let h = Harness::new();
    h.registry
        .add_request(ProofRequest::pending(AGENT, MARKET).fulfill(PROOF_URI, None));

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Fetch {
            kind: ErrorKind::Collaborator,
            ..
        }
    ));
    assert!(err.is_retryable());
    assert!(err.to_string().contains(PROOF_URI));
}

/// Source whose endpoint answers 200 with a body that is not a proof package
#[derive(Clone, Default)]
struct UndecodableSource {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProofSource for UndecodableSource {
    type Error = ClientError;

    async fn fetch_uri(&self, _uri: &str) -> Result<ProofPackage, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::InvalidResponse(
            "expected value at line 1 column 1".into(),
        ))
    }

    async fn fetch_from_agent(
        &self,
        base_url: &str,
        _market_id: &str,
        _credential: Option<&str>,
    ) -> Result<ProofPackage, Self::Error> {
        self.fetch_uri(base_url).await
    }
}

#[tokio::test]
async fn test_undecodable_proof_is_structural_and_final() {
    let registry = MockRegistry::new();
    registry.add_request(ProofRequest::pending(AGENT, MARKET).fulfill(PROOF_URI, None));
    let source = UndecodableSource::default();
    let market = MockMarket::new();

    let config = ResolverConfig {
        max_attempts: 0,
        targets: vec![ResolutionTarget::new(AGENT, MARKET)],
        ..ResolverConfig::default()
    };
    let orchestrator = Arc::new(ResolutionOrchestrator::new(
        registry,
        source.clone(),
        market.clone(),
        config,
    ));

    let err = orchestrator
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("Invalid proof response"));

    // The worker gives up on it at once even with unlimited attempts
    let mut worker = ResolutionWorker::new(orchestrator).with_interval(Duration::from_millis(1));
    worker.run_cycles(3).await;
    assert!(worker.pending().is_empty());
    assert_eq!(worker.metrics().failures[&ErrorKind::Structural], 1);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(market.call_count(), 0);
}

#[tokio::test]
async fn test_registry_failure_preserves_message() {
    let h = Harness::new();
    h.registry.fail_with("rpc node unreachable");

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert!(err.to_string().contains("rpc node unreachable"));
}

#[tokio::test]
async fn test_empty_proof_is_structural() {
    let h = Harness::new();
    h.publish(MARKET, signer().build_package(vec![]));

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err, ResolutionError::Structural("Proof contains no log entries".into()));
    assert_eq!(h.market.call_count(), 0);
}

#[tokio::test]
async fn test_tampered_chain_blocks_resolution() {
    let h = Harness::new();
    let mut package = structured_yes();
    package.logs[1].details = Some(json!({"outcome": "NO"}));
    h.publish(MARKET, package);

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();

    match &err {
        ResolutionError::Integrity(errors) => {
            assert!(errors.iter().any(|e| e.starts_with("Entry 1:")))
        }
        other => panic!("expected Integrity, got {:?}", other),
    }
    assert_eq!(h.market.call_count(), 0);
}

#[tokio::test]
async fn test_foreign_key_is_authenticity_failure() {
    let h = Harness::new();
    let mut package = structured_yes();
    package.agent_public_key = Some(ProofSigner::from_seed(&[1u8; 32]).public_key());
    h.publish(MARKET, package);

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authenticity);
}

#[tokio::test]
async fn test_unsigned_proof_rejected_by_default() {
    let h = Harness::new();
    let signed = structured_yes();
    h.publish(MARKET, ProofPackage::unsigned(signed.logs));

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authenticity);
    assert!(err.to_string().contains("unsigned"));
}

#[tokio::test]
async fn test_unsigned_proof_accepted_when_lenient() {
    let h = Harness::new();
    let signed = structured_yes();
    h.publish(MARKET, ProofPackage::unsigned(signed.logs));

    let resolution = h
        .orchestrator(ResolverConfig::lenient())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap();
    assert!(resolution.warnings.iter().any(|w| w.contains("unsigned")));
    assert!(resolution.warnings.iter().any(|w| w.contains("No committed log root")));
}

#[tokio::test]
async fn test_committed_root_mismatch() {
    let h = Harness::new();
    h.source.add_uri(PROOF_URI, structured_yes());
    h.registry.add_request(
        ProofRequest::pending(AGENT, MARKET).fulfill(PROOF_URI, Some("ab".repeat(32))),
    );

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Integrity);
    assert!(err.to_string().contains("Committed log root"));
}

#[tokio::test]
async fn test_null_outcome_is_inference_gap() {
    let h = Harness::new();
    h.publish(MARKET, no_signal());

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InferenceGap);
    assert!(err.to_string().starts_with("Unable to determine outcome from logs"));
    assert_eq!(h.market.call_count(), 0);
}

#[tokio::test]
async fn test_low_confidence_passes_with_warning() {
    let h = Harness::new();
    h.publish(MARKET, single_keyword());

    let resolution = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap();

    assert_eq!(resolution.outcome, Outcome::Yes);
    assert_eq!(resolution.confidence, Confidence::Low);
    assert!(resolution.low_confidence_warning().is_some());
    assert!(resolution.warnings.iter().any(|w| w.contains("low confidence")));
    assert_eq!(h.market.outcome(MARKET), Some(Outcome::Yes));
}

#[tokio::test]
async fn test_confidence_floor() {
    let h = Harness::new();
    h.publish(MARKET, single_keyword());

    let err = h
        .orchestrator(ResolverConfig::strict())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::BelowMinimumConfidence {
            confidence: Confidence::Low,
            minimum: Confidence::Medium,
            ..
        }
    ));
    assert_eq!(h.market.call_count(), 0);
}

#[tokio::test]
async fn test_second_resolution_surfaces_market_error() {
    let h = Harness::new();
    h.publish(MARKET, structured_yes());
    let orchestrator = h.orchestrator(ResolverConfig::default());

    orchestrator.auto_resolve_from_proof(AGENT, MARKET).await.unwrap();
    let err = orchestrator
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::AlreadyResolved { .. }));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("already resolved"));
}

#[tokio::test]
async fn test_market_failure_stays_retryable() {
    let h = Harness::new();
    h.publish(MARKET, structured_yes());
    h.market.fail_with("rpc timeout");

    let err = h
        .orchestrator(ResolverConfig::default())
        .auto_resolve_from_proof(AGENT, MARKET)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Resolve {
            kind: ErrorKind::Collaborator,
            ..
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_worker_drops_market_resolved_elsewhere() {
    let h = Harness::new();
    h.publish(MARKET, structured_yes());
    let orchestrator = Arc::new(h.orchestrator(ResolverConfig::default()));

    // Someone else settles the market first
    orchestrator.auto_resolve_from_proof(AGENT, MARKET).await.unwrap();

    let mut worker = ResolutionWorker::new(orchestrator).with_interval(Duration::from_millis(1));
    worker.add_target(ResolutionTarget::new(AGENT, MARKET));
    worker.add_target(ResolutionTarget::new(AGENT, MARKET));
    assert_eq!(worker.pending().len(), 1);

    let reports = worker.sweep().await;
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].retained);
    assert!(worker.pending().is_empty());
    assert_eq!(h.market.call_count(), 2);
}

#[tokio::test]
async fn test_worker_settles_targets() {
    let h = Harness::new();
    h.publish("resolves", structured_yes());
    h.publish("no-signal", no_signal());
    h.registry
        .add_request(ProofRequest::pending(AGENT, "waiting"));

    let config = ResolverConfig {
        max_attempts: 2,
        targets: vec![
            ResolutionTarget::new(AGENT, "resolves"),
            ResolutionTarget::new(AGENT, "no-signal"),
            ResolutionTarget::new(AGENT, "waiting"),
        ],
        ..ResolverConfig::default()
    };
    let mut worker = ResolutionWorker::new(Arc::new(h.orchestrator(config)))
        .with_interval(Duration::from_millis(1));

    let reports = worker.sweep().await;
    assert_eq!(reports.len(), 3);
    assert_eq!(worker.pending(), vec![ResolutionTarget::new(AGENT, "waiting")]);
    assert_eq!(worker.metrics().successes, 1);
    assert_eq!(worker.metrics().failures[&ErrorKind::InferenceGap], 1);

    // Second attempt exhausts the unfulfilled target
    worker.run_cycles(5).await;
    assert!(worker.pending().is_empty());
    assert_eq!(worker.metrics().attempts, 4);
    assert_eq!(worker.metrics().cycle_count, 2);
}
