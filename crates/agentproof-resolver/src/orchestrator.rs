//! The resolution state machine
//!
//! ```text
//! FetchRequest → CheckFulfilled → FetchProof → Validate → Verify → ParseOutcome → Resolve
//! ```
//!
//! Linear with no branching back. Every step either advances or ends the attempt
//! with a [`ResolutionError`]; nothing here retries, sleeps or times out.

use crate::{ResolutionError, ResolverConfig};
use agentproof_chain::ChainVerifier;
use agentproof_domain::traits::{MarketResolver, ProofRegistry, ProofSource};
use agentproof_domain::{Classify, Confidence, ErrorKind, Outcome, ProofPackage, ProofRequest};
use agentproof_parser::OutcomeParser;
use agentproof_validator::{ProofValidator, ValidationConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Successful resolution of one market
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Outcome submitted to the market
    pub outcome: Outcome,
    /// Confidence of the inferred outcome
    pub confidence: Confidence,
    /// Parser's explanation
    pub reason: String,
    /// Identifier returned by the market resolution call
    pub resolution_signature: String,
    /// Advisory findings from verification and parsing
    pub warnings: Vec<String>,
}

impl Resolution {
    /// Warning to surface when the outcome rests on a weak signal
    pub fn low_confidence_warning(&self) -> Option<String> {
        (self.confidence == Confidence::Low).then(|| {
            format!(
                "Resolved with low confidence; review recommended ({})",
                self.reason
            )
        })
    }
}

/// Drives a proof request through to an on-chain resolution
///
/// Holds no per-invocation state; share it behind an `Arc` to resolve several
/// markets concurrently.
pub struct ResolutionOrchestrator<R, S, M> {
    registry: R,
    source: S,
    market: M,
    validator: ProofValidator,
    verifier: ChainVerifier,
    parser: OutcomeParser,
    config: ResolverConfig,
}

impl<R, S, M> ResolutionOrchestrator<R, S, M>
where
    R: ProofRegistry,
    S: ProofSource,
    M: MarketResolver,
{
    /// Create an orchestrator over the given collaborators
    pub fn new(registry: R, source: S, market: M, config: ResolverConfig) -> Self {
        // Missing signatures are an authenticity failure, reported by `verify`
        let validator = ProofValidator::new(ValidationConfig {
            require_signature: false,
            max_logs: config.max_logs,
            require_entry_hashes: false,
        });
        let parser = OutcomeParser::with_config(&config.parser);
        Self {
            registry,
            source,
            market,
            validator,
            verifier: ChainVerifier::new(),
            parser,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run the full flow for one (agent, market) pair
    pub async fn auto_resolve_from_proof(
        &self,
        agent: &str,
        market_id: &str,
    ) -> Result<Resolution, ResolutionError> {
        info!(%agent, %market_id, "starting resolution from proof");

        // 1. FetchRequest
        let request = self
            .registry
            .proof_request(agent, market_id)
            .await
            .map_err(|e| ResolutionError::Registry(e.to_string()))?
            .ok_or_else(|| ResolutionError::NotRequested {
                agent: agent.to_string(),
                market_id: market_id.to_string(),
            })?;

        // 2. CheckFulfilled
        if !request.fulfilled {
            debug!(%agent, %market_id, "proof request not yet fulfilled");
            return Err(ResolutionError::NotFulfilled {
                agent: agent.to_string(),
                market_id: market_id.to_string(),
            });
        }

        // 3. FetchProof
        let package = self.fetch_proof(&request).await?;
        debug!(entries = package.logs.len(), signed = package.is_signed(), "proof fetched");

        // 4. Validate
        let validation = self.validator.validate_proof_structure(&package);
        if !validation.valid {
            let message = validation.error.unwrap_or_default();
            warn!(%market_id, error = %message, "proof failed structural validation");
            return Err(ResolutionError::Structural(message));
        }

        // 5. Verify
        let mut warnings = self.verify(&request, &package)?;

        // 6. ParseOutcome
        let parsed = self.parser.parse_outcome_from_logs(&package.logs);
        let outcome = match parsed.outcome {
            Some(outcome) => outcome,
            None => {
                warn!(%market_id, reason = %parsed.reason, "no outcome in logs");
                return Err(ResolutionError::InferenceGap {
                    reason: parsed.reason,
                });
            }
        };
        if parsed.confidence < self.config.min_confidence {
            return Err(ResolutionError::BelowMinimumConfidence {
                confidence: parsed.confidence,
                minimum: self.config.min_confidence,
                reason: parsed.reason,
            });
        }
        if parsed.confidence == Confidence::Low {
            warn!(%market_id, %outcome, reason = %parsed.reason, "resolving on low-confidence outcome");
        }

        // 7. Resolve
        let resolution_signature = self
            .market
            .resolve(market_id, outcome)
            .await
            .map_err(|e| {
                if e.is_already_resolved() {
                    ResolutionError::AlreadyResolved {
                        market_id: market_id.to_string(),
                        message: e.to_string(),
                    }
                } else {
                    ResolutionError::Resolve {
                        kind: e.kind(),
                        message: e.to_string(),
                    }
                }
            })?;

        let mut resolution = Resolution {
            outcome,
            confidence: parsed.confidence,
            reason: parsed.reason,
            resolution_signature,
            warnings: Vec::new(),
        };
        if let Some(low) = resolution.low_confidence_warning() {
            warnings.push(low);
        }
        resolution.warnings = warnings;

        info!(
            %market_id,
            outcome = %resolution.outcome,
            confidence = %resolution.confidence,
            signature = %resolution.resolution_signature,
            "market resolved"
        );
        Ok(resolution)
    }

    async fn fetch_proof(&self, request: &ProofRequest) -> Result<ProofPackage, ResolutionError> {
        if let Some(uri) = request.proof_uri() {
            debug!(%uri, "fetching published proof");
            return self
                .source
                .fetch_uri(uri)
                .await
                .map_err(fetch_error);
        }

        let record = self
            .registry
            .agent(&request.agent)
            .await
            .map_err(|e| ResolutionError::Registry(e.to_string()))?
            .filter(|record| !record.url.is_empty())
            .ok_or_else(|| ResolutionError::NoEndpoint(request.agent.clone()))?;

        debug!(url = %record.url, "fetching proof from agent endpoint");
        self.source
            .fetch_from_agent(
                &record.url,
                &request.market_id,
                self.config.payment_token.as_deref(),
            )
            .await
            .map_err(fetch_error)
    }

    /// Strict verification; returns advisory warnings on success
    fn verify(
        &self,
        request: &ProofRequest,
        package: &ProofPackage,
    ) -> Result<Vec<String>, ResolutionError> {
        let (mut warnings, computed_root) = if !package.is_signed() && !self.config.require_signature
        {
            let report = self.verifier.verify_chain_integrity(&package.logs);
            if !report.valid {
                return Err(ResolutionError::Integrity(report.errors));
            }
            let mut warnings = report.warnings;
            warnings.push("Proof is unsigned; authenticity not checked".to_string());
            (warnings, self.verifier.calculate_chain_root_hash(&package.logs))
        } else {
            let verification = self.verifier.verify_package(package);
            match verification.failure_kind() {
                None => {}
                Some(ErrorKind::Integrity) => {
                    return Err(ResolutionError::Integrity(verification.errors))
                }
                Some(_) => return Err(ResolutionError::Authenticity(verification.errors)),
            }
            (verification.warnings, verification.computed_root)
        };

        if let Some(committed) = request.log_root.as_deref().filter(|r| !r.is_empty()) {
            if !committed.eq_ignore_ascii_case(&computed_root) {
                return Err(ResolutionError::Integrity(vec![format!(
                    "Committed log root {} does not match proof root {}",
                    committed, computed_root
                )]));
            }
        } else {
            warnings.push("No committed log root on the proof request".to_string());
        }

        Ok(warnings)
    }
}

fn fetch_error<E: std::fmt::Display + Classify>(e: E) -> ResolutionError {
    ResolutionError::Fetch {
        kind: e.kind(),
        message: e.to_string(),
    }
}
