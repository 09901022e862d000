//! Scheduled re-invocation of the orchestrator
//!
//! The orchestrator never retries. This worker does: on every tick it re-runs each
//! pending target, drops the ones that resolved or failed for a reason that will
//! not change, and keeps the rest for the next tick. A market some other caller
//! already resolved counts as settled and is dropped too.

use crate::{
    Resolution, ResolutionError, ResolutionOrchestrator, ResolutionTarget, ResolverMetrics,
};
use agentproof_domain::traits::{MarketResolver, ProofRegistry, ProofSource};
use std::sync::Arc;
use tokio::time::{interval, Duration};

#[derive(Debug, Clone)]
struct Pending {
    target: ResolutionTarget,
    attempts: u32,
}

/// Outcome of one attempt during a sweep
#[derive(Debug, Clone)]
pub struct AttemptReport {
    /// Target attempted
    pub target: ResolutionTarget,
    /// What happened
    pub result: Result<Resolution, ResolutionError>,
    /// Whether the target stays pending
    pub retained: bool,
}

/// Background worker that resolves configured targets on a schedule
///
/// # Examples
///
/// ```no_run
/// use agentproof_client::{HttpProofSource, MockMarket, MockRegistry};
/// use agentproof_resolver::{ResolutionOrchestrator, ResolutionWorker, ResolverConfig};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ResolverConfig::from_file("resolver.toml")?;
///     let orchestrator = ResolutionOrchestrator::new(
///         MockRegistry::new(),
///         HttpProofSource::with_default_timeout()?,
///         MockMarket::new(),
///         config,
///     );
///     let mut worker = ResolutionWorker::new(Arc::new(orchestrator));
///
///     // Run until every target settles or Ctrl+C
///     worker.run().await;
///     Ok(())
/// }
/// ```
pub struct ResolutionWorker<R, S, M> {
    orchestrator: Arc<ResolutionOrchestrator<R, S, M>>,
    pending: Vec<Pending>,
    interval: Duration,
    max_attempts: u32,
    metrics: ResolverMetrics,
}

impl<R, S, M> ResolutionWorker<R, S, M>
where
    R: ProofRegistry,
    S: ProofSource,
    M: MarketResolver,
{
    /// Create a worker for the targets in the orchestrator's configuration
    pub fn new(orchestrator: Arc<ResolutionOrchestrator<R, S, M>>) -> Self {
        let config = orchestrator.config();
        let pending = config
            .targets
            .iter()
            .cloned()
            .map(|target| Pending {
                target,
                attempts: 0,
            })
            .collect();
        let interval = config.poll_interval();
        let max_attempts = config.max_attempts;
        Self {
            orchestrator,
            pending,
            interval,
            max_attempts,
            metrics: ResolverMetrics::new(),
        }
    }

    /// Override the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Add a target unless it is already pending
    pub fn add_target(&mut self, target: ResolutionTarget) {
        if !self.pending.iter().any(|p| p.target == target) {
            self.pending.push(Pending {
                target,
                attempts: 0,
            });
        }
    }

    /// Targets still waiting to resolve
    pub fn pending(&self) -> Vec<ResolutionTarget> {
        self.pending.iter().map(|p| p.target.clone()).collect()
    }

    /// Metrics collected so far
    pub fn metrics(&self) -> &ResolverMetrics {
        &self.metrics
    }

    /// Attempt every pending target once
    pub async fn sweep(&mut self) -> Vec<AttemptReport> {
        let mut reports = Vec::with_capacity(self.pending.len());
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut pending in std::mem::take(&mut self.pending) {
            pending.attempts += 1;
            let result = self
                .orchestrator
                .auto_resolve_from_proof(&pending.target.agent, &pending.target.market_id)
                .await;

            let retained = match &result {
                Ok(resolution) => {
                    self.metrics.record_success(resolution);
                    false
                }
                Err(error) => {
                    self.metrics.record_failure(error);
                    let exhausted =
                        self.max_attempts > 0 && pending.attempts >= self.max_attempts;
                    if let ResolutionError::AlreadyResolved { .. } = error {
                        tracing::info!(
                            market_id = %pending.target.market_id,
                            "dropping target, market already resolved"
                        );
                    } else if !error.is_retryable() {
                        tracing::warn!(
                            market_id = %pending.target.market_id,
                            kind = %error.kind(),
                            "dropping target: {}",
                            error
                        );
                    } else if exhausted {
                        tracing::warn!(
                            market_id = %pending.target.market_id,
                            attempts = pending.attempts,
                            "dropping target after max attempts: {}",
                            error
                        );
                    } else {
                        tracing::debug!(
                            market_id = %pending.target.market_id,
                            "will retry: {}",
                            error
                        );
                    }
                    error.is_retryable() && !exhausted
                }
            };

            reports.push(AttemptReport {
                target: pending.target.clone(),
                result,
                retained,
            });
            if retained {
                still_pending.push(pending);
            }
        }

        self.pending = still_pending;
        self.metrics.record_cycle();
        reports
    }

    /// Run until every target settles or a shutdown signal (Ctrl+C) arrives
    pub async fn run(&mut self) {
        let mut ticker = interval(self.interval);

        tracing::info!(
            "Resolution worker started ({} targets, interval: {:?})",
            self.pending.len(),
            self.interval
        );

        while !self.pending.is_empty() {
            tokio::select! {
                _ = ticker.tick() => {
                    let reports = self.sweep().await;
                    let resolved = reports.iter().filter(|r| r.result.is_ok()).count();
                    tracing::info!(
                        "Sweep completed: {} attempted, {} resolved, {} pending",
                        reports.len(),
                        resolved,
                        self.pending.len()
                    );
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping resolution worker");
                    break;
                }
            }
        }

        tracing::info!("Resolution worker stopped. Final metrics:\n{}", self.metrics.summary());
    }

    /// Run for a fixed number of cycles (useful for testing)
    pub async fn run_cycles(&mut self, cycles: usize) {
        let mut ticker = interval(self.interval);
        for cycle in 0..cycles {
            if self.pending.is_empty() {
                break;
            }
            ticker.tick().await;
            tracing::debug!("Starting resolution cycle {}/{}", cycle + 1, cycles);
            self.sweep().await;
        }
    }
}
