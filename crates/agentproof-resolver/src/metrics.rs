//! Metrics collection for resolution attempts

use crate::{Resolution, ResolutionError};
use agentproof_domain::{Confidence, ErrorKind, Outcome};
use std::collections::HashMap;

/// Counters kept by the resolution worker
#[derive(Debug, Clone, Default)]
pub struct ResolverMetrics {
    /// Total attempts
    pub attempts: usize,

    /// Attempts that resolved a market
    pub successes: usize,

    /// Failed attempts per error kind
    pub failures: HashMap<ErrorKind, usize>,

    /// Resolved markets per outcome
    pub outcomes: HashMap<Outcome, usize>,

    /// Resolutions that went through on low confidence
    pub low_confidence: usize,

    /// Worker cycles completed
    pub cycle_count: usize,
}

impl ResolverMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful resolution
    pub fn record_success(&mut self, resolution: &Resolution) {
        self.attempts += 1;
        self.successes += 1;
        *self.outcomes.entry(resolution.outcome).or_insert(0) += 1;
        if resolution.confidence == Confidence::Low {
            self.low_confidence += 1;
        }
    }

    /// Record a failed attempt
    pub fn record_failure(&mut self, error: &ResolutionError) {
        self.attempts += 1;
        *self.failures.entry(error.kind()).or_insert(0) += 1;
    }

    /// Record a worker cycle
    pub fn record_cycle(&mut self) {
        self.cycle_count += 1;
    }

    /// Failed attempts across all kinds
    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Resolver Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Cycles: {}", self.cycle_count),
            format!("Attempts: {}", self.attempts),
            format!("Resolved: {} ({} low confidence)", self.successes, self.low_confidence),
        ];

        if !self.outcomes.is_empty() {
            lines.push("Outcomes:".to_string());
            for outcome in [Outcome::Yes, Outcome::No] {
                if let Some(count) = self.outcomes.get(&outcome) {
                    lines.push(format!("  {}: {}", outcome, count));
                }
            }
        }

        if !self.failures.is_empty() {
            lines.push("Failures by kind:".to_string());
            let mut kinds: Vec<_> = self.failures.iter().collect();
            kinds.sort_by_key(|(kind, _)| kind.as_str());
            for (kind, count) in kinds {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_failures()));
        }

        lines.join("\n")
    }
}
