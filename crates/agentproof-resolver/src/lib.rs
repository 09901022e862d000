//! agentproof Resolver
//!
//! Turns a fulfilled proof request into a market resolution.
//!
//! # Overview
//!
//! [`ResolutionOrchestrator`] sequences the registry read, proof fetch, structural
//! validation, chain verification, outcome inference and the final market call.
//! Any failure ends the attempt with a [`ResolutionError`] whose
//! [`kind`](ResolutionError::kind) places it in the shared taxonomy.
//!
//! [`ResolutionWorker`] is the scheduled caller: it re-invokes the orchestrator for
//! pending targets on an interval and keeps [`ResolverMetrics`].
//!
//! # Example
//!
//! ```no_run
//! use agentproof_client::{HttpProofSource, MockMarket, MockRegistry};
//! use agentproof_resolver::{ResolutionOrchestrator, ResolverConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = ResolutionOrchestrator::new(
//!     MockRegistry::new(),
//!     HttpProofSource::with_default_timeout()?,
//!     MockMarket::new(),
//!     ResolverConfig::default(),
//! );
//!
//! match orchestrator.auto_resolve_from_proof("AgentPubkey111", "btc-100k").await {
//!     Ok(resolution) => println!("resolved {}", resolution.outcome),
//!     Err(e) => println!("{} failure: {}", e.kind(), e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod orchestrator;
mod worker;

pub use config::{ConfigError, ResolutionTarget, ResolverConfig};
pub use error::ResolutionError;
pub use metrics::ResolverMetrics;
pub use orchestrator::{Resolution, ResolutionOrchestrator};
pub use worker::{AttemptReport, ResolutionWorker};
