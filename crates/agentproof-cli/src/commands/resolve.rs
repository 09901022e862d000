//! Resolve command implementation.
//!
//! Runs the orchestrator against a local proof file with in-memory collaborators, so
//! nothing is submitted anywhere.

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::input::load_package;
use crate::output::Formatter;
use agentproof_client::{MockMarket, MockRegistry, StaticProofSource};
use agentproof_domain::{ProofPackage, ProofRequest};
use agentproof_resolver::{Resolution, ResolutionOrchestrator, ResolverConfig};

/// Execute the resolve command.
pub async fn execute_resolve(
    args: ResolveArgs,
    resolver_config: &ResolverConfig,
    formatter: &Formatter,
) -> Result<()> {
    let package = load_package(&args.file)?;
    let resolution = dry_run(&args, resolver_config, package).await?;
    println!("{}", formatter.format_resolution(&resolution)?);
    Ok(())
}

/// Resolve `package` as if the agent had submitted it for `args.market`.
pub async fn dry_run(
    args: &ResolveArgs,
    resolver_config: &ResolverConfig,
    package: ProofPackage,
) -> Result<Resolution> {
    let mut config = resolver_config.clone();
    if args.allow_unsigned {
        config.require_signature = false;
    }
    if let Some(min) = args.min_confidence {
        config.min_confidence = min.into();
    }

    let uri = format!("file://{}", args.file);
    let registry = MockRegistry::new();
    registry.add_request(
        ProofRequest::pending(&args.agent, &args.market).fulfill(uri.clone(), args.log_root.clone()),
    );
    let source = StaticProofSource::new();
    source.add_uri(uri, package);

    let orchestrator = ResolutionOrchestrator::new(registry, source, MockMarket::new(), config);
    Ok(orchestrator
        .auto_resolve_from_proof(&args.agent, &args.market)
        .await?)
}
