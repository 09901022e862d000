//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use agentproof_chain::ChainVerifier;
use agentproof_client::HttpProofSource;
use agentproof_domain::traits::ProofSource;
use agentproof_domain::ProofPackage;
use std::fs;
use std::time::Duration;

/// Execute the fetch command.
pub async fn execute_fetch(args: FetchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs));
    let source = HttpProofSource::new(timeout)?;
    let token = args
        .token
        .clone()
        .or_else(|| config.resolver.payment_token.clone());

    let package = fetch_package(&source, &args, token.as_deref()).await?;
    eprintln!(
        "{}",
        formatter.info(&format!("Fetched {} log entries", package.logs.len()))
    );

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&package)?)?;
        eprintln!("{}", formatter.success(&format!("Saved proof to {}", path)));
    }

    println!("{}", formatter.format_entries(&package.logs)?);
    let verification = ChainVerifier::new().verify_package(&package);
    println!("{}", formatter.format_verification(&verification)?);

    Ok(())
}

/// Fetch from the agent endpoint when a market is given, else treat the URL as a proof URI.
pub async fn fetch_package<S: ProofSource>(
    source: &S,
    args: &FetchArgs,
    token: Option<&str>,
) -> std::result::Result<ProofPackage, S::Error> {
    match &args.market {
        Some(market_id) => source.fetch_from_agent(&args.url, market_id, token).await,
        None => source.fetch_uri(&args.url).await,
    }
}
