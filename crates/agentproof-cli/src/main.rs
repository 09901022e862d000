//! agentproof CLI - Verify agent log proofs and resolve markets from them.

use agentproof_cli::commands;
use agentproof_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> agentproof_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // An explicit config file must load; the default one is optional
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Verify(args) => commands::execute_verify(args, &formatter)?,
        Command::Validate(args) => commands::execute_validate(args, &formatter)?,
        Command::Outcome(args) => {
            commands::execute_outcome(args, &config.resolver.parser, &formatter)?
        }
        Command::Fetch(args) => commands::execute_fetch(args, &config, &formatter).await?,
        Command::Resolve(args) => {
            commands::execute_resolve(args, &config.resolver, &formatter).await?
        }
        Command::Keygen => commands::execute_keygen(&formatter)?,
    }

    Ok(())
}
