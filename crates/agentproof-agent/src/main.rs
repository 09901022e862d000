//! agentproof Agent CLI
//!
//! Starts the agent HTTP server that serves signed log proofs.

use agentproof_agent::{config::AgentConfig, start_server, AgentError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), AgentError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        AgentConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: agentproof-agent --config <path-to-config.toml>");
        eprintln!();
        AgentConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("agentproof Agent - Signed log proof server");
    println!();
    println!("USAGE:");
    println!("    agentproof-agent --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 4000)");
    println!("    - signing_key: Ed25519 seed (64 hex chars or base58)");
    println!("    - agent_name: Name reported by /health (default: 'agent')");
    println!("    - capacity: Maximum retained entries (default: unbounded)");
    println!("    - proof_requires_payment: Require Authorization on /proof");
    println!();
    println!("    Log verbosity follows RUST_LOG (default: info).");
    println!();
}
