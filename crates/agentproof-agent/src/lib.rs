//! agentproof Agent
//!
//! HTTP server that keeps an agent's hash-chained log and hands out signed proofs.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness, agent name, retained entry count, public key
//! - `GET /proof?market_id=<id>` - signed [`ProofPackage`](agentproof_domain::ProofPackage)
//!   over every retained entry; `402` without credentials when proofs are paid
//! - `GET /api/logs` - log view with premium entries redacted for unpaid readers
//! - `POST /api/logs` - append `{message, type, details}`

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use agentproof_chain::LogStore;
use config::AgentConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Agent server error
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

impl AppState {
    /// Build fresh state from configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self, config::ConfigError> {
        let store = match config.capacity {
            Some(capacity) => LogStore::with_capacity(capacity),
            None => LogStore::new(),
        };
        let state = AppState::new(store, config.signer()?, config.agent_name.as_str())
            .with_paid_proofs(config.proof_requires_payment);
        Ok(state)
    }
}

/// Start the agent HTTP server
pub async fn start_server(config: AgentConfig) -> Result<(), AgentError> {
    let state = AppState::from_config(&config)?;

    info!("Starting agentproof agent '{}'", config.agent_name);
    info!("Bind address: {}", config.bind_addr());
    info!("Public key: {}", state.signer.public_key());
    match config.capacity {
        Some(capacity) => info!("Log capacity: {} entries", capacity),
        None => info!("Log capacity: unbounded"),
    }
    if config.proof_requires_payment {
        info!("Proof endpoint requires an Authorization header");
    }

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Agent listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| AgentError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_config() {
        let mut config = AgentConfig::default_test_config();
        config.proof_requires_payment = true;

        let state = AppState::from_config(&config).unwrap();
        assert!(state.proof_requires_payment);
        assert_eq!(&*state.agent_name, "test-agent");
    }
}
