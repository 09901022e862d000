//! HTTP request handlers for the agent proof server.
//!
//! Serves the agent's hash-chained log and signed proof packages using axum.

use agentproof_chain::{LogStore, ProofSigner};
use agentproof_domain::{LogCategory, LogEntry, ProofPackage};
use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The agent's log
    pub store: Arc<RwLock<LogStore>>,
    /// Key used to sign chain roots
    pub signer: Arc<ProofSigner>,
    /// Name reported by the health endpoint
    pub agent_name: Arc<str>,
    /// Require an `Authorization` header on `GET /proof`
    pub proof_requires_payment: bool,
}

impl AppState {
    /// Create state around an existing store
    pub fn new(store: LogStore, signer: ProofSigner, agent_name: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            signer: Arc::new(signer),
            agent_name: agent_name.into(),
            proof_requires_payment: false,
        }
    }

    /// Require payment for proofs
    pub fn with_paid_proofs(mut self, required: bool) -> Self {
        self.proof_requires_payment = required;
        self
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: String,
    /// Agent name
    pub agent: String,
    /// Entries currently retained
    pub entries: usize,
    /// Base58 public key proofs are signed with
    pub public_key: String,
}

/// Query for `GET /proof`
#[derive(Debug, Deserialize)]
pub struct ProofQuery {
    /// Market the proof is requested for
    pub market_id: String,
}

/// Response for `GET /api/logs`
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Retained entries, oldest first
    pub logs: Vec<LogEntry>,
    /// Whether premium entries were redacted
    pub redacted: bool,
    /// Whether older entries were evicted
    pub truncated: bool,
}

/// Body for `POST /api/logs`
#[derive(Debug, Deserialize)]
pub struct AppendRequest {
    /// Entry text
    pub message: String,
    /// Entry category; defaults to `public`
    #[serde(rename = "type", default)]
    pub category: Option<LogCategory>,
    /// Structured payload
    #[serde(default)]
    pub details: Option<Value>,
}

/// Body of a 402 response
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentRequiredResponse {
    /// Short error name
    pub error: String,
    /// Human-readable explanation
    pub message: String,
    /// Always true
    pub payment_required: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Caller must pay for this resource
    PaymentRequired(String),
    /// Malformed request
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::PaymentRequired(message) => {
                let body = Json(PaymentRequiredResponse {
                    error: "Payment Required".to_string(),
                    message,
                    payment_required: true,
                });
                (StatusCode::PAYMENT_REQUIRED, body).into_response()
            }
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
            }
        }
    }
}

/// Presence-only check; this layer does not validate payment tokens
fn has_credential(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty())
}

/// GET /health - Liveness and identity
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let entries = state.store.read().await.len();
    Json(HealthResponse {
        status: "healthy".to_string(),
        agent: state.agent_name.to_string(),
        entries,
        public_key: state.signer.public_key(),
    })
}

/// GET /proof?market_id=<id> - Signed proof over the full retained log
async fn get_proof(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ProofQuery>,
) -> Result<Json<ProofPackage>, AppError> {
    if state.proof_requires_payment && !has_credential(&headers) {
        return Err(AppError::PaymentRequired(format!(
            "Proof for market {} requires payment",
            query.market_id
        )));
    }

    let entries = state.store.read().await.entries();
    let package = state.signer.build_package(entries);
    info!(
        market_id = %query.market_id,
        entries = package.logs.len(),
        "served signed proof"
    );
    Ok(Json(package))
}

/// GET /api/logs - Log view, premium entries redacted for unpaid readers
async fn list_logs(State(state): State<AppState>, headers: HeaderMap) -> Json<LogsResponse> {
    let paid = has_credential(&headers);
    let store = state.store.read().await;
    Json(LogsResponse {
        logs: store.redacted(paid),
        redacted: !paid,
        truncated: store.is_truncated(),
    })
}

/// POST /api/logs - Append an entry to the chain
async fn append_log(
    State(state): State<AppState>,
    Json(request): Json<AppendRequest>,
) -> Result<(StatusCode, Json<LogEntry>), AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let category = request.category.unwrap_or(LogCategory::Public);
    let entry = state
        .store
        .write()
        .await
        .append_now(request.message, category, request.details);
    debug!(id = %entry.id, "entry appended over http");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/proof", get(get_proof))
        .route("/api/logs", get(list_logs).post(append_log))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        let mut store = LogStore::new();
        store.append("free alpha", LogCategory::Public, None, "2025-01-01T00:00:00.000Z");
        store.append("paid alpha", LogCategory::Premium, None, "2025-01-01T00:00:01.000Z");
        AppState::new(store, ProofSigner::from_seed(&[7u8; 32]), "test-agent")
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.agent, "test-agent");
        assert_eq!(health.entries, 2);
    }

    #[test]
    fn test_credential_presence() {
        let mut headers = HeaderMap::new();
        assert!(!has_credential(&headers));
        headers.insert(AUTHORIZATION, "  ".parse().unwrap());
        assert!(!has_credential(&headers));
        headers.insert(AUTHORIZATION, "Signature abc".parse().unwrap());
        assert!(has_credential(&headers));
    }
}
