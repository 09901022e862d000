//! HTTP proof retrieval
//!
//! Fetches proof packages either from a published URI or straight from an agent's
//! `/proof` endpoint. Paid endpoints take a credential in the
//! `Authorization: Signature <token>` header.

use crate::ClientError;
use agentproof_domain::traits::ProofSource;
use agentproof_domain::ProofPackage;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for proof requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest error body kept in [`ClientError::Http`]
const MAX_ERROR_BODY: usize = 512;

/// Body of a 402 response
#[derive(Deserialize)]
struct PaymentRequiredBody {
    message: Option<String>,
}

/// [`ProofSource`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpProofSource {
    client: reqwest::Client,
}

impl HttpProofSource {
    /// Create a source with the given transport timeout
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a source with the default timeout
    pub fn with_default_timeout() -> Result<Self, ClientError> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    async fn read_package(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<ProofPackage, ClientError> {
        let status = response.status();
        debug!(%url, status = status.as_u16(), "proof response received");

        if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PaymentRequiredBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("{} requires a payment credential", url));
            warn!(%url, "proof endpoint requires payment");
            return Err(ClientError::PaymentRequired(message));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ProofSource for HttpProofSource {
    type Error = ClientError;

    async fn fetch_uri(&self, uri: &str) -> Result<ProofPackage, Self::Error> {
        debug!(%uri, "fetching proof from uri");
        let response = self.client.get(uri).send().await?;
        self.read_package(uri, response).await
    }

    async fn fetch_from_agent(
        &self,
        base_url: &str,
        market_id: &str,
        credential: Option<&str>,
    ) -> Result<ProofPackage, Self::Error> {
        let url = format!("{}/proof", base_url.trim_end_matches('/'));
        debug!(%url, %market_id, paid = credential.is_some(), "fetching proof from agent");

        let mut request = self.client.get(&url).query(&[("market_id", market_id)]);
        if let Some(token) = credential {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Signature {}", token));
        }
        let response = request.send().await?;
        self.read_package(&url, response).await
    }
}
