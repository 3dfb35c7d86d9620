//! External attestation of audit digests.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Registers a digest with an external ledger and returns its reference.
#[async_trait]
pub trait Attestor: Send + Sync {
    /// Anchors `digest` on behalf of `source`, returning the external
    /// transaction reference.
    async fn anchor(&self, digest: &str, source: &str) -> EngineResult<String>;
}

#[derive(Debug, Serialize)]
struct AnchorRequest<'a> {
    digest: &'a str,
    source: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnchorResponse {
    #[serde(rename = "txHash")]
    tx_hash: Option<String>,
}

/// Attestor backed by an HTTP anchoring service.
///
/// POSTs `{"digest", "source"}` as JSON and expects a `200` reply carrying
/// `{"txHash": "..."}`.
#[derive(Debug, Clone)]
pub struct HttpAttestor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAttestor {
    /// Creates an attestor posting to `endpoint` with a request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::AttestationFailure {
                message: format!("could not build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The anchoring endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Attestor for HttpAttestor {
    async fn anchor(&self, digest: &str, source: &str) -> EngineResult<String> {
        debug!(endpoint = %self.endpoint, digest = %digest, "Anchoring audit digest");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnchorRequest { digest, source })
            .send()
            .await
            .map_err(|e| EngineError::AttestationFailure {
                message: e.to_string(),
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(EngineError::AttestationFailure {
                message: format!("anchoring service returned {}", response.status()),
            });
        }

        let body: AnchorResponse =
            response
                .json()
                .await
                .map_err(|e| EngineError::AttestationFailure {
                    message: format!("unreadable anchoring reply: {}", e),
                })?;

        body.tx_hash
            .filter(|tx| !tx.is_empty())
            .ok_or_else(|| EngineError::AttestationFailure {
                message: "anchoring reply carried no txHash".to_string(),
            })
    }
}
