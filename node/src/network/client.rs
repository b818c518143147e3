// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::api::VerifyResponse;
use crate::errors::NodeError;
use crate::registry::Registry;

pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends envelopes to a remote `/verifyV1` endpoint.
#[derive(Debug, Clone)]
pub struct VerifyClient {
    client: Client,
    registry: Registry,
}

impl VerifyClient {
    pub fn new(timeout: Duration, registry: Registry) -> Result<Self, NodeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, registry })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// POST `data` to `endpoint` (the full verification URL) and read the verdict.
    pub async fn verify_v1(&self, data: Vec<u8>, endpoint: &str) -> Result<VerifyResponse, NodeError> {
        let resp = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = resp.status();
        match status {
            StatusCode::OK
            | StatusCode::BAD_REQUEST
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::INTERNAL_SERVER_ERROR => {
                let body = resp.bytes().await?;
                read_verdict(status, &body)
            }
            other => Err(NodeError::Network(format!("Verification request failed: {other}"))),
        }
    }

    /// Send `data` to whichever client is currently registered.
    pub async fn forward(&self, data: Vec<u8>) -> Result<VerifyResponse, NodeError> {
        let endpoint = self.registry.endpoint().await.ok_or(NodeError::NoEndpoint)?;
        tracing::debug!(%endpoint, bytes = data.len(), "Forwarding verification request");
        self.verify_v1(data, &endpoint).await
    }
}

/// A verdict body, or the `{"error": ..}` body of a server that failed
/// before producing one.
fn read_verdict(status: StatusCode, body: &[u8]) -> Result<VerifyResponse, NodeError> {
    if let Ok(verdict) = serde_json::from_slice::<VerifyResponse>(body) {
        return Ok(verdict);
    }
    let message = serde_json::from_slice::<ServerError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|e| format!("unreadable verdict: {e}"));
    Err(NodeError::Network(format!("Verification request failed ({status}): {message}")))
}

#[derive(Deserialize)]
struct ServerError {
    error: String,
}
