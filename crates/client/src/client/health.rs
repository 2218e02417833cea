//! Health check operations.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::ZoochatClient;
use crate::error::{ClientError, Result};

/// Readiness report from `/readyz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub healthy: bool,
    pub latency_ms: u64,
    pub chat_backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ZoochatClient {
    /// Liveness check. Ok when the server answers 200.
    pub async fn livez(&self) -> Result<()> {
        let response = self.request(Method::GET, "/livez").send().await?;
        self.handle_empty_response(response).await
    }

    /// Readiness check. A 503 still carries a report, so it is returned as-is.
    pub async fn readyz(&self) -> Result<Readiness> {
        let response = self.request(Method::GET, "/readyz").send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }
        self.handle_response(response).await
    }
}
