//! Guardrail API operations.

use reqwest::Method;
use uuid::Uuid;
use zoochat_core::assistant::{CreateGuardrailRequest, Guardrail, UpdateGuardrailRequest};

use super::ZoochatClient;
use crate::error::Result;

impl ZoochatClient {
    /// List all guardrails.
    pub async fn list_guardrails(&self) -> Result<Vec<Guardrail>> {
        let response = self.request(Method::GET, "/api/guardrails").send().await?;
        self.handle_response(response).await
    }

    /// Create a new guardrail (admin only).
    pub async fn create_guardrail(&self, req: &CreateGuardrailRequest) -> Result<Guardrail> {
        let response = self
            .request(Method::POST, "/api/guardrails")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get guardrail by ID.
    pub async fn get_guardrail(&self, id: Uuid) -> Result<Guardrail> {
        let response = self
            .request(Method::GET, &format!("/api/guardrails/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a guardrail (admin only).
    pub async fn update_guardrail(
        &self,
        id: Uuid,
        req: &UpdateGuardrailRequest,
    ) -> Result<Guardrail> {
        let response = self
            .request(Method::PUT, &format!("/api/guardrails/{}", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete guardrail by ID. Fails with 409 while an assistant uses it.
    pub async fn delete_guardrail(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/guardrails/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
