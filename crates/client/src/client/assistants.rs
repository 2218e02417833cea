//! Assistant API operations.

use reqwest::Method;
use uuid::Uuid;
use zoochat_core::assistant::{
    Assistant, CreateAssistantRequest, ListAssistantsQuery, UpdateAssistantRequest,
};

use super::ZoochatClient;
use crate::error::Result;

impl ZoochatClient {
    /// List assistants, optionally only the active ones.
    pub async fn list_assistants(&self, query: &ListAssistantsQuery) -> Result<Vec<Assistant>> {
        let response = self
            .request(Method::GET, "/api/assistants")
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new assistant (admin only).
    pub async fn create_assistant(&self, req: &CreateAssistantRequest) -> Result<Assistant> {
        let response = self
            .request(Method::POST, "/api/assistants")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get assistant by ID.
    pub async fn get_assistant(&self, id: Uuid) -> Result<Assistant> {
        let response = self
            .request(Method::GET, &format!("/api/assistants/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an assistant (admin only).
    pub async fn update_assistant(
        &self,
        id: Uuid,
        req: &UpdateAssistantRequest,
    ) -> Result<Assistant> {
        let response = self
            .request(Method::PUT, &format!("/api/assistants/{}", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete assistant by ID (admin only).
    pub async fn delete_assistant(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/assistants/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
