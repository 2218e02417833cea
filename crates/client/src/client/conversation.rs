//! Conversation API operations.

use reqwest::Method;
use uuid::Uuid;
use zoochat_core::conversation::{
    ConversationSummary, ConvoHistoryQuery, ConvoHistoryResponse, ConvoTurnRequest,
    ConvoTurnResponse,
};

use super::ZoochatClient;
use crate::error::{ClientError, Result};

impl ZoochatClient {
    /// Send one message to an assistant.
    pub async fn convo_turn(&self, req: &ConvoTurnRequest) -> Result<ConvoTurnResponse> {
        if req.message.trim().is_empty() {
            return Err(ClientError::InvalidInput("message must not be empty".into()));
        }
        let response = self
            .request(Method::POST, "/api/convo_turn")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch a conversation's turns, oldest first.
    pub async fn convo_history(&self, query: &ConvoHistoryQuery) -> Result<ConvoHistoryResponse> {
        let response = self
            .request(Method::GET, "/api/convo_history")
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a conversation.
    pub async fn delete_convo_history(&self, conversation_id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, "/api/convo_history")
            .query(&[("conversation_id", conversation_id)])
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// The caller's conversations, most recent first.
    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let response = self
            .request(Method::GET, "/api/conversations")
            .send()
            .await?;
        self.handle_response(response).await
    }
}
