use async_trait::async_trait;

use super::error::ChatError;
use super::types::ChatRequest;

/// Produces an assistant reply for an assembled chat request.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ChatError>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}
