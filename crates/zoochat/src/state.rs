//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached through repository trait objects and
//! the backend is picked at compile time via feature flags.

use std::sync::Arc;

use uuid::Uuid;
use zoochat_auth::{AuthConfig, AuthState};
use zoochat_core::conversation::ChatResponder;
use zoochat_core::storage::{
    AssistantRepository, ConversationRepository, GuardrailRepository, RepositoryError,
    UserDetailsRepository, UserRepository,
};

use crate::config::Config;
use crate::responders;

/// Shared application state.
///
/// Cloned for each request handler. Every repository handle usually points
/// at the same backend instance.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub user_details: Arc<dyn UserDetailsRepository>,
    pub assistants: Arc<dyn AssistantRepository>,
    pub guardrails: Arc<dyn GuardrailRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    /// Produces assistant replies.
    pub responder: Arc<dyn ChatResponder>,
    /// Token verification and user lookup for the auth extractors.
    pub auth: AuthState,
    pub config: Arc<Config>,
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

impl AppState {
    /// Builds the state around one backend that implements every repository.
    fn with_backend<R>(
        repo: R,
        responder: Arc<dyn ChatResponder>,
        auth_config: AuthConfig,
        config: Config,
    ) -> Self
    where
        R: UserRepository
            + UserDetailsRepository
            + AssistantRepository
            + GuardrailRepository
            + ConversationRepository
            + 'static,
    {
        let repo = Arc::new(repo);
        let users: Arc<dyn UserRepository> = repo.clone();

        Self {
            auth: AuthState::new(users.clone(), auth_config),
            users,
            user_details: repo.clone(),
            assistants: repo.clone(),
            guardrails: repo.clone(),
            conversations: repo,
            responder,
            config: Arc::new(config),
        }
    }

    /// Creates the state for the configured backend.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: Config, auth_config: AuthConfig) -> anyhow::Result<Self> {
        use crate::storage::InMemoryRepository;

        let responder = responders::from_config(&config)?;
        tracing::info!("Using in-memory storage");
        Ok(Self::with_backend(
            InMemoryRepository::new(),
            responder,
            auth_config,
            config,
        ))
    }

    /// Creates the state for the configured backend.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: Config, auth_config: AuthConfig) -> anyhow::Result<Self> {
        use crate::storage::DynamoDbRepository;

        let responder = responders::from_config(&config)?;
        let repo = DynamoDbRepository::from_env(config.table_name.clone()).await;
        tracing::info!(table = repo.table_name(), "Using DynamoDB storage");
        Ok(Self::with_backend(repo, responder, auth_config, config))
    }

    /// In-memory state with the default configuration, for tests.
    #[cfg(test)]
    pub fn in_memory(auth_config: AuthConfig) -> Self {
        use crate::responders::ScriptedResponder;
        use crate::storage::InMemoryRepository;

        Self::with_backend(
            InMemoryRepository::new(),
            Arc::new(ScriptedResponder),
            auth_config,
            Config::default(),
        )
    }

    /// Replaces the chat responder.
    #[cfg(test)]
    pub fn with_responder(mut self, responder: Arc<dyn ChatResponder>) -> Self {
        self.responder = responder;
        self
    }

    #[cfg(test)]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Round-trips to the storage backend.
    ///
    /// Looks up a user that never exists, so only connectivity is measured.
    pub async fn check_storage(&self) -> Result<(), RepositoryError> {
        self.users.get_user(Uuid::nil()).await.map(|_| ())
    }
}
