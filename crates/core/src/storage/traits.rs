use async_trait::async_trait;
use uuid::Uuid;

use crate::assistant::{Assistant, Guardrail};
use crate::conversation::{ConversationSummary, ConversationTurn};
use crate::user::{User, UserDetails};

use super::Result;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their (normalized) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Lists all users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Creates a new user. Fails if the id or the email is taken.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user. Fails if the new email belongs to someone else.
    async fn update_user(&self, user: &User) -> Result<()>;

    async fn delete_user(&self, id: Uuid) -> Result<()>;
}

/// Repository for visitor profiles, one per user.
#[async_trait]
pub trait UserDetailsRepository: Send + Sync {
    async fn get_user_details(&self, user_id: Uuid) -> Result<Option<UserDetails>>;

    /// Creates or replaces the profile.
    async fn upsert_user_details(&self, details: &UserDetails) -> Result<()>;

    /// Deletes the profile. Missing profiles are not an error.
    async fn delete_user_details(&self, user_id: Uuid) -> Result<()>;
}

/// Repository for animal assistants.
#[async_trait]
pub trait AssistantRepository: Send + Sync {
    async fn get_assistant(&self, id: Uuid) -> Result<Option<Assistant>>;

    /// Lists all assistants, oldest first.
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    async fn create_assistant(&self, assistant: &Assistant) -> Result<()>;

    async fn update_assistant(&self, assistant: &Assistant) -> Result<()>;

    async fn delete_assistant(&self, id: Uuid) -> Result<()>;
}

/// Repository for guardrails.
#[async_trait]
pub trait GuardrailRepository: Send + Sync {
    async fn get_guardrail(&self, id: Uuid) -> Result<Option<Guardrail>>;

    /// Lists all guardrails, oldest first.
    async fn list_guardrails(&self) -> Result<Vec<Guardrail>>;

    async fn create_guardrail(&self, guardrail: &Guardrail) -> Result<()>;

    async fn update_guardrail(&self, guardrail: &Guardrail) -> Result<()>;

    async fn delete_guardrail(&self, id: Uuid) -> Result<()>;
}

/// Repository for conversation turns.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Appends a turn. Fails with `AlreadyExists` if its index is taken.
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()>;

    /// Gets turns in ascending index order. With `limit`, only the last
    /// `limit` turns are returned (still ascending).
    async fn get_turns(
        &self,
        conversation_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationTurn>>;

    /// Lists the user's conversations, most recent first.
    async fn list_conversations_for_user(&self, user_id: Uuid)
        -> Result<Vec<ConversationSummary>>;

    /// Deletes all turns of a conversation. Returns how many were removed.
    async fn delete_conversation(&self, conversation_id: Uuid) -> Result<usize>;

    /// Deletes every conversation of a user. Returns how many turns were removed.
    async fn delete_conversations_for_user(&self, user_id: Uuid) -> Result<usize>;
}
