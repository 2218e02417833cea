//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use zoochat_core::assistant::{Assistant, Guardrail};
use zoochat_core::conversation::{summarize_conversations, ConversationSummary, ConversationTurn};
use zoochat_core::storage::{
    AssistantRepository, ConversationRepository, GuardrailRepository, RepositoryError, Result,
    UserDetailsRepository, UserRepository,
};
use zoochat_core::user::{User, UserDetails};

/// Turns of one conversation, keyed by index.
type Turns = BTreeMap<u32, ConversationTurn>;

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    details: Arc<RwLock<HashMap<Uuid, UserDetails>>>,
    assistants: Arc<RwLock<HashMap<Uuid, Assistant>>>,
    guardrails: Arc<RwLock<HashMap<Uuid, Guardrail>>>,
    conversations: Arc<RwLock<HashMap<Uuid, Turns>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(entity_type: &'static str, id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}

fn already_exists(entity_type: &'static str, id: impl ToString) -> RepositoryError {
    RepositoryError::AlreadyExists {
        entity_type,
        id: id.to_string(),
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(already_exists("User", user.id));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(already_exists("User", &user.email));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(not_found("User", user.id));
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(already_exists("User", &user.email));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Err(not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDetailsRepository for InMemoryRepository {
    async fn get_user_details(&self, user_id: Uuid) -> Result<Option<UserDetails>> {
        let details = self.details.read().await;
        Ok(details.get(&user_id).cloned())
    }

    async fn upsert_user_details(&self, details: &UserDetails) -> Result<()> {
        let mut all = self.details.write().await;
        all.insert(details.user_id, details.clone());
        Ok(())
    }

    async fn delete_user_details(&self, user_id: Uuid) -> Result<()> {
        self.details.write().await.remove(&user_id);
        Ok(())
    }
}

#[async_trait]
impl AssistantRepository for InMemoryRepository {
    async fn get_assistant(&self, id: Uuid) -> Result<Option<Assistant>> {
        let assistants = self.assistants.read().await;
        Ok(assistants.get(&id).cloned())
    }

    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        let assistants = self.assistants.read().await;
        let mut list: Vec<Assistant> = assistants.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_assistant(&self, assistant: &Assistant) -> Result<()> {
        let mut assistants = self.assistants.write().await;
        if assistants.contains_key(&assistant.id) {
            return Err(already_exists("Assistant", assistant.id));
        }
        assistants.insert(assistant.id, assistant.clone());
        Ok(())
    }

    async fn update_assistant(&self, assistant: &Assistant) -> Result<()> {
        let mut assistants = self.assistants.write().await;
        if !assistants.contains_key(&assistant.id) {
            return Err(not_found("Assistant", assistant.id));
        }
        assistants.insert(assistant.id, assistant.clone());
        Ok(())
    }

    async fn delete_assistant(&self, id: Uuid) -> Result<()> {
        let mut assistants = self.assistants.write().await;
        if assistants.remove(&id).is_none() {
            return Err(not_found("Assistant", id));
        }
        Ok(())
    }
}

#[async_trait]
impl GuardrailRepository for InMemoryRepository {
    async fn get_guardrail(&self, id: Uuid) -> Result<Option<Guardrail>> {
        let guardrails = self.guardrails.read().await;
        Ok(guardrails.get(&id).cloned())
    }

    async fn list_guardrails(&self) -> Result<Vec<Guardrail>> {
        let guardrails = self.guardrails.read().await;
        let mut list: Vec<Guardrail> = guardrails.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_guardrail(&self, guardrail: &Guardrail) -> Result<()> {
        let mut guardrails = self.guardrails.write().await;
        if guardrails.contains_key(&guardrail.id) {
            return Err(already_exists("Guardrail", guardrail.id));
        }
        guardrails.insert(guardrail.id, guardrail.clone());
        Ok(())
    }

    async fn update_guardrail(&self, guardrail: &Guardrail) -> Result<()> {
        let mut guardrails = self.guardrails.write().await;
        if !guardrails.contains_key(&guardrail.id) {
            return Err(not_found("Guardrail", guardrail.id));
        }
        guardrails.insert(guardrail.id, guardrail.clone());
        Ok(())
    }

    async fn delete_guardrail(&self, id: Uuid) -> Result<()> {
        let mut guardrails = self.guardrails.write().await;
        if guardrails.remove(&id).is_none() {
            return Err(not_found("Guardrail", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationRepository for InMemoryRepository {
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let turns = conversations.entry(turn.conversation_id).or_default();
        if turns.contains_key(&turn.index) {
            return Err(already_exists(
                "ConversationTurn",
                format!("{}/{}", turn.conversation_id, turn.index),
            ));
        }
        turns.insert(turn.index, turn.clone());
        Ok(())
    }

    async fn get_turns(
        &self,
        conversation_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationTurn>> {
        let conversations = self.conversations.read().await;
        let Some(turns) = conversations.get(&conversation_id) else {
            return Ok(Vec::new());
        };
        let skip = limit.map_or(0, |l| turns.len().saturating_sub(l));
        Ok(turns.values().skip(skip).cloned().collect())
    }

    async fn list_conversations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>> {
        let conversations = self.conversations.read().await;
        let turns: Vec<ConversationTurn> = conversations
            .values()
            .flat_map(|turns| turns.values())
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        Ok(summarize_conversations(turns))
    }

    async fn delete_conversation(&self, conversation_id: Uuid) -> Result<usize> {
        let mut conversations = self.conversations.write().await;
        Ok(conversations
            .remove(&conversation_id)
            .map_or(0, |turns| turns.len()))
    }

    async fn delete_conversations_for_user(&self, user_id: Uuid) -> Result<usize> {
        let mut conversations = self.conversations.write().await;
        let mut removed = 0;
        conversations.retain(|_, turns| {
            let owned = turns.values().any(|t| t.user_id == user_id);
            if owned {
                removed += turns.len();
            }
            !owned
        });
        Ok(removed)
    }
}
