//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `zoochat_core::storage` using DynamoDB.

use std::collections::BTreeSet;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use zoochat_core::assistant::{Assistant, Guardrail};
use zoochat_core::conversation::{summarize_conversations, ConversationSummary, ConversationTurn};
use zoochat_core::storage::{
    AssistantRepository, ConversationRepository, GuardrailRepository, RepositoryError, Result,
    UserDetailsRepository, UserRepository,
};
use zoochat_core::user::{User, UserDetails};

use super::conversions::{
    assistant_to_item, details_to_item, guardrail_to_item, item_to_assistant, item_to_details,
    item_to_guardrail, item_to_turn, item_to_user, turn_to_item, user_to_item, Item,
    ENTITY_TYPE_ASSISTANT, ENTITY_TYPE_GUARDRAIL, ENTITY_TYPE_USER,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_replace_item_error,
};
use super::keys;

/// DynamoDB-based repository implementation.
///
/// Provides async access to DynamoDB storage for all entity types.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository using the AWS SDK default credential chain.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Consistent single-item read.
    async fn get_item(&self, pk: String, sk: String) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    /// Runs a query and follows `LastEvaluatedKey` until every page is read.
    async fn query_all(&self, query: QueryFluentBuilder) -> Result<Vec<Item>> {
        self.query_up_to(query, None).await
    }

    /// Follows `LastEvaluatedKey` until `max` items are collected or the
    /// query is exhausted. A page can stop early at the 1 MB cap, so one
    /// page is never assumed to hold `max` items.
    async fn query_up_to(
        &self,
        query: QueryFluentBuilder,
        max: Option<usize>,
    ) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let page = query
                .clone()
                .set_exclusive_start_key(start_key)
                .set_limit(page_limit(items.len(), max))
                .send()
                .await
                .map_err(map_query_error)?;

            items.extend(page.items.unwrap_or_default());

            match next_start_key(items.len(), max, page.last_evaluated_key) {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        if let Some(max) = max {
            items.truncate(max);
        }
        Ok(items)
    }

    /// Every item of one entity type, oldest first.
    async fn list_by_type(&self, entity_type: &str) -> Result<Vec<Item>> {
        let query = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(keys::GSI2)
            .key_condition_expression("GSI2PK = :pk")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(keys::type_gsi2_pk(entity_type)),
            )
            .scan_index_forward(true);

        self.query_all(query).await
    }

    async fn put_new(&self, item: Item, entity_type: &'static str, id: String) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, entity_type, id))?;

        Ok(())
    }

    async fn replace(&self, item: Item, entity_type: &'static str, id: String) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_replace_item_error(e, entity_type, id))?;

        Ok(())
    }

    async fn delete_existing(
        &self,
        pk: String,
        sk: String,
        entity_type: &'static str,
        id: Uuid,
    ) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, entity_type, id.to_string()))?;

        Ok(())
    }

    /// Turns of one conversation with only their key attributes.
    async fn turn_keys(&self, conversation_id: Uuid) -> Result<Vec<Item>> {
        let query = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :prefix)")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(keys::conversation_pk(conversation_id)),
            )
            .expression_attribute_values(
                ":prefix",
                AttributeValue::S(keys::turn_sk_prefix().to_string()),
            )
            .projection_expression("PK, SK")
            .consistent_read(true);

        self.query_all(query).await
    }

    /// Turns written by one user across all conversations (GSI1).
    async fn user_turns(&self, user_id: Uuid) -> Result<Vec<ConversationTurn>> {
        let query = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(keys::GSI1)
            .key_condition_expression("GSI1PK = :pk AND begins_with(GSI1SK, :prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(keys::turn_gsi1_pk(user_id)))
            .expression_attribute_values(
                ":prefix",
                AttributeValue::S(keys::conversation_gsi1_sk_prefix().to_string()),
            );

        let items = self.query_all(query).await?;
        items.iter().map(item_to_turn).collect()
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let item = self.get_item(keys::user_pk(id), keys::user_sk(id)).await?;
        item.as_ref().map(item_to_user).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(keys::GSI1)
            .key_condition_expression("GSI1PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(keys::user_gsi1_pk(email)))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.first().map(item_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let items = self.list_by_type(ENTITY_TYPE_USER).await?;
        items.iter().map(item_to_user).collect()
    }

    // GSI reads are eventually consistent, so the email check narrows the
    // race window rather than closing it.
    async fn create_user(&self, user: &User) -> Result<()> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }

        self.put_new(user_to_item(user), "User", user.id.to_string())
            .await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        if let Some(existing) = self.get_user_by_email(&user.email).await? {
            if existing.id != user.id {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "User",
                    id: user.email.clone(),
                });
            }
        }

        self.replace(user_to_item(user), "User", user.id.to_string())
            .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.delete_existing(keys::user_pk(id), keys::user_sk(id), "User", id)
            .await
    }
}

// ============================================================================
// UserDetailsRepository implementation
// ============================================================================

#[async_trait]
impl UserDetailsRepository for DynamoDbRepository {
    async fn get_user_details(&self, user_id: Uuid) -> Result<Option<UserDetails>> {
        let item = self
            .get_item(keys::user_pk(user_id), keys::details_sk().to_string())
            .await?;
        item.as_ref().map(item_to_details).transpose()
    }

    async fn upsert_user_details(&self, details: &UserDetails) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(details_to_item(details)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "UserDetails", details.user_id.to_string()))?;

        Ok(())
    }

    async fn delete_user_details(&self, user_id: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::user_pk(user_id)))
            .key("SK", AttributeValue::S(keys::details_sk().to_string()))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, "UserDetails", user_id.to_string()))?;

        Ok(())
    }
}

// ============================================================================
// AssistantRepository implementation
// ============================================================================

#[async_trait]
impl AssistantRepository for DynamoDbRepository {
    async fn get_assistant(&self, id: Uuid) -> Result<Option<Assistant>> {
        let item = self
            .get_item(keys::assistant_pk(id), keys::assistant_sk(id))
            .await?;
        item.as_ref().map(item_to_assistant).transpose()
    }

    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        let items = self.list_by_type(ENTITY_TYPE_ASSISTANT).await?;
        items.iter().map(item_to_assistant).collect()
    }

    async fn create_assistant(&self, assistant: &Assistant) -> Result<()> {
        self.put_new(
            assistant_to_item(assistant),
            "Assistant",
            assistant.id.to_string(),
        )
        .await
    }

    async fn update_assistant(&self, assistant: &Assistant) -> Result<()> {
        self.replace(
            assistant_to_item(assistant),
            "Assistant",
            assistant.id.to_string(),
        )
        .await
    }

    async fn delete_assistant(&self, id: Uuid) -> Result<()> {
        self.delete_existing(keys::assistant_pk(id), keys::assistant_sk(id), "Assistant", id)
            .await
    }
}

// ============================================================================
// GuardrailRepository implementation
// ============================================================================

#[async_trait]
impl GuardrailRepository for DynamoDbRepository {
    async fn get_guardrail(&self, id: Uuid) -> Result<Option<Guardrail>> {
        let item = self
            .get_item(keys::guardrail_pk(id), keys::guardrail_sk(id))
            .await?;
        item.as_ref().map(item_to_guardrail).transpose()
    }

    async fn list_guardrails(&self) -> Result<Vec<Guardrail>> {
        let items = self.list_by_type(ENTITY_TYPE_GUARDRAIL).await?;
        items.iter().map(item_to_guardrail).collect()
    }

    async fn create_guardrail(&self, guardrail: &Guardrail) -> Result<()> {
        self.put_new(
            guardrail_to_item(guardrail),
            "Guardrail",
            guardrail.id.to_string(),
        )
        .await
    }

    async fn update_guardrail(&self, guardrail: &Guardrail) -> Result<()> {
        self.replace(
            guardrail_to_item(guardrail),
            "Guardrail",
            guardrail.id.to_string(),
        )
        .await
    }

    async fn delete_guardrail(&self, id: Uuid) -> Result<()> {
        self.delete_existing(keys::guardrail_pk(id), keys::guardrail_sk(id), "Guardrail", id)
            .await
    }
}

// ============================================================================
// ConversationRepository implementation
// ============================================================================

#[async_trait]
impl ConversationRepository for DynamoDbRepository {
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()> {
        let item = turn_to_item(turn)?;
        self.put_new(
            item,
            "ConversationTurn",
            format!("{}/{}", turn.conversation_id, turn.index),
        )
        .await
    }

    async fn get_turns(
        &self,
        conversation_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationTurn>> {
        let query = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :prefix)")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(keys::conversation_pk(conversation_id)),
            )
            .expression_attribute_values(
                ":prefix",
                AttributeValue::S(keys::turn_sk_prefix().to_string()),
            )
            .consistent_read(true);

        let items = match limit {
            // Newest first, then flipped back to ascending.
            Some(0) => return Ok(Vec::new()),
            Some(limit) => {
                let mut items = self
                    .query_up_to(query.scan_index_forward(false), Some(limit))
                    .await?;
                items.reverse();
                items
            }
            None => self.query_all(query.scan_index_forward(true)).await?,
        };

        items.iter().map(item_to_turn).collect()
    }

    async fn list_conversations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>> {
        let turns = self.user_turns(user_id).await?;
        Ok(summarize_conversations(turns))
    }

    async fn delete_conversation(&self, conversation_id: Uuid) -> Result<usize> {
        let items = self.turn_keys(conversation_id).await?;

        for item in &items {
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .set_key(Some(item.clone()))
                .send()
                .await
                .map_err(|e| {
                    map_delete_item_error(e, "ConversationTurn", conversation_id.to_string())
                })?;
        }

        tracing::debug!(%conversation_id, turns = items.len(), "deleted conversation");
        Ok(items.len())
    }

    async fn delete_conversations_for_user(&self, user_id: Uuid) -> Result<usize> {
        let conversation_ids: BTreeSet<Uuid> = self
            .user_turns(user_id)
            .await?
            .into_iter()
            .map(|turn| turn.conversation_id)
            .collect();

        let mut removed = 0;
        for conversation_id in conversation_ids {
            removed += self.delete_conversation(conversation_id).await?;
        }
        Ok(removed)
    }
}

/// Items still wanted from the next page, or `None` for no cap.
fn page_limit(collected: usize, max: Option<usize>) -> Option<i32> {
    max.map(|max| i32::try_from(max.saturating_sub(collected)).unwrap_or(i32::MAX))
}

/// Where the next page starts, or `None` when paging should stop.
fn next_start_key(
    collected: usize,
    max: Option<usize>,
    last_key: Option<Item>,
) -> Option<Item> {
    if max.is_some_and(|max| collected >= max) {
        return None;
    }
    last_key.filter(|key| !key.is_empty())
}
