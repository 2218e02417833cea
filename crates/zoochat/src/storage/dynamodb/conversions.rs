//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use zoochat_core::assistant::{Assistant, Guardrail};
use zoochat_core::conversation::{ConversationTurn, TurnOutcome};
use zoochat_core::storage::RepositoryError;
use zoochat_core::user::{User, UserDetails, UserRole};

use super::keys;

pub type Item = HashMap<String, AttributeValue>;

pub const ENTITY_TYPE_USER: &str = "USER";
pub const ENTITY_TYPE_DETAILS: &str = "DETAILS";
pub const ENTITY_TYPE_ASSISTANT: &str = "ASSISTANT";
pub const ENTITY_TYPE_GUARDRAIL: &str = "GUARDRAIL";
pub const ENTITY_TYPE_TURN: &str = "TURN";

fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

fn n(value: impl ToString) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

fn string_list(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

fn base_item(pk: String, sk: String, entity_type: &str) -> Item {
    let mut item = HashMap::new();
    item.insert("PK".to_string(), s(pk));
    item.insert("SK".to_string(), s(sk));
    item.insert("entityType".to_string(), s(entity_type));
    item
}

fn insert_listing_keys(item: &mut Item, entity_type: &str, created_at: DateTime<Utc>, id: Uuid) {
    item.insert("GSI2PK".to_string(), s(keys::type_gsi2_pk(entity_type)));
    item.insert(
        "GSI2SK".to_string(),
        s(keys::created_gsi2_sk(created_at, id)),
    );
}

// ============================================================================
// User conversions
// ============================================================================

pub fn user_to_item(user: &User) -> Item {
    let mut item = base_item(
        keys::user_pk(user.id),
        keys::user_sk(user.id),
        ENTITY_TYPE_USER,
    );
    item.insert("GSI1PK".to_string(), s(keys::user_gsi1_pk(&user.email)));
    item.insert("GSI1SK".to_string(), s(keys::user_gsi1_sk(user.id)));
    insert_listing_keys(&mut item, ENTITY_TYPE_USER, user.created_at, user.id);

    item.insert("id".to_string(), s(user.id.to_string()));
    item.insert("email".to_string(), s(&user.email));
    item.insert("name".to_string(), s(&user.name));
    item.insert("role".to_string(), s(user.role.to_string()));
    item.insert("passwordHash".to_string(), s(&user.password_hash));
    item.insert("createdAt".to_string(), s(user.created_at.to_rfc3339()));
    item.insert("updatedAt".to_string(), s(user.updated_at.to_rfc3339()));
    item
}

pub fn item_to_user(item: &Item) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_uuid(item, "id")?,
        email: get_string(item, "email")?,
        name: get_string(item, "name")?,
        role: get_parsed::<UserRole>(item, "role")?,
        password_hash: get_string(item, "passwordHash")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// UserDetails conversions
// ============================================================================

pub fn details_to_item(details: &UserDetails) -> Item {
    let mut item = base_item(
        keys::user_pk(details.user_id),
        keys::details_sk().to_string(),
        ENTITY_TYPE_DETAILS,
    );
    item.insert("userId".to_string(), s(details.user_id.to_string()));
    if let Some(age) = details.age {
        item.insert("age".to_string(), n(age));
    }
    item.insert(
        "favoriteAnimals".to_string(),
        string_list(&details.favorite_animals),
    );
    if let Some(notes) = &details.notes {
        item.insert("notes".to_string(), s(notes));
    }
    item.insert("updatedAt".to_string(), s(details.updated_at.to_rfc3339()));
    item
}

pub fn item_to_details(item: &Item) -> Result<UserDetails, RepositoryError> {
    Ok(UserDetails {
        user_id: get_uuid(item, "userId")?,
        age: get_optional_number(item, "age")?,
        favorite_animals: get_string_list(item, "favoriteAnimals")?,
        notes: get_optional_string(item, "notes"),
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Assistant conversions
// ============================================================================

pub fn assistant_to_item(assistant: &Assistant) -> Item {
    let mut item = base_item(
        keys::assistant_pk(assistant.id),
        keys::assistant_sk(assistant.id),
        ENTITY_TYPE_ASSISTANT,
    );
    insert_listing_keys(
        &mut item,
        ENTITY_TYPE_ASSISTANT,
        assistant.created_at,
        assistant.id,
    );

    item.insert("id".to_string(), s(assistant.id.to_string()));
    item.insert("name".to_string(), s(&assistant.name));
    item.insert("species".to_string(), s(&assistant.species));
    item.insert("persona".to_string(), s(&assistant.persona));
    item.insert("greeting".to_string(), s(&assistant.greeting));
    if let Some(guardrail_id) = assistant.guardrail_id {
        item.insert("guardrailId".to_string(), s(guardrail_id.to_string()));
    }
    item.insert("active".to_string(), AttributeValue::Bool(assistant.active));
    item.insert(
        "createdAt".to_string(),
        s(assistant.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        s(assistant.updated_at.to_rfc3339()),
    );
    item
}

pub fn item_to_assistant(item: &Item) -> Result<Assistant, RepositoryError> {
    Ok(Assistant {
        id: get_uuid(item, "id")?,
        name: get_string(item, "name")?,
        species: get_string(item, "species")?,
        persona: get_optional_string(item, "persona").unwrap_or_default(),
        greeting: get_optional_string(item, "greeting").unwrap_or_default(),
        guardrail_id: get_optional_uuid(item, "guardrailId")?,
        active: get_bool(item, "active")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Guardrail conversions
// ============================================================================

pub fn guardrail_to_item(guardrail: &Guardrail) -> Item {
    let mut item = base_item(
        keys::guardrail_pk(guardrail.id),
        keys::guardrail_sk(guardrail.id),
        ENTITY_TYPE_GUARDRAIL,
    );
    insert_listing_keys(
        &mut item,
        ENTITY_TYPE_GUARDRAIL,
        guardrail.created_at,
        guardrail.id,
    );

    item.insert("id".to_string(), s(guardrail.id.to_string()));
    item.insert("name".to_string(), s(&guardrail.name));
    item.insert(
        "blockedTopics".to_string(),
        string_list(&guardrail.blocked_topics),
    );
    if let Some(max) = guardrail.max_message_chars {
        item.insert("maxMessageChars".to_string(), n(max));
    }
    item.insert(
        "refusalMessage".to_string(),
        s(&guardrail.refusal_message),
    );
    item.insert(
        "createdAt".to_string(),
        s(guardrail.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        s(guardrail.updated_at.to_rfc3339()),
    );
    item
}

pub fn item_to_guardrail(item: &Item) -> Result<Guardrail, RepositoryError> {
    Ok(Guardrail {
        id: get_uuid(item, "id")?,
        name: get_string(item, "name")?,
        blocked_topics: get_string_list(item, "blockedTopics")?,
        max_message_chars: get_optional_number(item, "maxMessageChars")?,
        refusal_message: get_string(item, "refusalMessage")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Turn conversions
// ============================================================================

/// Convert a ConversationTurn to a DynamoDB item.
///
/// The outcome is stored as JSON.
pub fn turn_to_item(turn: &ConversationTurn) -> Result<Item, RepositoryError> {
    let mut item = base_item(
        keys::conversation_pk(turn.conversation_id),
        keys::turn_sk(turn.index),
        ENTITY_TYPE_TURN,
    );
    item.insert("GSI1PK".to_string(), s(keys::turn_gsi1_pk(turn.user_id)));
    item.insert(
        "GSI1SK".to_string(),
        s(keys::turn_gsi1_sk(turn.conversation_id, turn.index)),
    );

    item.insert("id".to_string(), s(turn.id.to_string()));
    item.insert(
        "conversationId".to_string(),
        s(turn.conversation_id.to_string()),
    );
    item.insert("userId".to_string(), s(turn.user_id.to_string()));
    item.insert("assistantId".to_string(), s(turn.assistant_id.to_string()));
    item.insert("turnIndex".to_string(), n(turn.index));
    item.insert("userMessage".to_string(), s(&turn.user_message));
    item.insert("assistantReply".to_string(), s(&turn.assistant_reply));

    let outcome_json = serde_json::to_string(&turn.outcome)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    item.insert("outcome".to_string(), s(outcome_json));
    item.insert("createdAt".to_string(), s(turn.created_at.to_rfc3339()));

    Ok(item)
}

pub fn item_to_turn(item: &Item) -> Result<ConversationTurn, RepositoryError> {
    let outcome = match get_optional_string(item, "outcome") {
        Some(json) => serde_json::from_str::<TurnOutcome>(&json)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
        None => TurnOutcome::default(),
    };

    Ok(ConversationTurn {
        id: get_uuid(item, "id")?,
        conversation_id: get_uuid(item, "conversationId")?,
        user_id: get_uuid(item, "userId")?,
        assistant_id: get_uuid(item, "assistantId")?,
        index: get_number(item, "turnIndex")?,
        user_message: get_string(item, "userMessage")?,
        assistant_reply: get_string(item, "assistantReply")?,
        outcome,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))
}

fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn get_parsed<T>(item: &Item, key: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_string(item, key)?;
    raw.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid {key}: {e}")))
}

fn get_uuid(item: &Item, key: &str) -> Result<Uuid, RepositoryError> {
    get_parsed(item, key)
}

fn get_optional_uuid(item: &Item, key: &str) -> Result<Option<Uuid>, RepositoryError> {
    match get_optional_string(item, key) {
        Some(raw) => Uuid::parse_str(&raw)
            .map(Some)
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {key}: {e}"))),
        None => Ok(None),
    }
}

fn get_number<T: FromStr>(item: &Item, key: &str) -> Result<T, RepositoryError> {
    get_optional_number(item, key)?
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))
}

fn get_optional_number<T: FromStr>(item: &Item, key: &str) -> Result<Option<T>, RepositoryError> {
    match item.get(key).and_then(|v| v.as_n().ok()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| RepositoryError::InvalidData(format!("Invalid number {key}: {raw}"))),
        None => Ok(None),
    }
}

fn get_bool(item: &Item, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))
}

/// A missing list reads as empty.
fn get_string_list(item: &Item, key: &str) -> Result<Vec<String>, RepositoryError> {
    let Some(value) = item.get(key) else {
        return Ok(Vec::new());
    };
    let list = value
        .as_l()
        .map_err(|_| RepositoryError::InvalidData(format!("Expected a list for {key}")))?;
    list.iter()
        .map(|v| {
            v.as_s()
                .map(|s| s.to_string())
                .map_err(|_| RepositoryError::InvalidData(format!("Expected strings in {key}")))
        })
        .collect()
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let raw = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoochat_core::conversation::BlockReason;

    fn ts(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn id(n: u8) -> Uuid {
        Uuid::parse_str(&format!("550e8400-e29b-41d4-a716-4466554400{n:02}")).unwrap()
    }

    fn sample_user() -> User {
        User {
            id: id(1),
            email: "keeper@zoo.test".to_string(),
            name: "Kim Keeper".to_string(),
            role: UserRole::Admin,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: ts("2024-01-15T10:30:00Z"),
            updated_at: ts("2024-01-15T10:30:00Z"),
        }
    }

    fn sample_turn() -> ConversationTurn {
        ConversationTurn::new(
            id(4),
            id(1),
            id(2),
            7,
            "tell me about guns",
            "Let's talk about animals!",
        )
        .with_outcome(TurnOutcome::Blocked {
            reason: BlockReason::Topic {
                topic: "guns".to_string(),
            },
        })
        .with_created_at(ts("2024-01-15T11:00:00Z"))
    }

    #[test]
    fn test_user_item_keeps_password_hash_and_role() {
        let user = sample_user();
        let parsed = item_to_user(&user_to_item(&user)).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_user_item_has_correct_keys() {
        let item = user_to_item(&sample_user());

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(
            item.get("GSI1PK").unwrap().as_s().unwrap(),
            "EMAIL#keeper@zoo.test"
        );
        assert_eq!(item.get("GSI2PK").unwrap().as_s().unwrap(), "TYPE#USER");
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "USER");
    }

    #[test]
    fn test_details_optional_fields_are_omitted() {
        let details = UserDetails {
            user_id: id(1),
            age: None,
            favorite_animals: Vec::new(),
            notes: None,
            updated_at: ts("2024-01-15T10:30:00Z"),
        };
        let item = details_to_item(&details);

        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "DETAILS");
        assert!(!item.contains_key("age"));
        assert!(!item.contains_key("notes"));
        assert_eq!(item_to_details(&item).unwrap(), details);
    }

    #[test]
    fn test_details_with_values() {
        let details = UserDetails {
            user_id: id(1),
            age: Some(8),
            favorite_animals: vec!["otter".to_string(), "red panda".to_string()],
            notes: Some("Visiting with grandma".to_string()),
            updated_at: ts("2024-01-15T10:30:00Z"),
        };
        let item = details_to_item(&details);

        assert_eq!(item.get("age").unwrap().as_n().unwrap(), "8");
        assert_eq!(item_to_details(&item).unwrap(), details);
    }

    #[test]
    fn test_assistant_without_guardrail() {
        let assistant = Assistant::new("Leo", "African lion")
            .with_id(id(2))
            .inactive();
        let item = assistant_to_item(&assistant);

        assert!(!item.contains_key("guardrailId"));
        assert_eq!(item.get("active").unwrap().as_bool().unwrap(), &false);
        assert_eq!(item.get("GSI2PK").unwrap().as_s().unwrap(), "TYPE#ASSISTANT");

        let parsed = item_to_assistant(&item).unwrap();
        assert_eq!(parsed.guardrail_id, None);
        assert!(!parsed.active);
        assert_eq!(parsed.id, assistant.id);
    }

    #[test]
    fn test_guardrail_topics_and_limit() {
        let guardrail = Guardrail::new("Zoo Safety", "Let's talk about animals!")
            .with_id(id(3))
            .with_blocked_topics(vec!["weapons".to_string(), "credit card".to_string()])
            .with_max_message_chars(500);
        let item = guardrail_to_item(&guardrail);

        assert_eq!(item.get("blockedTopics").unwrap().as_l().unwrap().len(), 2);
        assert_eq!(item.get("maxMessageChars").unwrap().as_n().unwrap(), "500");

        let parsed = item_to_guardrail(&item).unwrap();
        assert_eq!(parsed.blocked_topics, guardrail.blocked_topics);
        assert_eq!(parsed.max_message_chars, Some(500));
    }

    #[test]
    fn test_turn_item_keys_and_outcome() {
        let turn = sample_turn();
        let item = turn_to_item(&turn).unwrap();

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "CONVO#550e8400-e29b-41d4-a716-446655440004"
        );
        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "TURN#0000000007");
        assert_eq!(
            item.get("GSI1PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );

        assert_eq!(item_to_turn(&item).unwrap(), turn);
    }

    #[test]
    fn test_turn_without_outcome_defaults_to_answered() {
        let mut item = turn_to_item(&sample_turn()).unwrap();
        item.remove("outcome");
        assert_eq!(item_to_turn(&item).unwrap().outcome, TurnOutcome::Answered);
    }

    #[test]
    fn test_missing_field_is_invalid_data() {
        let mut item = user_to_item(&sample_user());
        item.remove("email");

        let result = item_to_user(&item);
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_bad_role_is_invalid_data() {
        let mut item = user_to_item(&sample_user());
        item.insert("role".to_string(), s("zookeeper"));

        assert!(matches!(
            item_to_user(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
