//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.
//!
//! | entity      | PK               | SK               | GSI1                                  | GSI2                           |
//! |-------------|------------------|------------------|---------------------------------------|--------------------------------|
//! | User        | `USER#<id>`      | `USER#<id>`      | `EMAIL#<email>` / `USER#<id>`         | `TYPE#USER` / `<created>#<id>` |
//! | UserDetails | `USER#<id>`      | `DETAILS`        |                                       |                                |
//! | Assistant   | `ASSISTANT#<id>` | `ASSISTANT#<id>` |                                       | `TYPE#ASSISTANT` / ...         |
//! | Guardrail   | `GUARDRAIL#<id>` | `GUARDRAIL#<id>` |                                       | `TYPE#GUARDRAIL` / ...         |
//! | Turn        | `CONVO#<cid>`    | `TURN#<index>`   | `USER#<uid>` / `CONVO#<cid>#TURN#<i>` |                                |

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

pub const USER_PREFIX: &str = "USER#";
pub const EMAIL_PREFIX: &str = "EMAIL#";
pub const ASSISTANT_PREFIX: &str = "ASSISTANT#";
pub const GUARDRAIL_PREFIX: &str = "GUARDRAIL#";
pub const CONVO_PREFIX: &str = "CONVO#";
pub const TURN_PREFIX: &str = "TURN#";
pub const TYPE_PREFIX: &str = "TYPE#";

pub const DETAILS_SK: &str = "DETAILS";

pub const GSI1: &str = "GSI1";
pub const GSI2: &str = "GSI2";

// ============================================================================
// User keys
// ============================================================================

/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Pattern: `USER#<user_id>` (same as PK for single-item queries)
pub fn user_sk(user_id: Uuid) -> String {
    user_pk(user_id)
}

/// GSI1 partition key for email lookup.
///
/// Pattern: `EMAIL#<email>`
pub fn user_gsi1_pk(email: &str) -> String {
    format!("{EMAIL_PREFIX}{email}")
}

pub fn user_gsi1_sk(user_id: Uuid) -> String {
    user_pk(user_id)
}

/// The sort key of the profile item, which shares the user's partition.
pub fn details_sk() -> &'static str {
    DETAILS_SK
}

// ============================================================================
// Assistant and guardrail keys
// ============================================================================

/// Pattern: `ASSISTANT#<assistant_id>`
pub fn assistant_pk(assistant_id: Uuid) -> String {
    format!("{ASSISTANT_PREFIX}{assistant_id}")
}

pub fn assistant_sk(assistant_id: Uuid) -> String {
    assistant_pk(assistant_id)
}

/// Pattern: `GUARDRAIL#<guardrail_id>`
pub fn guardrail_pk(guardrail_id: Uuid) -> String {
    format!("{GUARDRAIL_PREFIX}{guardrail_id}")
}

pub fn guardrail_sk(guardrail_id: Uuid) -> String {
    guardrail_pk(guardrail_id)
}

// ============================================================================
// Listing keys (GSI2)
// ============================================================================

/// GSI2 partition key grouping every item of one entity type.
///
/// Pattern: `TYPE#<entity_type>`
pub fn type_gsi2_pk(entity_type: &str) -> String {
    format!("{TYPE_PREFIX}{entity_type}")
}

/// GSI2 sort key ordering a type listing oldest first.
///
/// Pattern: `<created_at>#<id>`
///
/// The timestamp has a fixed width (microseconds, `Z` suffix) so that
/// lexicographic order matches chronological order.
pub fn created_gsi2_sk(created_at: DateTime<Utc>, id: Uuid) -> String {
    format!(
        "{}#{id}",
        created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    )
}

// ============================================================================
// Conversation keys
// ============================================================================

/// Pattern: `CONVO#<conversation_id>`
pub fn conversation_pk(conversation_id: Uuid) -> String {
    format!("{CONVO_PREFIX}{conversation_id}")
}

/// Pattern: `TURN#<index>` with the index zero-padded to ten digits, enough
/// for every `u32` to sort numerically.
pub fn turn_sk(index: u32) -> String {
    format!("{TURN_PREFIX}{index:010}")
}

/// GSI1 partition key for a user's turns.
///
/// Pattern: `USER#<user_id>`
pub fn turn_gsi1_pk(user_id: Uuid) -> String {
    user_pk(user_id)
}

/// Pattern: `CONVO#<conversation_id>#TURN#<index>`
pub fn turn_gsi1_sk(conversation_id: Uuid, index: u32) -> String {
    format!("{}#{}", conversation_pk(conversation_id), turn_sk(index))
}

pub fn turn_sk_prefix() -> &'static str {
    TURN_PREFIX
}

pub fn conversation_gsi1_sk_prefix() -> &'static str {
    CONVO_PREFIX
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap()
    }

    #[test]
    fn test_user_keys() {
        assert_eq!(user_pk(id()), "USER#550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(user_sk(id()), user_pk(id()));
        assert_eq!(user_gsi1_pk("leo@zoo.test"), "EMAIL#leo@zoo.test");
        assert_eq!(details_sk(), "DETAILS");
    }

    #[test]
    fn test_entity_keys() {
        assert_eq!(
            assistant_pk(id()),
            "ASSISTANT#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(
            guardrail_sk(id()),
            "GUARDRAIL#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(type_gsi2_pk("ASSISTANT"), "TYPE#ASSISTANT");
    }

    #[test]
    fn test_turn_sort_key_is_zero_padded() {
        assert_eq!(turn_sk(0), "TURN#0000000000");
        assert_eq!(turn_sk(42), "TURN#0000000042");
        assert!(turn_sk(9) < turn_sk(10));
        assert!(turn_sk(999_999) < turn_sk(1_000_000));
        assert!(turn_sk(u32::MAX - 1) < turn_sk(u32::MAX));
    }

    #[test]
    fn test_turn_gsi1_sk() {
        assert_eq!(
            turn_gsi1_sk(id(), 3),
            "CONVO#550e8400-e29b-41d4-a716-446655440001#TURN#0000000003"
        );
    }

    #[test]
    fn test_created_sort_key_orders_chronologically() {
        let early = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        let early_sk = created_gsi2_sk(early, id());
        assert_eq!(
            early_sk,
            "2024-01-15T09:00:00.000000Z#550e8400-e29b-41d4-a716-446655440001"
        );
        assert!(early_sk < created_gsi2_sk(late, Uuid::nil()));
    }
}
