use std::collections::HashMap;

use uuid::Uuid;

use crate::validation::{require_text, ValidationError};

use super::error::ConversationError;
use super::types::{ConversationSummary, ConversationTurn};

/// Trims a visitor message and checks it against the server-wide limit.
pub fn validate_message(message: &str, max_chars: usize) -> Result<String, ValidationError> {
    let trimmed = message.trim();
    require_text("message", trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Index for the next turn: one past the highest seen, 0 when empty.
pub fn next_turn_index(turns: &[ConversationTurn]) -> u32 {
    turns.iter().map(|t| t.index + 1).max().unwrap_or(0)
}

/// Checks that `user_id` may add a turn with `assistant_id` to an existing
/// conversation. An empty history always passes.
pub fn ensure_can_continue(
    turns: &[ConversationTurn],
    user_id: Uuid,
    assistant_id: Uuid,
) -> Result<(), ConversationError> {
    let Some(first) = turns.first() else {
        return Ok(());
    };
    if turns.iter().any(|t| t.user_id != user_id) {
        return Err(ConversationError::NotOwner);
    }
    if first.assistant_id != assistant_id {
        return Err(ConversationError::AssistantMismatch {
            conversation_id: first.conversation_id,
        });
    }
    Ok(())
}

/// Checks that `user_id` may read or delete a conversation.
pub fn ensure_can_view(
    turns: &[ConversationTurn],
    user_id: Uuid,
    is_admin: bool,
) -> Result<(), ConversationError> {
    if is_admin || turns.iter().all(|t| t.user_id == user_id) {
        Ok(())
    } else {
        Err(ConversationError::NotOwner)
    }
}

/// Groups turns into per-conversation summaries, most recent first.
pub fn summarize_conversations(turns: Vec<ConversationTurn>) -> Vec<ConversationSummary> {
    let mut by_conversation: HashMap<Uuid, ConversationSummary> = HashMap::new();

    for turn in turns {
        by_conversation
            .entry(turn.conversation_id)
            .and_modify(|summary| {
                summary.turn_count += 1;
                summary.started_at = summary.started_at.min(turn.created_at);
                summary.last_turn_at = summary.last_turn_at.max(turn.created_at);
            })
            .or_insert_with(|| ConversationSummary {
                conversation_id: turn.conversation_id,
                assistant_id: turn.assistant_id,
                turn_count: 1,
                started_at: turn.created_at,
                last_turn_at: turn.created_at,
            });
    }

    let mut summaries: Vec<_> = by_conversation.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_turn_at
            .cmp(&a.last_turn_at)
            .then_with(|| a.conversation_id.cmp(&b.conversation_id))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn turn(cid: Uuid, uid: Uuid, aid: Uuid, index: u32) -> ConversationTurn {
        ConversationTurn::new(cid, uid, aid, index, "hi", "hello")
    }

    #[test]
    fn message_is_trimmed() {
        assert_eq!(validate_message("  hello  ", 10).unwrap(), "hello");
    }

    #[test]
    fn message_rules() {
        assert_eq!(
            validate_message(" \n ", 10),
            Err(ValidationError::Empty { field: "message" })
        );
        assert_eq!(
            validate_message("abcdef", 5),
            Err(ValidationError::TooLong {
                field: "message",
                max: 5
            })
        );
    }

    #[test]
    fn next_index_is_max_plus_one() {
        let (c, u, a) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(next_turn_index(&[]), 0);
        assert_eq!(next_turn_index(&[turn(c, u, a, 0)]), 1);
        assert_eq!(next_turn_index(&[turn(c, u, a, 4), turn(c, u, a, 2)]), 5);
    }

    #[test]
    fn continuing_checks_owner_then_assistant() {
        let (c, u, a) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let history = vec![turn(c, u, a, 0)];

        assert!(ensure_can_continue(&[], Uuid::new_v4(), a).is_ok());
        assert!(ensure_can_continue(&history, u, a).is_ok());
        assert_eq!(
            ensure_can_continue(&history, Uuid::new_v4(), a),
            Err(ConversationError::NotOwner)
        );
        assert_eq!(
            ensure_can_continue(&history, u, Uuid::new_v4()),
            Err(ConversationError::AssistantMismatch { conversation_id: c })
        );
    }

    #[test]
    fn admins_can_view_any_conversation() {
        let (c, u, a) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let history = vec![turn(c, u, a, 0)];
        let stranger = Uuid::new_v4();

        assert!(ensure_can_view(&history, u, false).is_ok());
        assert!(ensure_can_view(&history, stranger, true).is_ok());
        assert_eq!(
            ensure_can_view(&history, stranger, false),
            Err(ConversationError::NotOwner)
        );
    }

    #[test]
    fn summaries_are_most_recent_first() {
        let (u, a) = (Uuid::new_v4(), Uuid::new_v4());
        let (older, newer) = (Uuid::new_v4(), Uuid::new_v4());
        let base = Utc::now();

        let turns = vec![
            turn(older, u, a, 0).with_created_at(base),
            turn(newer, u, a, 0).with_created_at(base + Duration::minutes(5)),
            turn(older, u, a, 1).with_created_at(base + Duration::minutes(1)),
        ];

        let summaries = summarize_conversations(turns);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].conversation_id, newer);
        assert_eq!(summaries[1].conversation_id, older);
        assert_eq!(summaries[1].turn_count, 2);
        assert_eq!(summaries[1].started_at, base);
        assert_eq!(summaries[1].last_turn_at, base + Duration::minutes(1));
    }
}
