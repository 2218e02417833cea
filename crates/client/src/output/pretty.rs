//! Pretty output formatting.

use zoochat_core::assistant::{Assistant, Guardrail};
use zoochat_core::conversation::{ConversationSummary, ConversationTurn, TurnOutcome};
use zoochat_core::user::{TokenResponse, User, UserDetails};

const RULE_WIDTH: usize = 40;

fn list<T>(title: &str, empty: &str, items: &[T], format: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut output = format!("{} ({})\n", title, items.len());
    output.push_str(&"-".repeat(RULE_WIDTH));
    for item in items {
        output.push_str(&format!("\n{}", format(item)));
        output.push('\n');
    }
    output
}

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    format!(
        "{} [{}]\n  ID: {}\n  Email: {}",
        user.name, user.role, user.id, user.email
    )
}

/// Format users for display.
pub fn format_users(users: &[User]) -> String {
    list("USERS", "No users found.", users, format_user)
}

/// Format a login or registration result.
pub fn format_token(token: &TokenResponse) -> String {
    format!(
        "Signed in as {}\n  Expires: {}\n  Token: {}",
        token.user.email, token.expires_at, token.token
    )
}

/// Format profile details for display.
pub fn format_details(details: &UserDetails) -> String {
    let mut output = format!("Details for {}", details.user_id);
    if let Some(age) = details.age {
        output.push_str(&format!("\n  Age: {}", age));
    }
    if !details.favorite_animals.is_empty() {
        output.push_str(&format!(
            "\n  Favorite animals: {}",
            details.favorite_animals.join(", ")
        ));
    }
    if let Some(notes) = &details.notes {
        output.push_str(&format!("\n  Notes: {}", notes));
    }
    output
}

/// Format an assistant for display.
pub fn format_assistant(assistant: &Assistant) -> String {
    let status = if assistant.active { "active" } else { "inactive" };
    let mut output = format!(
        "{} the {} ({})\n  ID: {}",
        assistant.name, assistant.species, status, assistant.id
    );
    if !assistant.greeting.is_empty() {
        output.push_str(&format!("\n  Greeting: {}", assistant.greeting));
    }
    if let Some(guardrail_id) = assistant.guardrail_id {
        output.push_str(&format!("\n  Guardrail: {}", guardrail_id));
    }
    output
}

/// Format assistants for display.
pub fn format_assistants(assistants: &[Assistant]) -> String {
    list(
        "ASSISTANTS",
        "No assistants found.",
        assistants,
        format_assistant,
    )
}

/// Format a guardrail for display.
pub fn format_guardrail(guardrail: &Guardrail) -> String {
    let mut output = format!("{}\n  ID: {}", guardrail.name, guardrail.id);
    if !guardrail.blocked_topics.is_empty() {
        output.push_str(&format!(
            "\n  Blocked topics: {}",
            guardrail.blocked_topics.join(", ")
        ));
    }
    if let Some(max) = guardrail.max_message_chars {
        output.push_str(&format!("\n  Max message: {} chars", max));
    }
    output.push_str(&format!("\n  Refusal: {}", guardrail.refusal_message));
    output
}

/// Format guardrails for display.
pub fn format_guardrails(guardrails: &[Guardrail]) -> String {
    list(
        "GUARDRAILS",
        "No guardrails found.",
        guardrails,
        format_guardrail,
    )
}

fn outcome_label(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Answered => String::new(),
        TurnOutcome::Blocked { reason } => format!(" [blocked: {}]", reason),
        TurnOutcome::Filtered { reason } => format!(" [filtered: {}]", reason),
    }
}

/// Format a single exchange.
pub fn format_turn(turn: &ConversationTurn) -> String {
    format!(
        "#{}{}\n  you: {}\n  bot: {}",
        turn.index,
        outcome_label(&turn.outcome),
        turn.user_message,
        turn.assistant_reply
    )
}

/// Format a conversation's turns.
pub fn format_history(turns: &[ConversationTurn]) -> String {
    list("TURNS", "No turns found.", turns, format_turn)
}

/// Format a conversation listing entry.
pub fn format_summary(summary: &ConversationSummary) -> String {
    format!(
        "{}\n  Assistant: {}\n  Turns: {}\n  Last turn: {}",
        summary.conversation_id, summary.assistant_id, summary.turn_count, summary.last_turn_at
    )
}

/// Format the caller's conversations.
pub fn format_summaries(summaries: &[ConversationSummary]) -> String {
    list(
        "CONVERSATIONS",
        "No conversations found.",
        summaries,
        format_summary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use zoochat_core::conversation::BlockReason;

    fn turn(outcome: TurnOutcome) -> ConversationTurn {
        ConversationTurn {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            assistant_id: Uuid::new_v4(),
            index: 2,
            user_message: "do you like weapons?".into(),
            assistant_reply: "Let's talk about animals instead!".into(),
            outcome,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_lists_have_a_message() {
        assert_eq!(format_users(&[]), "No users found.");
        assert_eq!(format_assistants(&[]), "No assistants found.");
        assert_eq!(format_history(&[]), "No turns found.");
    }

    #[test]
    fn blocked_turn_shows_reason() {
        let output = format_turn(&turn(TurnOutcome::Blocked {
            reason: BlockReason::Topic {
                topic: "weapons".into(),
            },
        }));

        assert!(output.starts_with("#2 [blocked: blocked topic 'weapons']"));
        assert!(output.contains("you: do you like weapons?"));
    }

    #[test]
    fn answered_turn_has_no_label() {
        let output = format_turn(&turn(TurnOutcome::Answered));
        assert!(output.starts_with("#2\n"));
    }

    #[test]
    fn assistant_shows_status_and_guardrail() {
        let guardrail_id = Uuid::new_v4();
        let mut assistant = Assistant::new("Pip", "Emperor penguin").with_guardrail(guardrail_id);
        assistant.active = false;

        let output = format_assistant(&assistant);
        assert!(output.starts_with("Pip the Emperor penguin (inactive)"));
        assert!(output.contains(&guardrail_id.to_string()));
    }

    #[test]
    fn list_counts_items() {
        let users = vec![
            User::new("a@zoo.test", "A", ""),
            User::new("b@zoo.test", "B", ""),
        ];
        assert!(format_users(&users).starts_with("USERS (2)\n"));
    }
}
