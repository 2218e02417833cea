//! Prompt assembly: system prompt plus a bounded window of earlier turns.

use crate::assistant::{Assistant, Guardrail};
use crate::user::UserDetails;

use super::types::{ChatMessage, ChatRequest, ConversationTurn};

/// Bounds on how much history is replayed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub max_turns: usize,
    pub max_chars: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_turns: 10,
            max_chars: 6000,
        }
    }
}

/// Builds the system prompt for `assistant`.
pub fn system_prompt(
    assistant: &Assistant,
    details: Option<&UserDetails>,
    guardrail: Option<&Guardrail>,
) -> String {
    let mut prompt = format!(
        "You are {}, a friendly {} living at the zoo, chatting with a visitor. \
         Stay in character and keep answers short, friendly and suitable for all ages.",
        assistant.name, assistant.species
    );

    if !assistant.persona.is_empty() {
        prompt.push_str("\n\nPersona: ");
        prompt.push_str(&assistant.persona);
    }

    if let Some(details) = details.filter(|d| !d.is_blank()) {
        prompt.push_str("\n\nAbout the visitor:");
        if let Some(age) = details.age {
            prompt.push_str(&format!("\n- Age: {age}"));
        }
        if !details.favorite_animals.is_empty() {
            prompt.push_str(&format!(
                "\n- Favorite animals: {}",
                details.favorite_animals.join(", ")
            ));
        }
        if let Some(notes) = details.notes.as_deref().filter(|n| !n.is_empty()) {
            prompt.push_str(&format!("\n- Notes: {notes}"));
        }
    }

    if let Some(guardrail) = guardrail.filter(|g| !g.blocked_topics.is_empty()) {
        prompt.push_str(&format!(
            "\n\nNever discuss these topics: {}. If asked, steer back to animals.",
            guardrail.blocked_topics.join(", ")
        ));
    }

    prompt
}

/// Selects the turns replayed to the model.
///
/// Blocked turns are skipped. The newest `max_turns` remain, then the oldest
/// are dropped until the total fits in `max_chars`. Order is preserved.
pub fn history_window(turns: &[ConversationTurn], limits: HistoryLimits) -> Vec<&ConversationTurn> {
    let eligible: Vec<&ConversationTurn> =
        turns.iter().filter(|t| !t.outcome.is_blocked()).collect();

    let skip = eligible.len().saturating_sub(limits.max_turns);
    let mut window = &eligible[skip..];

    let mut total: usize = window.iter().map(|t| t.char_len()).sum();
    while total > limits.max_chars {
        let Some((oldest, rest)) = window.split_first() else {
            break;
        };
        total -= oldest.char_len();
        window = rest;
    }

    window.to_vec()
}

/// Assembles the full request for a responder.
pub fn build_chat_request(
    assistant: &Assistant,
    details: Option<&UserDetails>,
    guardrail: Option<&Guardrail>,
    history: &[ConversationTurn],
    limits: HistoryLimits,
    message: &str,
) -> ChatRequest {
    let window = history_window(history, limits);

    let mut messages = Vec::with_capacity(window.len() * 2 + 2);
    messages.push(ChatMessage::system(system_prompt(
        assistant, details, guardrail,
    )));
    for turn in window {
        messages.push(ChatMessage::user(&turn.user_message));
        messages.push(ChatMessage::assistant(&turn.assistant_reply));
    }
    messages.push(ChatMessage::user(message));

    ChatRequest {
        assistant_name: assistant.name.clone(),
        species: assistant.species.clone(),
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{BlockReason, ChatRole, TurnOutcome};
    use uuid::Uuid;

    fn turns(count: u32) -> Vec<ConversationTurn> {
        let (cid, uid, aid) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        (0..count)
            .map(|i| ConversationTurn::new(cid, uid, aid, i, format!("q{i}"), format!("a{i}")))
            .collect()
    }

    fn indices(window: &[&ConversationTurn]) -> Vec<u32> {
        window.iter().map(|t| t.index).collect()
    }

    #[test]
    fn window_keeps_newest_turns_in_order() {
        let history = turns(5);
        let window = history_window(
            &history,
            HistoryLimits {
                max_turns: 3,
                max_chars: 1000,
            },
        );
        assert_eq!(indices(&window), vec![2, 3, 4]);
    }

    #[test]
    fn window_trims_oldest_to_fit_chars() {
        // each turn is 4 chars ("q0" + "a0")
        let history = turns(5);
        let window = history_window(
            &history,
            HistoryLimits {
                max_turns: 10,
                max_chars: 9,
            },
        );
        assert_eq!(indices(&window), vec![3, 4]);
    }

    #[test]
    fn window_can_be_empty() {
        let history = turns(2);
        let window = history_window(
            &history,
            HistoryLimits {
                max_turns: 10,
                max_chars: 3,
            },
        );
        assert!(window.is_empty());
        assert!(history_window(&[], HistoryLimits::default()).is_empty());
    }

    #[test]
    fn window_skips_blocked_turns() {
        let mut history = turns(4);
        history[2].outcome = TurnOutcome::Blocked {
            reason: BlockReason::TooLong { max: 1 },
        };
        history[3].outcome = TurnOutcome::Filtered {
            reason: BlockReason::Topic {
                topic: "war".to_string(),
            },
        };
        let window = history_window(
            &history,
            HistoryLimits {
                max_turns: 2,
                max_chars: 1000,
            },
        );
        assert_eq!(indices(&window), vec![1, 3]);
    }

    #[test]
    fn system_prompt_includes_profile_and_topics() {
        let assistant = Assistant::new("Leo", "African lion").with_persona("Sleepy.");
        let mut details = UserDetails::empty(Uuid::new_v4());
        details.age = Some(8);
        details.favorite_animals = vec!["lions".to_string(), "owls".to_string()];
        let guardrail = Guardrail::new("Safety", "No.").with_blocked_topics(["war", "money"]);

        let prompt = system_prompt(&assistant, Some(&details), Some(&guardrail));

        assert!(prompt.starts_with("You are Leo, a friendly African lion"));
        assert!(prompt.contains("Persona: Sleepy."));
        assert!(prompt.contains("- Age: 8"));
        assert!(prompt.contains("- Favorite animals: lions, owls"));
        assert!(prompt.contains("Never discuss these topics: war, money."));
    }

    #[test]
    fn system_prompt_omits_blank_sections() {
        let assistant = Assistant::new("Pip", "Penguin");
        let details = UserDetails::empty(Uuid::new_v4());
        let prompt = system_prompt(&assistant, Some(&details), None);

        assert!(!prompt.contains("About the visitor"));
        assert!(!prompt.contains("Persona"));
        assert!(!prompt.contains("Never discuss"));
    }

    #[test]
    fn chat_request_layout() {
        let assistant = Assistant::new("Leo", "Lion");
        let history = turns(2);
        let request = build_chat_request(
            &assistant,
            None,
            None,
            &history,
            HistoryLimits::default(),
            "what do you eat?",
        );

        let roles: Vec<ChatRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
            ]
        );
        assert_eq!(request.latest_user_message(), Some("what do you eat?"));
        assert_eq!(request.assistant_name, "Leo");
    }
}
