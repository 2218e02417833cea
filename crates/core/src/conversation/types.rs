use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a guardrail stopped a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockReason {
    /// The message exceeded the guardrail's length limit.
    TooLong { max: usize },
    /// The message touched a blocked topic.
    Topic { topic: String },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max } => write!(f, "message longer than {max} characters"),
            Self::Topic { topic } => write!(f, "blocked topic '{topic}'"),
        }
    }
}

/// What happened to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The model answered and the answer was delivered.
    #[default]
    Answered,
    /// The visitor's message was refused before reaching the model.
    Blocked { reason: BlockReason },
    /// The model answered but the answer was replaced by the refusal.
    Filtered { reason: BlockReason },
}

impl TurnOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered)
    }
}

/// One exchange: a visitor message and the reply it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub assistant_id: Uuid,
    /// Position in the conversation, starting at 0.
    pub index: u32,
    pub user_message: String,
    pub assistant_reply: String,
    #[serde(default)]
    pub outcome: TurnOutcome,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(
        conversation_id: Uuid,
        user_id: Uuid,
        assistant_id: Uuid,
        index: u32,
        user_message: impl Into<String>,
        assistant_reply: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            user_id,
            assistant_id,
            index,
            user_message: user_message.into(),
            assistant_reply: assistant_reply.into(),
            outcome: TurnOutcome::Answered,
            created_at: Utc::now(),
        }
    }

    pub fn with_outcome(mut self, outcome: TurnOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Characters this turn contributes to a prompt.
    pub fn char_len(&self) -> usize {
        self.user_message.chars().count() + self.assistant_reply.chars().count()
    }
}

/// Listing entry for a visitor's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub assistant_id: Uuid,
    pub turn_count: u32,
    pub started_at: DateTime<Utc>,
    pub last_turn_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a responder needs to produce the next reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub assistant_name: String,
    pub species: String,
    /// System prompt, history window, then the new visitor message.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// The message being answered.
    pub fn latest_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }

    /// True when no earlier reply made it into the window.
    pub fn is_opening(&self) -> bool {
        !self.messages.iter().any(|m| m.role == ChatRole::Assistant)
    }
}
