use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An animal persona that visitors chat with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: Uuid,
    /// Display name, e.g. "Leo".
    pub name: String,
    /// Common species name, e.g. "African lion".
    pub species: String,
    /// Free-form character description fed to the chat model.
    pub persona: String,
    /// Opening line used on the first turn of a conversation.
    pub greeting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrail_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assistant {
    /// Creates a new, active assistant with no guardrail.
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            species: species.into(),
            persona: String::new(),
            greeting: String::new(),
            guardrail_id: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_guardrail(mut self, guardrail_id: Uuid) -> Self {
        self.guardrail_id = Some(guardrail_id);
        self
    }

    /// Sets a specific ID for this assistant (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Content policy attached to one or more assistants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardrail {
    pub id: Uuid,
    pub name: String,
    /// Words or phrases the conversation must stay away from.
    #[serde(default)]
    pub blocked_topics: Vec<String>,
    /// Per-message limit, stricter than the server-wide one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_message_chars: Option<usize>,
    /// Reply sent instead of the model's answer when the guardrail trips.
    pub refusal_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guardrail {
    pub fn new(name: impl Into<String>, refusal_message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            blocked_topics: Vec::new(),
            max_message_chars: None,
            refusal_message: refusal_message.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_blocked_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = Some(max);
        self
    }

    /// Sets a specific ID for this guardrail (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}
