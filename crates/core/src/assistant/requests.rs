//! API request types for assistant and guardrail management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Assistant, Guardrail};
use crate::serde::{deserialize_nullable, serialize_nullable};
use crate::validation::normalize_labels;

/// Request payload for creating a new assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssistantRequest {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub greeting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrail_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateAssistantRequest {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            persona: String::new(),
            greeting: String::new(),
            guardrail_id: None,
            active: true,
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

    /// Convert into an Assistant with a fresh ID.
    pub fn into_assistant(self) -> Assistant {
        let mut assistant = Assistant::new(self.name.trim(), self.species.trim())
            .with_persona(self.persona.trim())
            .with_greeting(self.greeting.trim());
        assistant.guardrail_id = self.guardrail_id;
        assistant.active = self.active;
        assistant
    }
}

/// Request payload for updating an assistant.
///
/// `guardrail_id: null` detaches the guardrail; omitting it leaves it as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssistantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        serialize_with = "serialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub guardrail_id: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateAssistantRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_guardrail(mut self, guardrail_id: Option<Uuid>) -> Self {
        self.guardrail_id = Some(guardrail_id);
        self
    }

    /// The guardrail this update attaches, if it attaches one.
    pub fn attached_guardrail(&self) -> Option<Uuid> {
        self.guardrail_id.flatten()
    }

    /// Apply updates to an existing assistant.
    pub fn apply_to(self, assistant: &mut Assistant, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            assistant.name = name.trim().to_string();
        }
        if let Some(species) = self.species {
            assistant.species = species.trim().to_string();
        }
        if let Some(persona) = self.persona {
            assistant.persona = persona.trim().to_string();
        }
        if let Some(greeting) = self.greeting {
            assistant.greeting = greeting.trim().to_string();
        }
        if let Some(guardrail_id) = self.guardrail_id {
            assistant.guardrail_id = guardrail_id;
        }
        if let Some(active) = self.active {
            assistant.active = active;
        }
        assistant.updated_at = now;
    }
}

/// Query parameters for `GET /api/assistants`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAssistantsQuery {
    /// When set, only assistants with this `active` flag are returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Request payload for creating a new guardrail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuardrailRequest {
    pub name: String,
    #[serde(default)]
    pub blocked_topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_message_chars: Option<usize>,
    pub refusal_message: String,
}

impl CreateGuardrailRequest {
    pub fn new(name: impl Into<String>, refusal_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocked_topics: Vec::new(),
            max_message_chars: None,
            refusal_message: refusal_message.into(),
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

    /// Convert into a Guardrail with a fresh ID and normalized topics.
    pub fn into_guardrail(self) -> Guardrail {
        let mut guardrail = Guardrail::new(self.name.trim(), self.refusal_message.trim())
            .with_blocked_topics(normalize_labels(self.blocked_topics));
        guardrail.max_message_chars = self.max_message_chars;
        guardrail
    }
}

/// Request payload for updating a guardrail.
///
/// `blocked_topics` replaces the whole list. `max_message_chars: null`
/// removes the per-guardrail limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuardrailRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_topics: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        serialize_with = "serialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_message_chars: Option<Option<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal_message: Option<String>,
}

impl UpdateGuardrailRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_topics = Some(topics.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_refusal_message(mut self, message: impl Into<String>) -> Self {
        self.refusal_message = Some(message.into());
        self
    }

    /// Apply updates to an existing guardrail.
    pub fn apply_to(self, guardrail: &mut Guardrail, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            guardrail.name = name.trim().to_string();
        }
        if let Some(topics) = self.blocked_topics {
            guardrail.blocked_topics = normalize_labels(topics);
        }
        if let Some(max) = self.max_message_chars {
            guardrail.max_message_chars = max;
        }
        if let Some(message) = self.refusal_message {
            guardrail.refusal_message = message.trim().to_string();
        }
        guardrail.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assistant_defaults_to_active() {
        let request: CreateAssistantRequest =
            serde_json::from_str(r#"{"name": "Leo", "species": "Lion"}"#).unwrap();
        let assistant = request.into_assistant();

        assert!(assistant.active);
        assert_eq!(assistant.guardrail_id, None);
        assert_eq!(assistant.persona, "");
    }

    #[test]
    fn create_assistant_trims_fields() {
        let assistant = CreateAssistantRequest::new("  Leo ", " African lion ")
            .with_persona(" Proud and sleepy. ")
            .into_assistant();

        assert_eq!(assistant.name, "Leo");
        assert_eq!(assistant.species, "African lion");
        assert_eq!(assistant.persona, "Proud and sleepy.");
    }

    #[test]
    fn update_assistant_can_detach_guardrail() {
        let guardrail_id = Uuid::new_v4();
        let mut assistant = Assistant::new("Leo", "Lion").with_guardrail(guardrail_id);

        let untouched: UpdateAssistantRequest =
            serde_json::from_str(r#"{"name": "Leon"}"#).unwrap();
        untouched.apply_to(&mut assistant, Utc::now());
        assert_eq!(assistant.guardrail_id, Some(guardrail_id));
        assert_eq!(assistant.name, "Leon");

        let detach: UpdateAssistantRequest =
            serde_json::from_str(r#"{"guardrail_id": null}"#).unwrap();
        assert_eq!(detach.attached_guardrail(), None);
        detach.apply_to(&mut assistant, Utc::now());
        assert_eq!(assistant.guardrail_id, None);
    }

    #[test]
    fn update_assistant_toggles_active() {
        let mut assistant = Assistant::new("Leo", "Lion");
        UpdateAssistantRequest::new()
            .with_active(false)
            .apply_to(&mut assistant, Utc::now());
        assert!(!assistant.active);
    }

    #[test]
    fn create_guardrail_normalizes_topics() {
        let guardrail = CreateGuardrailRequest::new("Safety", "Let's talk about animals!")
            .with_blocked_topics([" Violence ", "violence", "", "credit card"])
            .into_guardrail();

        assert_eq!(guardrail.blocked_topics, vec!["Violence", "credit card"]);
    }

    #[test]
    fn update_guardrail_can_clear_limit() {
        let mut guardrail = Guardrail::new("Safety", "No.").with_max_message_chars(200);

        let clear: UpdateGuardrailRequest =
            serde_json::from_str(r#"{"max_message_chars": null}"#).unwrap();
        clear.apply_to(&mut guardrail, Utc::now());

        assert_eq!(guardrail.max_message_chars, None);
    }

    #[test]
    fn update_guardrail_replaces_topics() {
        let mut guardrail = Guardrail::new("Safety", "No.").with_blocked_topics(["a"]);
        UpdateGuardrailRequest::new()
            .with_blocked_topics(["b", "c"])
            .apply_to(&mut guardrail, Utc::now());

        assert_eq!(guardrail.blocked_topics, vec!["b", "c"]);
    }
}
