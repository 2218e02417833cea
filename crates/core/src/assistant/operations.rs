use crate::validation::{limit_text, require_labels, require_text, ValidationError};

use super::types::{Assistant, Guardrail};

const MAX_ASSISTANT_NAME_LEN: usize = 60;
const MAX_SPECIES_LEN: usize = 60;
const MAX_PERSONA_LEN: usize = 4000;
const MAX_GREETING_LEN: usize = 500;

const MAX_GUARDRAIL_NAME_LEN: usize = 60;
const MAX_REFUSAL_LEN: usize = 500;
const MAX_BLOCKED_TOPICS: usize = 200;
const MAX_TOPIC_LEN: usize = 100;

/// Validates an assistant before creation or update.
///
/// Guardrail existence is a storage concern and is checked by the caller.
pub fn validate_assistant(assistant: &Assistant) -> Result<(), ValidationError> {
    require_text("name", &assistant.name, MAX_ASSISTANT_NAME_LEN)?;
    require_text("species", &assistant.species, MAX_SPECIES_LEN)?;
    limit_text("persona", &assistant.persona, MAX_PERSONA_LEN)?;
    limit_text("greeting", &assistant.greeting, MAX_GREETING_LEN)?;
    Ok(())
}

/// Validates a guardrail before creation or update.
pub fn validate_guardrail(guardrail: &Guardrail) -> Result<(), ValidationError> {
    require_text("name", &guardrail.name, MAX_GUARDRAIL_NAME_LEN)?;
    require_text(
        "refusal_message",
        &guardrail.refusal_message,
        MAX_REFUSAL_LEN,
    )?;
    require_labels(
        "blocked_topics",
        &guardrail.blocked_topics,
        MAX_BLOCKED_TOPICS,
        MAX_TOPIC_LEN,
    )?;
    if guardrail.max_message_chars == Some(0) {
        return Err(ValidationError::Invalid {
            field: "max_message_chars",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_assistant_passes() {
        let assistant = Assistant::new("Leo", "African lion").with_persona("Proud.");
        assert!(validate_assistant(&assistant).is_ok());
    }

    #[test]
    fn assistant_requires_name_and_species() {
        let nameless = Assistant::new("  ", "Lion");
        assert_eq!(
            validate_assistant(&nameless),
            Err(ValidationError::Empty { field: "name" })
        );

        let speciesless = Assistant::new("Leo", "");
        assert_eq!(
            validate_assistant(&speciesless),
            Err(ValidationError::Empty { field: "species" })
        );
    }

    #[test]
    fn assistant_persona_is_bounded() {
        let assistant = Assistant::new("Leo", "Lion").with_persona("x".repeat(4001));
        assert_eq!(
            validate_assistant(&assistant),
            Err(ValidationError::TooLong {
                field: "persona",
                max: 4000
            })
        );
    }

    #[test]
    fn valid_guardrail_passes() {
        let guardrail = Guardrail::new("Safety", "Let's talk about animals.")
            .with_blocked_topics(["violence"])
            .with_max_message_chars(500);
        assert!(validate_guardrail(&guardrail).is_ok());
    }

    #[test]
    fn guardrail_requires_refusal_message() {
        let guardrail = Guardrail::new("Safety", " ");
        assert_eq!(
            validate_guardrail(&guardrail),
            Err(ValidationError::Empty {
                field: "refusal_message"
            })
        );
    }

    #[test]
    fn guardrail_rejects_zero_limit() {
        let guardrail = Guardrail::new("Safety", "No.").with_max_message_chars(0);
        assert_eq!(
            validate_guardrail(&guardrail).unwrap_err().field(),
            "max_message_chars"
        );
    }

    #[test]
    fn guardrail_topics_are_bounded() {
        let guardrail = Guardrail::new("Safety", "No.")
            .with_blocked_topics((0..201).map(|i| format!("topic {i}")));
        assert_eq!(
            validate_guardrail(&guardrail),
            Err(ValidationError::TooMany {
                field: "blocked_topics",
                max: 200
            })
        );
    }
}
