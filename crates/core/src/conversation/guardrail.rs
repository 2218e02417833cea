//! Guardrail evaluation for visitor messages and model replies.
//!
//! Topic matching works on lowercase alphanumeric words: a topic matches when
//! its words appear consecutively in the text. "war" therefore does not match
//! "warthog", and "credit card" matches "Credit-card".

use crate::assistant::Guardrail;

use super::types::BlockReason;

/// Result of running a guardrail over some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardrailVerdict {
    Allowed,
    Blocked(BlockReason),
}

impl GuardrailVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Checks a visitor message against the length limit and blocked topics.
pub fn evaluate_input(guardrail: &Guardrail, message: &str) -> GuardrailVerdict {
    if let Some(max) = guardrail.max_message_chars {
        if message.chars().count() > max {
            return GuardrailVerdict::Blocked(BlockReason::TooLong { max });
        }
    }
    match_topics(guardrail, message)
}

/// Checks a model reply against blocked topics. Length is not limited.
pub fn evaluate_output(guardrail: &Guardrail, reply: &str) -> GuardrailVerdict {
    match_topics(guardrail, reply)
}

fn match_topics(guardrail: &Guardrail, text: &str) -> GuardrailVerdict {
    let text_words = words(text);
    guardrail
        .blocked_topics
        .iter()
        .find(|topic| contains_phrase(&text_words, &words(topic)))
        .map(|topic| {
            GuardrailVerdict::Blocked(BlockReason::Topic {
                topic: topic.clone(),
            })
        })
        .unwrap_or(GuardrailVerdict::Allowed)
}

/// True when `topic` occurs in `text` on whole-word boundaries, ignoring case.
pub fn topic_matches(topic: &str, text: &str) -> bool {
    contains_phrase(&words(text), &words(topic))
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    // A topic made only of punctuation never matches.
    if phrase.is_empty() {
        return false;
    }
    haystack.windows(phrase.len()).any(|window| window == phrase)
}
