use thiserror::Error;
use uuid::Uuid;

/// Rule violations when continuing or reading a conversation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationError {
    #[error("conversation belongs to another user")]
    NotOwner,
    #[error("conversation {conversation_id} is with a different assistant")]
    AssistantMismatch { conversation_id: Uuid },
    #[error("assistant is inactive")]
    AssistantInactive,
}

/// Failures from a chat responder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat backend returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("chat backend timed out")]
    Timeout,
    #[error("chat backend unreachable: {0}")]
    Unavailable(String),
    #[error("invalid chat backend response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_error_display() {
        assert_eq!(
            ConversationError::AssistantInactive.to_string(),
            "assistant is inactive"
        );
    }

    #[test]
    fn chat_error_display() {
        assert_eq!(
            ChatError::Upstream {
                status: 429,
                message: "slow down".to_string()
            }
            .to_string(),
            "chat backend returned 429: slow down"
        );
        assert_eq!(ChatError::Timeout.to_string(), "chat backend timed out");
    }
}
