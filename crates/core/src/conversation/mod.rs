mod error;
mod guardrail;
mod operations;
mod prompt;
mod requests;
mod traits;
mod types;

pub use error::{ChatError, ConversationError};
pub use guardrail::{evaluate_input, evaluate_output, topic_matches, GuardrailVerdict};
pub use operations::{
    ensure_can_continue, ensure_can_view, next_turn_index, summarize_conversations,
    validate_message,
};
pub use prompt::{build_chat_request, history_window, system_prompt, HistoryLimits};
pub use requests::{ConvoHistoryQuery, ConvoHistoryResponse, ConvoTurnRequest, ConvoTurnResponse};
pub use traits::ChatResponder;
pub use types::{
    BlockReason, ChatMessage, ChatRequest, ChatRole, ConversationSummary, ConversationTurn,
    TurnOutcome,
};
