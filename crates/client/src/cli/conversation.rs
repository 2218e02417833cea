//! Conversation CLI commands.

use clap::Args;
use uuid::Uuid;

/// Send one message.
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Assistant to talk to.
    #[arg(long)]
    pub assistant: Uuid,
    /// Continue an existing conversation.
    #[arg(long)]
    pub conversation: Option<Uuid>,
    /// The message. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

/// Show or delete a conversation.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Conversation ID.
    pub conversation: Uuid,
    /// Only the last N turns.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Delete the conversation instead of showing it.
    #[arg(long, conflicts_with = "limit")]
    pub delete: bool,
}
