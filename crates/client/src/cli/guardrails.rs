//! Guardrail CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Guardrail management commands.
#[derive(Debug, Parser)]
pub struct GuardrailsCommand {
    #[command(subcommand)]
    pub action: GuardrailsAction,
}

/// Available guardrail actions.
#[derive(Debug, Subcommand)]
pub enum GuardrailsAction {
    /// List all guardrails.
    List,
    /// Get guardrail by ID.
    Get {
        /// Guardrail ID.
        id: Uuid,
    },
    /// Create a new guardrail.
    Create {
        #[arg(long)]
        name: String,
        /// Reply sent instead of a blocked answer.
        #[arg(long)]
        refusal: String,
        /// Blocked topic (repeatable).
        #[arg(long)]
        topic: Vec<String>,
        /// Longest visitor message allowed.
        #[arg(long)]
        max_message_chars: Option<usize>,
    },
    /// Update a guardrail.
    Update {
        /// Guardrail ID.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        refusal: Option<String>,
        /// Replaces the blocked topics (repeatable).
        #[arg(long)]
        topic: Option<Vec<String>>,
        #[arg(long, conflicts_with = "no_max_message_chars")]
        max_message_chars: Option<usize>,
        /// Remove the message length limit.
        #[arg(long)]
        no_max_message_chars: bool,
    },
    /// Delete guardrail by ID.
    Delete {
        /// Guardrail ID.
        id: Uuid,
    },
}
