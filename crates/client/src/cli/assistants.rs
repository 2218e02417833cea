//! Assistant CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Assistant management commands.
#[derive(Debug, Parser)]
pub struct AssistantsCommand {
    #[command(subcommand)]
    pub action: AssistantsAction,
}

/// Available assistant actions.
#[derive(Debug, Subcommand)]
pub enum AssistantsAction {
    /// List assistants.
    List {
        /// Only show active assistants.
        #[arg(long)]
        active: bool,
    },
    /// Get assistant by ID.
    Get {
        /// Assistant ID.
        id: Uuid,
    },
    /// Create a new assistant.
    Create {
        #[arg(long)]
        name: String,
        /// Animal species, e.g. "African lion".
        #[arg(long)]
        species: String,
        /// Personality prompt.
        #[arg(long, default_value = "")]
        persona: String,
        /// First line for new conversations.
        #[arg(long, default_value = "")]
        greeting: String,
        /// Guardrail to attach.
        #[arg(long)]
        guardrail: Option<Uuid>,
        /// Create the assistant disabled.
        #[arg(long)]
        inactive: bool,
    },
    /// Update an assistant.
    Update {
        /// Assistant ID.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        persona: Option<String>,
        #[arg(long)]
        greeting: Option<String>,
        /// Attach a guardrail.
        #[arg(long, conflicts_with = "detach_guardrail")]
        guardrail: Option<Uuid>,
        /// Remove the attached guardrail.
        #[arg(long)]
        detach_guardrail: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete assistant by ID.
    Delete {
        /// Assistant ID.
        id: Uuid,
    },
}
