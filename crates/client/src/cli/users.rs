//! User CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;
use zoochat_core::user::UserRole;

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List all users (admin only).
    List,
    /// Get user by ID.
    Get {
        /// User ID.
        id: Uuid,
    },
    /// Update a user.
    Update {
        /// User ID.
        id: Uuid,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New email.
        #[arg(long)]
        email: Option<String>,
        /// New role (admin only): user or admin.
        #[arg(long)]
        role: Option<UserRole>,
    },
    /// Delete user by ID, with their details and conversations.
    Delete {
        /// User ID.
        id: Uuid,
    },
    /// Show a user's profile details.
    Details {
        /// User ID.
        id: Uuid,
    },
    /// Set a user's profile details.
    SetDetails {
        /// User ID.
        id: Uuid,
        #[arg(long)]
        age: Option<u8>,
        /// Favorite animal (repeatable).
        #[arg(long = "animal")]
        animals: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}
