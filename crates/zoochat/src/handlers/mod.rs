pub mod assistants;
pub mod authz;
pub mod conversation;
pub mod error;
pub mod extract;
pub mod guardrails;
pub mod health;
pub mod user_details;
pub mod users;

use uuid::Uuid;
use zoochat_core::storage::RepositoryError;

pub use error::AppError;

/// The 404 for a lookup that came back empty.
pub(crate) fn not_found(entity_type: &'static str, id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}
