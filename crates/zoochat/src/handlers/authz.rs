//! Authorization helpers for API handlers.
//!
//! Authentication is handled by the extractors in `zoochat_auth`; these
//! checks decide whether an authenticated caller may touch a resource.
//! Failures map to 403 Forbidden through `AppError`.

use thiserror::Error;
use uuid::Uuid;
use zoochat_core::user::User;

#[derive(Debug, Error)]
pub enum AuthzError {
    /// The resource belongs to another account.
    #[error("you can only access your own account")]
    NotSelf,
    /// The action needs the admin role.
    #[error("only admins can {action}")]
    AdminOnly { action: &'static str },
}

/// Allows `caller` to act on account `user_id` if it is their own or they are an admin.
pub fn require_self_or_admin(caller: &User, user_id: Uuid) -> Result<(), AuthzError> {
    if caller.id == user_id || caller.is_admin() {
        return Ok(());
    }
    tracing::warn!(caller = %caller.id, target = %user_id, "Authorization denied: not self");
    Err(AuthzError::NotSelf)
}

pub fn require_admin(caller: &User, action: &'static str) -> Result<(), AuthzError> {
    if caller.is_admin() {
        return Ok(());
    }
    tracing::warn!(caller = %caller.id, action, "Authorization denied: admin only");
    Err(AuthzError::AdminOnly { action })
}
