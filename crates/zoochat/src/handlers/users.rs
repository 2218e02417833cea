//! Account management (`/api/users`).

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use zoochat_auth::{AdminUser, CurrentUser};
use zoochat_core::user::{validate_email, validate_user_name, UpdateUserRequest, User};

use super::authz::{require_admin, require_self_or_admin};
use super::extract::{AppJson, AppPath};
use super::{not_found, AppError};
use crate::state::AppState;

/// List all accounts (GET /api/users). Admin only.
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

/// Get one account (GET /api/users/{id}).
pub async fn get_user(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<User>, AppError> {
    require_self_or_admin(&caller, id)?;

    let user = state
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(user))
}

/// Update an account (PUT /api/users/{id}).
///
/// Only admins may change roles. A new email must not belong to anyone else.
pub async fn update_user(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    require_self_or_admin(&caller, id)?;
    if request.role.is_some() {
        require_admin(&caller, "change roles")?;
    }
    if let Some(name) = &request.name {
        validate_user_name(name)?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }

    let mut user = state
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    request.apply_to(&mut user, Utc::now());
    state.users.update_user(&user).await?;

    tracing::info!(user_id = %id, updated_by = %caller.id, "Updated user");

    Ok(Json(user))
}

/// Delete an account (DELETE /api/users/{id}).
///
/// Also deletes the visitor profile and every conversation of the account.
pub async fn delete_user(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    require_self_or_admin(&caller, id)?;

    if state.users.get_user(id).await?.is_none() {
        return Err(not_found("User", id).into());
    }

    let turns = state.conversations.delete_conversations_for_user(id).await?;
    state.user_details.delete_user_details(id).await?;
    state.users.delete_user(id).await?;

    tracing::info!(user_id = %id, deleted_by = %caller.id, turns, "Deleted user and their data");

    Ok(StatusCode::NO_CONTENT)
}
