//! Visitor profiles (`/api/users/{id}/details`).

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use zoochat_auth::CurrentUser;
use zoochat_core::user::{validate_user_details, UpsertUserDetailsRequest, UserDetails};

use super::authz::require_self_or_admin;
use super::extract::{AppJson, AppPath};
use super::{not_found, AppError};
use crate::state::AppState;

/// GET /api/users/{id}/details
pub async fn get_user_details(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<Json<UserDetails>, AppError> {
    require_self_or_admin(&caller, user_id)?;

    let details = state
        .user_details
        .get_user_details(user_id)
        .await?
        .ok_or_else(|| not_found("UserDetails", user_id))?;

    Ok(Json(details))
}

/// PUT /api/users/{id}/details - create or replace the profile.
pub async fn put_user_details(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(request): AppJson<UpsertUserDetailsRequest>,
) -> Result<Json<UserDetails>, AppError> {
    require_self_or_admin(&caller, user_id)?;

    if state.users.get_user(user_id).await?.is_none() {
        return Err(not_found("User", user_id).into());
    }

    let details = request.into_details(user_id, Utc::now());
    validate_user_details(&details)?;
    state.user_details.upsert_user_details(&details).await?;

    tracing::debug!(%user_id, "Stored visitor profile");

    Ok(Json(details))
}

/// DELETE /api/users/{id}/details - 404 when there is no profile.
pub async fn delete_user_details(
    CurrentUser(caller): CurrentUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    require_self_or_admin(&caller, user_id)?;

    if state.user_details.get_user_details(user_id).await?.is_none() {
        return Err(not_found("UserDetails", user_id).into());
    }
    state.user_details.delete_user_details(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
