//! Guardrails (`/api/guardrails`).

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use zoochat_auth::{AdminUser, CurrentUser};
use zoochat_core::assistant::{
    validate_guardrail, CreateGuardrailRequest, Guardrail, UpdateGuardrailRequest,
};

use super::error::HttpError;
use super::extract::{AppJson, AppPath};
use super::{not_found, AppError};
use crate::state::AppState;

/// GET /api/guardrails
pub async fn list_guardrails(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Guardrail>>, AppError> {
    Ok(Json(state.guardrails.list_guardrails().await?))
}

/// Create a guardrail (POST /api/guardrails). Admin only.
pub async fn create_guardrail(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateGuardrailRequest>,
) -> Result<(StatusCode, Json<Guardrail>), AppError> {
    let guardrail = request.into_guardrail();
    validate_guardrail(&guardrail)?;
    state.guardrails.create_guardrail(&guardrail).await?;

    tracing::info!(
        guardrail_id = %guardrail.id,
        topics = guardrail.blocked_topics.len(),
        created_by = %admin.id,
        "Created guardrail"
    );

    Ok((StatusCode::CREATED, Json(guardrail)))
}

/// GET /api/guardrails/{id}
pub async fn get_guardrail(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Guardrail>, AppError> {
    let guardrail = state
        .guardrails
        .get_guardrail(id)
        .await?
        .ok_or_else(|| not_found("Guardrail", id))?;
    Ok(Json(guardrail))
}

/// Update a guardrail (PUT /api/guardrails/{id}). Admin only.
pub async fn update_guardrail(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateGuardrailRequest>,
) -> Result<Json<Guardrail>, AppError> {
    let mut guardrail = state
        .guardrails
        .get_guardrail(id)
        .await?
        .ok_or_else(|| not_found("Guardrail", id))?;

    request.apply_to(&mut guardrail, Utc::now());
    validate_guardrail(&guardrail)?;
    state.guardrails.update_guardrail(&guardrail).await?;

    tracing::info!(guardrail_id = %id, "Updated guardrail");

    Ok(Json(guardrail))
}

/// Delete a guardrail (DELETE /api/guardrails/{id}). Admin only.
///
/// Refused with 409 while any assistant still uses it.
pub async fn delete_guardrail(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let users: Vec<String> = state
        .assistants
        .list_assistants()
        .await?
        .into_iter()
        .filter(|a| a.guardrail_id == Some(id))
        .map(|a| a.name)
        .collect();

    if !users.is_empty() {
        return Err(HttpError::conflict(format!(
            "guardrail is used by: {}",
            users.join(", ")
        ))
        .into());
    }

    state.guardrails.delete_guardrail(id).await?;
    tracing::info!(guardrail_id = %id, "Deleted guardrail");
    Ok(StatusCode::NO_CONTENT)
}
