//! Animal assistants (`/api/assistants`).

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use zoochat_auth::{AdminUser, CurrentUser};
use zoochat_core::assistant::{
    validate_assistant, Assistant, CreateAssistantRequest, ListAssistantsQuery,
    UpdateAssistantRequest,
};
use zoochat_core::validation::ValidationError;

use super::extract::{AppJson, AppPath, AppQuery};
use super::{not_found, AppError};
use crate::state::AppState;

/// List assistants (GET /api/assistants), optionally filtered by `?active=`.
pub async fn list_assistants(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListAssistantsQuery>,
) -> Result<Json<Vec<Assistant>>, AppError> {
    let mut assistants = state.assistants.list_assistants().await?;
    if let Some(active) = query.active {
        assistants.retain(|a| a.active == active);
    }
    Ok(Json(assistants))
}

/// Create an assistant (POST /api/assistants). Admin only.
pub async fn create_assistant(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateAssistantRequest>,
) -> Result<(StatusCode, Json<Assistant>), AppError> {
    let assistant = request.into_assistant();
    validate_assistant(&assistant)?;
    if let Some(guardrail_id) = assistant.guardrail_id {
        ensure_guardrail_exists(&state, guardrail_id).await?;
    }

    state.assistants.create_assistant(&assistant).await?;

    tracing::info!(
        assistant_id = %assistant.id,
        name = %assistant.name,
        created_by = %admin.id,
        "Created assistant"
    );

    Ok((StatusCode::CREATED, Json(assistant)))
}

/// GET /api/assistants/{id}
pub async fn get_assistant(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Assistant>, AppError> {
    let assistant = state
        .assistants
        .get_assistant(id)
        .await?
        .ok_or_else(|| not_found("Assistant", id))?;
    Ok(Json(assistant))
}

/// Update an assistant (PUT /api/assistants/{id}). Admin only.
pub async fn update_assistant(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateAssistantRequest>,
) -> Result<Json<Assistant>, AppError> {
    let mut assistant = state
        .assistants
        .get_assistant(id)
        .await?
        .ok_or_else(|| not_found("Assistant", id))?;

    if let Some(guardrail_id) = request.attached_guardrail() {
        ensure_guardrail_exists(&state, guardrail_id).await?;
    }

    request.apply_to(&mut assistant, Utc::now());
    validate_assistant(&assistant)?;
    state.assistants.update_assistant(&assistant).await?;

    tracing::info!(assistant_id = %id, active = assistant.active, "Updated assistant");

    Ok(Json(assistant))
}

/// Delete an assistant (DELETE /api/assistants/{id}). Admin only.
///
/// Existing conversations keep their turns.
pub async fn delete_assistant(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.assistants.delete_assistant(id).await?;
    tracing::info!(assistant_id = %id, "Deleted assistant");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_guardrail_exists(state: &AppState, guardrail_id: Uuid) -> Result<(), AppError> {
    if state.guardrails.get_guardrail(guardrail_id).await?.is_none() {
        return Err(ValidationError::Invalid {
            field: "guardrail_id",
            reason: format!("unknown guardrail {guardrail_id}"),
        }
        .into());
    }
    Ok(())
}
