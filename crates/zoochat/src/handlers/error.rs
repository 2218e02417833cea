//! Handler error type.
//!
//! Handlers return `Result<_, AppError>` and use `?` on any domain error.
//! The status code is recovered by downcasting the wrapped error.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use zoochat_core::conversation::{ChatError, ConversationError};
use zoochat_core::storage::RepositoryError;
use zoochat_core::validation::ValidationError;

use super::authz::AuthzError;

/// A failure with an explicit status, for cases no domain error covers.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        let err = &self.0;

        if let Some(e) = err.downcast_ref::<RepositoryError>() {
            StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if err.downcast_ref::<ValidationError>().is_some() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else if let Some(e) = err.downcast_ref::<ConversationError>() {
            match e {
                ConversationError::NotOwner => StatusCode::FORBIDDEN,
                ConversationError::AssistantMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ConversationError::AssistantInactive => StatusCode::CONFLICT,
            }
        } else if let Some(e) = err.downcast_ref::<ChatError>() {
            match e {
                ChatError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            }
        } else if let Some(e) = err.downcast_ref::<zoochat_auth::AuthError>() {
            e.status_code()
        } else if err.downcast_ref::<AuthzError>().is_some() {
            StatusCode::FORBIDDEN
        } else if let Some(e) = err.downcast_ref::<HttpError>() {
            e.status
        } else if let Some(e) = err.downcast_ref::<JsonRejection>() {
            e.status()
        } else if let Some(e) = err.downcast_ref::<QueryRejection>() {
            e.status()
        } else if let Some(e) = err.downcast_ref::<PathRejection>() {
            e.status()
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            if status.is_server_error() {
                tracing::warn!(error = %self.0, status = status.as_u16(), "Upstream failure");
            }
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
