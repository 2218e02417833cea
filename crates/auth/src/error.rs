use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use zoochat_core::storage::RepositoryError;
use zoochat_core::validation::ValidationError;

/// Auth errors for the zoochat_auth crate.
///
/// This wraps the core `AuthError` and adds the failures that come from
/// storage, request validation and configuration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (token and credential checks).
    #[error(transparent)]
    Core(#[from] zoochat_core::auth::AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The request body was not the JSON the route expects.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        use zoochat_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(core_err) => match core_err {
                CoreError::MissingToken
                | CoreError::InvalidToken(_)
                | CoreError::TokenExpired
                | CoreError::InvalidCredentials
                | CoreError::UnknownUser => StatusCode::UNAUTHORIZED,
                CoreError::Forbidden => StatusCode::FORBIDDEN,
                CoreError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Repository(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AuthError::Body(rejection) => rejection.status(),
            AuthError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Auth error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoochat_core::auth::AuthError as CoreError;

    #[test]
    fn status_codes() {
        assert_eq!(
            AuthError::from(CoreError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::from(CoreError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::from(ValidationError::Empty { field: "name" }).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AuthError::from(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "a@b.co".to_string()
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::from(RepositoryError::ConnectionFailed("down".to_string())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Config("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
