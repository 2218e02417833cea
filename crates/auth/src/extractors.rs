//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use zoochat_core::auth::{extract_bearer_token, AuthError as CoreError};
use zoochat_core::user::User;

use crate::error::AuthError;
use crate::tokens::verify_token;
use crate::AuthState;

/// Extractor for an authenticated user. Returns 401 if not authenticated.
///
/// The token alone is not trusted: the user is re-read so deleted accounts
/// and role changes take effect immediately.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(CoreError::MissingToken)?
            .to_str()
            .map_err(|_| CoreError::InvalidToken("invalid authorization header".to_string()))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| CoreError::InvalidToken("expected a bearer token".to_string()))?;

        let claims = verify_token(&auth_state.config, token)?;

        let user = auth_state
            .users
            .get_user(claims.sub)
            .await?
            .ok_or(CoreError::UnknownUser)?;

        Ok(CurrentUser(user))
    }
}

/// Extractor for an authenticated admin. Returns 401 if not authenticated,
/// 403 if the user is not an admin.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::debug!(user_id = %user.id, "Admin role required");
            return Err(CoreError::Forbidden.into());
        }
        Ok(AdminUser(user))
    }
}

/// Extractor for optionally authenticated user. Returns None if not authenticated.
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalUser(None));
        }
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(CurrentUser(user)) => Ok(OptionalUser(Some(user))),
            Err(err @ AuthError::Repository(_)) => Err(err),
            Err(_) => Ok(OptionalUser(None)),
        }
    }
}

/// JSON body extractor that rejects with an [`AuthError`] JSON body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);
