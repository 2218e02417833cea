//! HS256 access tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use zoochat_core::auth::{calculate_expiry, AuthError as CoreError, Claims};
use zoochat_core::user::User;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// A freshly signed token and when it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Sign an access token for `user`.
pub fn issue_token(config: &AuthConfig, user: &User) -> Result<IssuedToken, AuthError> {
    let now = Utc::now();
    let expires_at = calculate_expiry(now, config.token_ttl);
    let claims = Claims::for_user(user, &config.issuer, now, expires_at);

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| CoreError::InvalidToken(e.to_string()))?;

    Ok(IssuedToken { token, expires_at })
}

/// Verify signature, expiry and issuer, returning the claims.
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => CoreError::TokenExpired,
        ErrorKind::InvalidIssuer => CoreError::InvalidToken("wrong issuer".to_string()),
        ErrorKind::InvalidSignature => CoreError::InvalidToken("bad signature".to_string()),
        _ => CoreError::InvalidToken(e.to_string()),
    })?;

    Ok(data.claims)
}
