use chrono::Duration;

use zoochat_core::auth::{is_admin_email, parse_admin_emails};

use crate::error::AuthError;

/// HS256 keys shorter than this are rejected.
pub const MIN_SECRET_LEN: usize = 32;

const DEV_SECRET: &str = "zoochat-development-secret-do-not-use-in-prod";

/// Complete auth configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub token_ttl: Duration,
    /// Lowercased emails that register as admins.
    pub admin_emails: Vec<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("token_ttl", &self.token_ttl)
            .field("admin_emails", &self.admin_emails)
            .finish()
    }
}

impl AuthConfig {
    /// Creates a config with default issuer and TTL.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, AuthError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::Config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(Self {
            jwt_secret,
            issuer: "zoochat".to_string(),
            token_ttl: Duration::minutes(60),
            admin_emails: Vec::new(),
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_admin_emails(mut self, raw: &str) -> Self {
        self.admin_emails = parse_admin_emails(raw);
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC key, at least 32 bytes. Required in release builds.
    /// - `JWT_ISSUER`: `iss` claim (default: `zoochat`)
    /// - `TOKEN_TTL_MINUTES`: token lifetime (default: 60)
    /// - `ADMIN_EMAILS`: comma-separated emails that register as admins
    pub fn from_env() -> Result<Self, AuthError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
            Err(_) => return Err(AuthError::Config("JWT_SECRET must be set".to_string())),
        };

        let ttl_minutes = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| {
                    AuthError::Config(format!(
                        "TOKEN_TTL_MINUTES must be a positive integer, got '{raw}'"
                    ))
                })?,
            Err(_) => 60,
        };

        let mut config = Self::new(secret)?
            .with_token_ttl(Duration::minutes(ttl_minutes))
            .with_admin_emails(&std::env::var("ADMIN_EMAILS").unwrap_or_default());

        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.issuer = issuer;
        }

        Ok(config)
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        is_admin_email(&self.admin_emails, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(AuthConfig::new("short"), Err(AuthError::Config(_))));
        assert!(AuthConfig::new("x".repeat(32)).is_ok());
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = AuthConfig::new("s".repeat(40)).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("ssss"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn admin_emails_match_case_insensitively() {
        let config = AuthConfig::new("x".repeat(32))
            .unwrap()
            .with_admin_emails("Keeper@Zoo.test");
        assert!(config.is_admin_email("keeper@zoo.test"));
        assert!(!config.is_admin_email("guest@zoo.test"));
    }
}
