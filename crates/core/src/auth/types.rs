use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{User, UserRole};

/// JWT claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    pub iss: String,
    /// Unique token id.
    pub jti: Uuid,
}

impl Claims {
    pub fn for_user(
        user: &User,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn claims_copy_identity_from_user() {
        let user = User::new("ann@zoo.test", "Ann", "hash").with_role(UserRole::Admin);
        let now = Utc::now();
        let claims = Claims::for_user(&user, "zoochat", now, now + Duration::minutes(5));

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "ann@zoo.test");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 300);
        assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(claims.exp));
    }
}
