use chrono::{DateTime, Duration, Utc};

use super::Claims;

/// Calculate token expiry from issue time and TTL.
pub fn calculate_expiry(issued_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    issued_at + ttl
}

/// Check if a token has expired.
pub fn is_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

/// Parse a comma-separated list of admin emails, normalized to lowercase.
pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

pub fn is_admin_email(admin_emails: &[String], email: &str) -> bool {
    let email = email.trim().to_lowercase();
    admin_emails.iter().any(|admin| *admin == email)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{User, UserRole};

    #[test]
    fn calculate_expiry_adds_ttl() {
        let issued = Utc::now();
        assert_eq!(
            calculate_expiry(issued, Duration::minutes(60)),
            issued + Duration::minutes(60)
        );
    }

    #[test]
    fn is_expired_at_and_after_exp() {
        let now = Utc::now();
        let user = User::new("a@b.co", "A", "h").with_role(UserRole::User);

        let fresh = Claims::for_user(&user, "zoochat", now, now + Duration::hours(1));
        assert!(!is_expired(&fresh, now));

        let stale = Claims::for_user(&user, "zoochat", now - Duration::hours(1), now);
        assert!(is_expired(&stale, now));
    }

    #[test]
    fn admin_emails_are_normalized() {
        let admins = parse_admin_emails(" Keeper@Zoo.test, ,vet@zoo.test ");
        assert_eq!(admins, vec!["keeper@zoo.test", "vet@zoo.test"]);
        assert!(is_admin_email(&admins, "KEEPER@zoo.test"));
        assert!(!is_admin_email(&admins, "visitor@zoo.test"));
        assert!(parse_admin_emails("").is_empty());
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }
}
