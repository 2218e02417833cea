//! API request and response types for account operations.
//!
//! Shared between the server and client for type-safe API communication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operations::normalize_email;
use super::types::{User, UserDetails, UserRole};
use crate::validation::normalize_labels;

/// Request payload for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued access token plus the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl TokenResponse {
    pub fn bearer(token: String, expires_at: DateTime<Utc>, user: User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
            user,
        }
    }
}

/// Request payload for `PUT /api/users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UpdateUserRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Apply updates to an existing user.
    pub fn apply_to(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            user.email = normalize_email(&email);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated_at = now;
    }
}

/// Request payload for `PUT /api/users/{id}/details`.
///
/// This is a full replacement, not a patch: omitted fields are cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertUserDetailsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default)]
    pub favorite_animals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpsertUserDetailsRequest {
    /// Builds the stored profile for `user_id`.
    pub fn into_details(self, user_id: uuid::Uuid, now: DateTime<Utc>) -> UserDetails {
        UserDetails {
            user_id,
            age: self.age,
            favorite_animals: normalize_labels(self.favorite_animals),
            notes: self
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn update_request_applies_only_present_fields() {
        let mut user = User::new("otter@zoo.org", "Otter", "hash");
        let original_email = user.email.clone();
        let now = Utc::now();

        UpdateUserRequest::new()
            .with_name("  River Otter ")
            .apply_to(&mut user, now);

        assert_eq!(user.name, "River Otter");
        assert_eq!(user.email, original_email);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.updated_at, now);
    }

    #[test]
    fn update_request_normalizes_email() {
        let mut user = User::new("otter@zoo.org", "Otter", "hash");
        UpdateUserRequest::new()
            .with_email(" Otter@ZOO.org ")
            .apply_to(&mut user, Utc::now());

        assert_eq!(user.email, "otter@zoo.org");
    }

    #[test]
    fn upsert_details_normalizes_labels_and_notes() {
        let user_id = Uuid::new_v4();
        let details = UpsertUserDetailsRequest {
            age: Some(9),
            favorite_animals: vec!["Penguin".into(), " penguin ".into(), "Lion".into()],
            notes: Some("   ".into()),
        }
        .into_details(user_id, Utc::now());

        assert_eq!(details.user_id, user_id);
        assert_eq!(details.favorite_animals, vec!["Penguin", "Lion"]);
        assert_eq!(details.notes, None);
    }

    #[test]
    fn token_response_is_bearer() {
        let user = User::new("otter@zoo.org", "Otter", "hash");
        let response = TokenResponse::bearer("abc".into(), Utc::now(), user);
        assert_eq!(response.token_type, "Bearer");
    }
}
