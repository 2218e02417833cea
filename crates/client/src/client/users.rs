//! User API operations.

use reqwest::Method;
use uuid::Uuid;
use zoochat_core::user::{UpdateUserRequest, UpsertUserDetailsRequest, User, UserDetails};

use super::ZoochatClient;
use crate::error::Result;

impl ZoochatClient {
    /// List all users (admin only).
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self.request(Method::GET, "/api/users").send().await?;
        self.handle_response(response).await
    }

    /// Get user by ID.
    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        let response = self
            .request(Method::GET, &format!("/api/users/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a user.
    pub async fn update_user(&self, id: Uuid, req: &UpdateUserRequest) -> Result<User> {
        let response = self
            .request(Method::PUT, &format!("/api/users/{}", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete user by ID, along with their details and conversations.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/users/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Get a user's profile details.
    pub async fn get_user_details(&self, id: Uuid) -> Result<UserDetails> {
        let response = self
            .request(Method::GET, &format!("/api/users/{}/details", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create or replace a user's profile details.
    pub async fn set_user_details(
        &self,
        id: Uuid,
        req: &UpsertUserDetailsRequest,
    ) -> Result<UserDetails> {
        let response = self
            .request(Method::PUT, &format!("/api/users/{}/details", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Remove a user's profile details.
    pub async fn delete_user_details(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/users/{}/details", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
