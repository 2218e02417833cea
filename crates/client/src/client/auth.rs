//! Authentication API operations.

use reqwest::Method;
use zoochat_core::user::{LoginRequest, RegisterRequest, TokenResponse, User};

use super::ZoochatClient;
use crate::error::Result;

impl ZoochatClient {
    /// Register a new account and receive a token.
    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse> {
        let response = self
            .request(Method::POST, "/api/auth/register")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Exchange credentials for a token.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse> {
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// The account behind the current token.
    pub async fn me(&self) -> Result<User> {
        let response = self.request(Method::GET, "/api/auth/me").send().await?;
        self.handle_response(response).await
    }
}
