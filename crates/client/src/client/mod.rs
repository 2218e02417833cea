//! HTTP client for the zoochat API.

pub mod assistants;
pub mod auth;
pub mod conversation;
pub mod guardrails;
pub mod health;
pub mod users;

use reqwest::{Method, RequestBuilder, StatusCode};

use crate::error::{ClientError, Result};

/// HTTP client for the zoochat API.
#[derive(Debug, Clone)]
pub struct ZoochatClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ZoochatClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create from environment (ZOOCHAT_URL or default, ZOOCHAT_TOKEN if set).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ZOOCHAT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let client = Self::new(base_url);
        match std::env::var("ZOOCHAT_TOKEN") {
            Ok(token) if !token.is_empty() => client.with_token(token),
            _ => client,
        }
    }

    /// Use a bearer token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the bearer token when one is configured.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decode a successful JSON response or turn the failure into a `ClientError`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Handle responses with no body (204).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Server errors carry `{"error": "..."}`; fall back to the raw body.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let resource = response.url().path().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = error_message(&body);

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized { message },
        StatusCode::NOT_FOUND => ClientError::NotFound { resource },
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error":"assistant is inactive"}"#), "assistant is inactive");
        assert_eq!(error_message("gateway exploded"), "gateway exploded");
        assert_eq!(error_message(r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
    }

    #[test]
    fn new_strips_trailing_slash() {
        let client = ZoochatClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/livez"), "http://localhost:3000/livez");
        assert_eq!(client.token(), None);
    }

    #[test]
    fn with_token_is_kept() {
        let client = ZoochatClient::new("http://zoo").with_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }

    /// Serves canned responses on an ephemeral port.
    async fn stub_server() -> ZoochatClient {
        use axum::{http::StatusCode, routing::get, Json, Router};
        use serde_json::json;

        let app = Router::new()
            .route(
                "/api/auth/me",
                get(|| async {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": "missing bearer token"})),
                    )
                }),
            )
            .route(
                "/api/assistants/{id}",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "gone"}))) }),
            )
            .route(
                "/api/guardrails",
                get(|| async { (StatusCode::OK, "not json") }),
            )
            .route(
                "/api/conversations",
                get(|| async {
                    (
                        StatusCode::BAD_GATEWAY,
                        Json(json!({"error": "chat backend failed"})),
                    )
                }),
            )
            .route(
                "/readyz",
                get(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(json!({
                            "healthy": false,
                            "latency_ms": 3,
                            "chat_backend": "scripted",
                            "error": "storage unavailable"
                        })),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ZoochatClient::new(format!("http://{}", addr)).with_token("test-token")
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let client = stub_server().await;

        match client.me().await {
            Err(ClientError::Unauthorized { message }) => {
                assert_eq!(message, "missing bearer token")
            }
            other => panic!("expected 401, got {other:?}"),
        }

        let err = client.get_assistant(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::NotFound { ref resource } if resource.starts_with("/api/assistants/")
        ));
        assert_eq!(err.status(), Some(404));

        match client.list_conversations().await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "chat backend failed");
            }
            other => panic!("expected 502, got {other:?}"),
        }

        let err = client.list_guardrails().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn unhealthy_readiness_is_still_a_report() {
        let client = stub_server().await;
        let readiness = client.readyz().await.unwrap();

        assert!(!readiness.healthy);
        assert_eq!(readiness.error.as_deref(), Some("storage unavailable"));
    }
}
