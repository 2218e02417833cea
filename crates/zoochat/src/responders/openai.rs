//! Responder for OpenAI-compatible chat completion APIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zoochat_core::conversation::{ChatError, ChatMessage, ChatRequest, ChatResponder};

use crate::config::OpenAiConfig;

/// Longest upstream error body echoed back in `ChatError::Upstream`.
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the reply text out of a completion body.
fn extract_reply(body: &str) -> Result<String, ChatError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
        .ok_or_else(|| ChatError::InvalidResponse("no reply in choices".to_string()))
}

pub struct OpenAiResponder {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiResponder {
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatResponder for OpenAiResponder {
    #[tracing::instrument(skip_all, fields(model = %self.model, messages = request.messages.len()))]
    async fn respond(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let mut http = self.client.post(&self.endpoint).json(&CompletionRequest {
            model: &self.model,
            messages: &request.messages,
        });
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(|e| {
            if e.is_timeout() {
                ChatError::Timeout
            } else {
                ChatError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ChatError::Timeout
            } else {
                ChatError::InvalidResponse(e.to_string())
            }
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Chat backend returned an error");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        extract_reply(&body)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use tokio::net::TcpListener;

    fn chat_request() -> ChatRequest {
        ChatRequest {
            assistant_name: "Leo".to_string(),
            species: "Lion".to_string(),
            messages: vec![ChatMessage::system("be a lion"), ChatMessage::user("hi")],
        }
    }

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn responder(base_url: String, timeout: Duration) -> OpenAiResponder {
        OpenAiResponder::new(
            &OpenAiConfig {
                base_url,
                api_key: Some("test-key".to_string()),
                model: "test-model".to_string(),
            },
            timeout,
        )
        .unwrap()
    }

    #[test]
    fn extract_reply_takes_first_non_empty_choice() {
        let body = r#"{"choices":[{"message":{"content":"  "}},{"message":{"content":" Roar! "}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), "Roar!");
    }

    #[test]
    fn extract_reply_rejects_bad_bodies() {
        assert!(matches!(
            extract_reply("not json"),
            Err(ChatError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_reply(r#"{"choices":[]}"#),
            Err(ChatError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn sends_model_messages_and_key() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(
                |headers: axum::http::HeaderMap, Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(headers["authorization"], "Bearer test-key");
                    assert_eq!(body["model"], "test-model");
                    assert_eq!(body["messages"][0]["role"], "system");
                    assert_eq!(body["messages"][1]["content"], "hi");
                    Json(serde_json::json!({
                        "choices": [{"message": {"role": "assistant", "content": "Roar!"}}]
                    }))
                },
            ),
        );
        let base = serve(router).await;

        let reply = responder(base, Duration::from_secs(5))
            .respond(&chat_request())
            .await
            .unwrap();
        assert_eq!(reply, "Roar!");
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = serve(router).await;

        let err = responder(base, Duration::from_secs(5))
            .respond(&chat_request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChatError::Upstream {
                status: 429,
                message: "slow down".to_string()
            }
        );
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = serve(router).await;

        let err = responder(base, Duration::from_millis(100))
            .respond(&chat_request())
            .await
            .unwrap_err();
        assert_eq!(err, ChatError::Timeout);
    }
}
