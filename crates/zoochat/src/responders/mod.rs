//! Chat responder implementations.
//!
//! The backend is chosen at startup from `CHAT_BACKEND`.

mod openai;
mod scripted;

use std::sync::Arc;

use zoochat_core::conversation::ChatResponder;

use crate::config::{ChatBackend, Config};

pub use openai::OpenAiResponder;
pub use scripted::ScriptedResponder;

/// Build the responder selected by `config`.
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn ChatResponder>> {
    let responder: Arc<dyn ChatResponder> = match config.chat_backend {
        ChatBackend::Scripted => Arc::new(ScriptedResponder),
        ChatBackend::OpenAi => {
            if config.openai.api_key.is_none() {
                tracing::warn!(
                    base_url = %config.openai.base_url,
                    "OPENAI_API_KEY not set, sending unauthenticated requests"
                );
            }
            Arc::new(OpenAiResponder::new(&config.openai, config.chat_timeout)?)
        }
    };

    tracing::info!(backend = responder.name(), "Chat responder ready");
    Ok(responder)
}
