use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use zoochat_core::conversation::HistoryLimits;

/// Which chat responder answers visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackend {
    /// Offline, deterministic persona replies.
    Scripted,
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    OpenAi,
}

impl FromStr for ChatBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scripted" => Ok(Self::Scripted),
            "openai" => Ok(Self::OpenAi),
            other => bail!("unknown CHAT_BACKEND '{other}' (expected 'scripted' or 'openai')"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table (default: "zoochat"). Only read by the `dynamodb` backend.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_name: String,
    pub chat_backend: ChatBackend,
    pub openai: OpenAiConfig,
    /// Upper bound for a single chat backend call (default: 30s)
    pub chat_timeout: Duration,
    /// How much history is replayed to the model
    pub history: HistoryLimits,
    /// Server-wide cap on a visitor message (default: 2000)
    pub max_message_chars: usize,
    /// Whole-request timeout (default: 60s)
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: "zoochat".to_string(),
            chat_backend: ChatBackend::Scripted,
            openai: OpenAiConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: None,
                model: "gpt-4o-mini".to_string(),
            },
            chat_timeout: Duration::from_secs(30),
            history: HistoryLimits::default(),
            max_message_chars: 2000,
            request_timeout: Duration::from_secs(60),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table (default: "zoochat")
    /// - `CHAT_BACKEND` - `scripted` or `openai` (default: scripted)
    /// - `OPENAI_BASE_URL` - API base (default: "https://api.openai.com/v1")
    /// - `OPENAI_API_KEY` - Bearer key sent to the API
    /// - `OPENAI_MODEL` - Model name (default: "gpt-4o-mini")
    /// - `CHAT_TIMEOUT_SECONDS` - Chat call timeout (default: 30)
    /// - `HISTORY_WINDOW_TURNS` - Turns replayed to the model (default: 10)
    /// - `HISTORY_MAX_CHARS` - Character budget for replayed turns (default: 6000)
    /// - `MAX_MESSAGE_CHARS` - Longest accepted visitor message (default: 2000)
    /// - `REQUEST_TIMEOUT_SECONDS` - Whole-request timeout (default: 60)
    /// - `LOG_FORMAT` - `json` for JSON logs, anything else for human output
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let chat_backend = match env::var("CHAT_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.chat_backend,
        };

        let config = Self {
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or(defaults.table_name),
            chat_backend,
            openai: OpenAiConfig {
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai.base_url),
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai.model),
            },
            chat_timeout: Duration::from_secs(parse_env("CHAT_TIMEOUT_SECONDS", 30)?),
            history: HistoryLimits {
                max_turns: parse_env("HISTORY_WINDOW_TURNS", defaults.history.max_turns)?,
                max_chars: parse_env("HISTORY_MAX_CHARS", defaults.history.max_chars)?,
            },
            max_message_chars: parse_env("MAX_MESSAGE_CHARS", defaults.max_message_chars)?,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECONDS", 60)?),
            log_format: match env::var("LOG_FORMAT") {
                Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        if config.max_message_chars == 0 {
            bail!("MAX_MESSAGE_CHARS must be at least 1");
        }

        Ok(config)
    }
}

/// Parse an optional numeric environment variable, failing loudly on garbage.
fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: '{raw}'")),
        Err(_) => Ok(default),
    }
}
