//! CLI command definitions.

pub mod assistants;
pub mod auth;
pub mod conversation;
pub mod guardrails;
pub mod health;
pub mod users;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the zoochat API.
#[derive(Debug, Parser)]
#[command(name = "zoochat-client")]
#[command(about = "CLI client for the zoochat API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "ZOOCHAT_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Bearer token from `auth login` or `auth register`.
    #[arg(long, env = "ZOOCHAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register, log in, or show the current account.
    Auth(auth::AuthCommand),
    /// User management.
    Users(users::UsersCommand),
    /// Assistant management.
    Assistants(assistants::AssistantsCommand),
    /// Guardrail management.
    Guardrails(guardrails::GuardrailsCommand),
    /// Send a message to an assistant.
    Chat(conversation::ChatArgs),
    /// Show or delete a conversation's history.
    History(conversation::HistoryArgs),
    /// List your conversations.
    Conversations,
    /// Server health checks.
    Health(health::HealthCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_and_chat() {
        let cli = Cli::try_parse_from([
            "zoochat-client",
            "--base-url",
            "http://zoo:8080",
            "--token",
            "abc",
            "--format",
            "json",
            "chat",
            "--assistant",
            "6f1c2d3e-0000-4000-8000-000000000001",
            "how",
            "much",
            "do",
            "you",
            "sleep?",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "http://zoo:8080");
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.message.join(" "), "how much do you sleep?");
                assert!(args.conversation.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "zoochat-client",
            "guardrails",
            "create",
            "--name",
            "Safety",
            "--refusal",
            "Let's talk animals",
            "--topic",
            "weapons",
            "--topic",
            "credit card",
        ])
        .unwrap();

        match cli.command {
            Commands::Guardrails(cmd) => match cmd.action {
                guardrails::GuardrailsAction::Create { topic, .. } => {
                    assert_eq!(topic, vec!["weapons", "credit card"]);
                }
                other => panic!("unexpected action: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        let result = Cli::try_parse_from([
            "zoochat-client",
            "users",
            "update",
            "6f1c2d3e-0000-4000-8000-000000000001",
            "--role",
            "zookeeper",
        ]);
        assert!(result.is_err());
    }
}
