//! zoochat-client CLI entry point.

use clap::Parser;
use zoochat_client::cli::{Cli, Commands, OutputFormat};
use zoochat_client::client::ZoochatClient;
use zoochat_client::output::{format_output, pretty};
use zoochat_core::assistant::{
    CreateAssistantRequest, CreateGuardrailRequest, ListAssistantsQuery, UpdateAssistantRequest,
    UpdateGuardrailRequest,
};
use zoochat_core::conversation::{ConvoHistoryQuery, ConvoTurnRequest};
use zoochat_core::user::{
    LoginRequest, RegisterRequest, UpdateUserRequest, UpsertUserDetailsRequest,
};

/// Print `value` as JSON, or with the given pretty formatter.
fn print<T: serde::Serialize>(format: OutputFormat, value: &T, pretty: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", format_output(value, format)),
        OutputFormat::Pretty => println!("{}", pretty(value)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = match &cli.token {
        Some(token) => ZoochatClient::new(&cli.base_url).with_token(token),
        None => ZoochatClient::new(&cli.base_url),
    };
    let format = cli.format;

    match cli.command {
        Commands::Auth(auth_cmd) => {
            use zoochat_client::cli::auth::AuthAction;
            match auth_cmd.action {
                AuthAction::Register {
                    email,
                    password,
                    name,
                } => {
                    let token = client
                        .register(&RegisterRequest {
                            email,
                            password,
                            name,
                        })
                        .await?;
                    print(format, &token, pretty::format_token);
                }
                AuthAction::Login { email, password } => {
                    let token = client.login(&LoginRequest { email, password }).await?;
                    print(format, &token, pretty::format_token);
                }
                AuthAction::Me => {
                    let user = client.me().await?;
                    print(format, &user, pretty::format_user);
                }
            }
        }
        Commands::Users(users_cmd) => {
            use zoochat_client::cli::users::UsersAction;
            match users_cmd.action {
                UsersAction::List => {
                    let users = client.list_users().await?;
                    print(format, &users, |u| pretty::format_users(u));
                }
                UsersAction::Get { id } => {
                    let user = client.get_user(id).await?;
                    print(format, &user, pretty::format_user);
                }
                UsersAction::Update {
                    id,
                    name,
                    email,
                    role,
                } => {
                    let user = client
                        .update_user(id, &UpdateUserRequest { name, email, role })
                        .await?;
                    print(format, &user, |u| format!("Updated:\n{}", pretty::format_user(u)));
                }
                UsersAction::Delete { id } => {
                    client.delete_user(id).await?;
                    if !cli.quiet {
                        println!("Deleted user {}", id);
                    }
                }
                UsersAction::Details { id } => {
                    let details = client.get_user_details(id).await?;
                    print(format, &details, pretty::format_details);
                }
                UsersAction::SetDetails {
                    id,
                    age,
                    animals,
                    notes,
                } => {
                    let details = client
                        .set_user_details(
                            id,
                            &UpsertUserDetailsRequest {
                                age,
                                favorite_animals: animals,
                                notes,
                            },
                        )
                        .await?;
                    print(format, &details, pretty::format_details);
                }
            }
        }
        Commands::Assistants(assistants_cmd) => {
            use zoochat_client::cli::assistants::AssistantsAction;
            match assistants_cmd.action {
                AssistantsAction::List { active } => {
                    let query = ListAssistantsQuery {
                        active: active.then_some(true),
                    };
                    let assistants = client.list_assistants(&query).await?;
                    print(format, &assistants, |a| pretty::format_assistants(a));
                }
                AssistantsAction::Get { id } => {
                    let assistant = client.get_assistant(id).await?;
                    print(format, &assistant, pretty::format_assistant);
                }
                AssistantsAction::Create {
                    name,
                    species,
                    persona,
                    greeting,
                    guardrail,
                    inactive,
                } => {
                    let assistant = client
                        .create_assistant(&CreateAssistantRequest {
                            name,
                            species,
                            persona,
                            greeting,
                            guardrail_id: guardrail,
                            active: !inactive,
                        })
                        .await?;
                    print(format, &assistant, |a| {
                        format!("Created:\n{}", pretty::format_assistant(a))
                    });
                }
                AssistantsAction::Update {
                    id,
                    name,
                    species,
                    persona,
                    greeting,
                    guardrail,
                    detach_guardrail,
                    active,
                } => {
                    let guardrail_id = if detach_guardrail {
                        Some(None)
                    } else {
                        guardrail.map(Some)
                    };
                    let assistant = client
                        .update_assistant(
                            id,
                            &UpdateAssistantRequest {
                                name,
                                species,
                                persona,
                                greeting,
                                guardrail_id,
                                active,
                            },
                        )
                        .await?;
                    print(format, &assistant, |a| {
                        format!("Updated:\n{}", pretty::format_assistant(a))
                    });
                }
                AssistantsAction::Delete { id } => {
                    client.delete_assistant(id).await?;
                    if !cli.quiet {
                        println!("Deleted assistant {}", id);
                    }
                }
            }
        }
        Commands::Guardrails(guardrails_cmd) => {
            use zoochat_client::cli::guardrails::GuardrailsAction;
            match guardrails_cmd.action {
                GuardrailsAction::List => {
                    let guardrails = client.list_guardrails().await?;
                    print(format, &guardrails, |g| pretty::format_guardrails(g));
                }
                GuardrailsAction::Get { id } => {
                    let guardrail = client.get_guardrail(id).await?;
                    print(format, &guardrail, pretty::format_guardrail);
                }
                GuardrailsAction::Create {
                    name,
                    refusal,
                    topic,
                    max_message_chars,
                } => {
                    let guardrail = client
                        .create_guardrail(&CreateGuardrailRequest {
                            name,
                            blocked_topics: topic,
                            max_message_chars,
                            refusal_message: refusal,
                        })
                        .await?;
                    print(format, &guardrail, |g| {
                        format!("Created:\n{}", pretty::format_guardrail(g))
                    });
                }
                GuardrailsAction::Update {
                    id,
                    name,
                    refusal,
                    topic,
                    max_message_chars,
                    no_max_message_chars,
                } => {
                    let max_message_chars = if no_max_message_chars {
                        Some(None)
                    } else {
                        max_message_chars.map(Some)
                    };
                    let guardrail = client
                        .update_guardrail(
                            id,
                            &UpdateGuardrailRequest {
                                name,
                                blocked_topics: topic,
                                max_message_chars,
                                refusal_message: refusal,
                            },
                        )
                        .await?;
                    print(format, &guardrail, |g| {
                        format!("Updated:\n{}", pretty::format_guardrail(g))
                    });
                }
                GuardrailsAction::Delete { id } => {
                    client.delete_guardrail(id).await?;
                    if !cli.quiet {
                        println!("Deleted guardrail {}", id);
                    }
                }
            }
        }
        Commands::Chat(args) => {
            let response = client
                .convo_turn(&ConvoTurnRequest {
                    assistant_id: args.assistant,
                    conversation_id: args.conversation,
                    message: args.message.join(" "),
                })
                .await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&response, format)),
                OutputFormat::Pretty => {
                    if !cli.quiet && args.conversation.is_none() {
                        println!("Conversation {}", response.conversation_id);
                    }
                    println!("{}", pretty::format_turn(&response.turn));
                }
            }
        }
        Commands::History(args) => {
            if args.delete {
                client.delete_convo_history(args.conversation).await?;
                if !cli.quiet {
                    println!("Deleted conversation {}", args.conversation);
                }
            } else {
                let history = client
                    .convo_history(&ConvoHistoryQuery {
                        conversation_id: args.conversation,
                        limit: args.limit,
                    })
                    .await?;
                print(format, &history, |h| pretty::format_history(&h.turns));
            }
        }
        Commands::Conversations => {
            let summaries = client.list_conversations().await?;
            print(format, &summaries, |s| pretty::format_summaries(s));
        }
        Commands::Health(health_cmd) => {
            use zoochat_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.livez().await?;
                    if !cli.quiet {
                        println!("Live");
                    }
                }
                HealthAction::Ready => {
                    let readiness = client.readyz().await?;
                    print(format, &readiness, |r| {
                        let mut output = format!(
                            "Readiness:\n  Healthy: {}\n  Latency: {}ms\n  Chat backend: {}",
                            r.healthy, r.latency_ms, r.chat_backend
                        );
                        if let Some(error) = &r.error {
                            output.push_str(&format!("\n  Error: {}", error));
                        }
                        output
                    });
                    if !readiness.healthy {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}
