//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create the table, or add missing indexes to an existing one.
    Deploy(TableArgs),

    /// Delete the table and all of its data.
    Destroy(TableArgs),
}

/// Options shared by deploy and destroy.
#[derive(Debug, clap::Args)]
#[command(long_about = "Manage the zoochat DynamoDB table.

The table uses PK/SK keys with two Global Secondary Indexes:
GSI1 (email lookup, per-user turns) and GSI2 (listing by entity type).
A plan of changes is shown before anything is applied.

Environment variables:
  AWS_ENDPOINT_URL    - Use DynamoDB Local (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct TableArgs {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Table name to use.
    #[arg(long, env = "DYNAMODB_TABLE_NAME", default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(args) => run_deploy(args, &global).await,
        DynamodbAction::Destroy(args) => run_destroy(args, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn connect(global: &crate::Global) -> aws_sdk_dynamodb::Client {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    client::create_client(&aws_config).await
}

async fn run_deploy(args: TableArgs, global: &crate::Global) -> Result<()> {
    let dynamo_client = connect(global).await;
    let current_state = client::get_table_state(&dynamo_client, &args.table_name).await?;

    let table_config = config::zoochat_table_config().with_table_name(&args.table_name);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            match line.chars().next() {
                Some('+') => aprintln!("  {}", p_g(&line)),
                Some('~') => aprintln!("  {}", p_y(&line)),
                _ => aprintln!("  {}", line),
            }
        }
        aprintln!();
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !args.force {
        confirm("Apply these changes?", true)?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_destroy(args: TableArgs, global: &crate::Global) -> Result<()> {
    let dynamo_client = connect(global).await;
    let current_state = client::get_table_state(&dynamo_client, &args.table_name).await?;

    let plan = planning::calculate_destroy_plan(current_state.as_ref(), &args.table_name);

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in planning::format_destroy_plan(&plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !args.force {
        confirm(
            "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
            false,
        )?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Deleting table..."));
    }

    deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Table destroyed successfully."));
    }

    Ok(())
}
