//! Provision the DynamoDB table backing the waitlist service.
//!
//! Creates (or deletes, with `--delete`) the `{service-name}-{stage}` table
//! with the StatusIndex GSI and TTL expiry enabled.

use clap::Parser;

mod client;
mod error;
mod prelude;
mod provision;

use error::{ManageTableError, Result};
use prelude::*;
use provision::Outcome;

/// Manage the waitlist DynamoDB table.
#[derive(Debug, Parser)]
#[command(name = "manage-table")]
#[command(long_about = "Create or delete the DynamoDB table used by the waitlist service.

The table is named {service-name}-{stage} and carries a StatusIndex GSI
(status, checkInTime) plus TTL expiry on the ttl attribute. Creating an
existing table or deleting an absent one is treated as success.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_PROFILE         - AWS profile to use for credentials")]
struct Cli {
    /// Deployment stage, appended to the table name.
    #[arg(long, default_value = "dev", value_parser = ["dev", "prod"])]
    stage: String,

    /// AWS region.
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// Delete the table instead of creating it.
    #[arg(long)]
    delete: bool,

    /// Service name prefix for the table.
    #[arg(long, default_value = "restaurant-queue-system")]
    service_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        aprintln!("{} {}", p_r("Error:"), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let table_name = format!("{}-{}", cli.service_name, cli.stage);
    let aws_config = client::AwsConfig::new(&cli.region);

    aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
    aprintln!("{} {}", p_b("Table:"), table_name);
    aprintln!();

    let dynamo_client = client::create_client(&aws_config).await?;

    if cli.delete {
        delete(&dynamo_client, &table_name, cli.force).await
    } else {
        create(&dynamo_client, &table_name).await
    }
}

async fn create(client: &aws_sdk_dynamodb::Client, table_name: &str) -> Result<()> {
    aprintln!("{}", p_b("Creating table..."));

    match provision::create_table(client, table_name).await? {
        Outcome::AlreadyDone => {
            aprintln!("{}", p_g("Table already exists, nothing to do."));
            return Ok(());
        }
        Outcome::Applied => {}
    }

    aprintln!("{}", p_b("Waiting for table to become active..."));
    if provision::wait_for_table_active(client, table_name).await? {
        aprintln!("{}", p_g("Table is active."));
    } else {
        aprintln!(
            "{}",
            p_y("Warning: timed out waiting for ACTIVE; creation continues in the background.")
        );
    }

    provision::enable_ttl(client, table_name).await;

    aprintln!("{}", p_g("Table created successfully."));
    Ok(())
}

async fn delete(client: &aws_sdk_dynamodb::Client, table_name: &str, force: bool) -> Result<()> {
    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete table '{table_name}'? ALL DATA WILL BE LOST"
            ))
            .default(false)
            .interact()
            .map_err(|e| ManageTableError::AwsSdk(e.to_string()))?;

        if !confirmed {
            return Err(ManageTableError::UserCancelled);
        }
    }

    aprintln!("{}", p_b("Deleting table..."));

    match provision::delete_table(client, table_name).await? {
        Outcome::AlreadyDone => {
            aprintln!("{}", p_g("Table does not exist, nothing to do."));
            return Ok(());
        }
        Outcome::Applied => {}
    }

    aprintln!("{}", p_b("Waiting for table to be removed..."));
    if provision::wait_for_table_removed(client, table_name).await? {
        aprintln!("{}", p_g("Table deleted successfully."));
    } else {
        aprintln!(
            "{}",
            p_y("Warning: timed out waiting for removal; deletion continues in the background.")
        );
    }

    Ok(())
}
