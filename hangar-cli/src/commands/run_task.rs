//! Run-task command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hangar_core::domain::run_task::RunTaskCredential;

use super::print_json;
use crate::config::Config;

/// Run-task subcommands
#[derive(Subcommand)]
pub enum RunTaskCommands {
    /// Show the run-task endpoint and HMAC key
    Get,
    /// Issue a new HMAC key; the previous key stops working
    Regenerate,
}

/// Handle run-task commands
pub async fn handle_run_task_command(command: RunTaskCommands, config: &Config) -> Result<()> {
    let rotator = config.rotator()?;
    let regenerate = matches!(command, RunTaskCommands::Regenerate);

    let reconciliation = rotator
        .reconcile(&config.location, regenerate)
        .await
        .context("Failed to read run-task credential")?;

    if config.json {
        return print_json(&reconciliation.credential);
    }

    if reconciliation.rotated {
        println!("{}", "HMAC key regenerated".yellow().bold());
    }
    print_credential(&reconciliation.credential);
    Ok(())
}

fn print_credential(credential: &RunTaskCredential) {
    println!("  {} {}", "Endpoint:".bold(), credential.endpoint_url.cyan());
    println!("  {} {}", "HMAC key:".bold(), credential.hmac_key);
}
