//! Command handlers for the Hangar CLI
//!
//! Each registry resource has its own subcommand group; handlers build a
//! reconciler from the shared [`Config`] and print results.

pub mod bucket;
pub mod build;
pub mod channel;
pub mod iteration;
pub mod network;
pub mod registry;
pub mod run_task;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;

use bucket::BucketCommands;
use build::BuildCommands;
use channel::ChannelCommands;
use iteration::IterationCommands;
use network::NetworkCommands;
use registry::RegistryCommands;
use run_task::RunTaskCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Project registry management
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },
    /// Bucket management
    Bucket {
        #[command(subcommand)]
        command: BucketCommands,
    },
    /// Iteration management
    Iteration {
        #[command(subcommand)]
        command: IterationCommands,
    },
    /// Build publication
    Build {
        #[command(subcommand)]
        command: BuildCommands,
    },
    /// Channel management
    Channel {
        #[command(subcommand)]
        command: ChannelCommands,
    },
    /// Run-task credential management
    RunTask {
        #[command(subcommand)]
        command: RunTaskCommands,
    },
    /// Network lookups
    Network {
        #[command(subcommand)]
        command: NetworkCommands,
    },
}

/// Main command router
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    debug!(
        api_url = %config.api_url,
        location = %config.location,
        "Dispatching command"
    );

    match command {
        Commands::Registry { command } => registry::handle_registry_command(command, config).await,
        Commands::Bucket { command } => bucket::handle_bucket_command(command, config).await,
        Commands::Iteration { command } => {
            iteration::handle_iteration_command(command, config).await
        }
        Commands::Build { command } => build::handle_build_command(command, config).await,
        Commands::Channel { command } => channel::handle_channel_command(command, config).await,
        Commands::RunTask { command } => run_task::handle_run_task_command(command, config).await,
        Commands::Network { command } => network::handle_network_command(command, config).await,
    }
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
