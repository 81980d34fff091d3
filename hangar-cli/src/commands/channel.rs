//! Channel command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hangar_core::domain::channel::Channel;

use super::print_json;
use crate::config::Config;
use crate::types::IterationTarget;

/// Channel subcommands
#[derive(Subcommand)]
pub enum ChannelCommands {
    /// List every channel in a bucket
    List {
        /// Bucket slug
        bucket: String,
    },
    /// Create a channel if it does not exist, optionally pointing it at an iteration
    Upsert {
        /// Bucket slug
        bucket: String,

        /// Channel slug
        slug: String,

        #[command(flatten)]
        target: IterationTarget,
    },
    /// Point an existing channel at an iteration
    Assign {
        /// Bucket slug
        bucket: String,

        /// Channel slug
        slug: String,

        #[command(flatten)]
        target: IterationTarget,
    },
    /// Delete a channel
    Delete {
        /// Bucket slug
        bucket: String,

        /// Channel slug
        slug: String,
    },
}

/// Handle channel commands
pub async fn handle_channel_command(command: ChannelCommands, config: &Config) -> Result<()> {
    let reconciler = config.reconciler()?;

    match command {
        ChannelCommands::List { bucket } => {
            let channels = reconciler
                .list_channels(&config.location, &bucket)
                .await
                .context("Failed to list channels")?;

            if config.json {
                return print_json(&channels);
            }

            if channels.is_empty() {
                println!("{}", "No channels found.".yellow());
                return Ok(());
            }

            println!("{}", format!("Found {} channel(s):", channels.len()).bold());
            for channel in &channels {
                print_channel(channel);
            }
        }
        ChannelCommands::Upsert {
            bucket,
            slug,
            target,
        } => {
            let channel = reconciler
                .upsert_channel(&config.location, &bucket, &slug, target.to_ref().as_ref())
                .await
                .with_context(|| format!("Failed to upsert channel {}", slug))?;

            if config.json {
                return print_json(&channel);
            }
            println!("{}", "Channel ready".green().bold());
            print_channel(&channel);
        }
        ChannelCommands::Assign {
            bucket,
            slug,
            target,
        } => {
            let channel = reconciler
                .assign_channel(&config.location, &bucket, &slug, target.to_ref().as_ref())
                .await
                .with_context(|| format!("Failed to assign channel {}", slug))?;

            if config.json {
                return print_json(&channel);
            }
            println!("{}", "Channel assigned".green().bold());
            print_channel(&channel);
        }
        ChannelCommands::Delete { bucket, slug } => {
            reconciler
                .delete_channel(&config.location, &bucket, &slug)
                .await
                .with_context(|| format!("Failed to delete channel {}", slug))?;
            println!("{} {}", "Deleted channel".green(), slug.bold());
        }
    }

    Ok(())
}

fn print_channel(channel: &Channel) {
    let target = match &channel.iteration {
        Some(iteration) => format!(
            "→ {} (v{})",
            iteration.fingerprint, iteration.incremental_version
        )
        .normal(),
        None => "unassigned".dimmed(),
    };
    let managed = if channel.managed {
        " [managed]".dimmed()
    } else {
        "".normal()
    };
    println!("  {} {}{} {}", "▸".cyan(), channel.slug.bold(), managed, target);
}
