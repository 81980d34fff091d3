//! Network command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use super::print_json;
use crate::config::Config;

/// Network subcommands
#[derive(Subcommand)]
pub enum NetworkCommands {
    /// Get a network by ID (requires --region-provider and --region)
    Get {
        /// Network ID
        id: String,
    },
}

/// Handle network commands
pub async fn handle_network_command(command: NetworkCommands, config: &Config) -> Result<()> {
    match command {
        NetworkCommands::Get { id } => {
            let client = config.client()?;
            let network = client
                .get_network(&config.location, &id)
                .await
                .with_context(|| format!("Failed to get network {}", id))?;

            if config.json {
                return print_json(&network);
            }

            println!("{}", "Network:".bold());
            println!("  {} {}", "ID:".bold(), network.id);
            println!("  {} {}", "CIDR:".bold(), network.cidr_block.cyan());
            println!("  {} {}", "Provider:".bold(), network.provider_type);
            if let Some(region) = network.location.as_ref().and_then(|l| l.region.as_ref()) {
                println!("  {} {}/{}", "Region:".bold(), region.provider, region.region);
            }
            let state = if network.state == "STABLE" {
                network.state.green()
            } else {
                network.state.yellow()
            };
            println!("  {} {}", "State:".bold(), state);
        }
    }

    Ok(())
}
