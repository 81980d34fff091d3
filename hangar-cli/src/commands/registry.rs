//! Registry command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hangar_core::domain::registry::{Registry, RegistryTier};

use super::print_json;
use crate::config::Config;

/// Registry subcommands
#[derive(Subcommand)]
pub enum RegistryCommands {
    /// Create the project registry, or move it to another tier
    Upsert {
        /// Feature tier (STANDARD or PLUS)
        #[arg(long, default_value = "STANDARD")]
        tier: RegistryTier,
    },
}

/// Handle registry commands
pub async fn handle_registry_command(command: RegistryCommands, config: &Config) -> Result<()> {
    match command {
        RegistryCommands::Upsert { tier } => {
            let reconciler = config.reconciler()?;
            let registry = reconciler
                .upsert_registry(&config.location, tier)
                .await
                .context("Failed to upsert registry")?;

            if config.json {
                return print_json(&registry);
            }
            print_registry(&registry);
        }
    }

    Ok(())
}

fn print_registry(registry: &Registry) {
    println!("{}", "Registry ready".green().bold());
    println!("  {} {}", "ID:".bold(), registry.id);
    println!("  {} {}", "Tier:".bold(), registry.feature_tier.to_string().cyan());
    let activated = if registry.activated {
        "yes".green()
    } else {
        "no".yellow()
    };
    println!("  {} {}", "Activated:".bold(), activated);
}
