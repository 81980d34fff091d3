//! Iteration command handlers

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use hangar_core::domain::iteration::Iteration;

use super::build::print_build;
use super::print_json;
use crate::config::Config;
use crate::types::IterationTarget;

/// Iteration subcommands
#[derive(Subcommand)]
pub enum IterationCommands {
    /// Create an iteration for a fingerprint if it does not exist
    Upsert {
        /// Bucket slug
        bucket: String,

        /// Iteration fingerprint
        fingerprint: String,
    },
    /// List every iteration in a bucket
    List {
        /// Bucket slug
        bucket: String,
    },
    /// Get iteration details
    Get {
        /// Bucket slug
        bucket: String,

        #[command(flatten)]
        target: IterationTarget,
    },
    /// Revoke an iteration, now or at a given time
    Revoke {
        /// Bucket slug
        bucket: String,

        #[command(flatten)]
        target: IterationTarget,

        /// When the revocation takes effect (RFC 3339, defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Delete an iteration
    Delete {
        /// Bucket slug
        bucket: String,

        #[command(flatten)]
        target: IterationTarget,
    },
}

/// Handle iteration commands
pub async fn handle_iteration_command(command: IterationCommands, config: &Config) -> Result<()> {
    let reconciler = config.reconciler()?;

    match command {
        IterationCommands::Upsert {
            bucket,
            fingerprint,
        } => {
            let iteration = reconciler
                .upsert_iteration(&config.location, &bucket, &fingerprint)
                .await
                .context("Failed to upsert iteration")?;

            if config.json {
                return print_json(&iteration);
            }
            println!("{}", "Iteration ready".green().bold());
            print_iteration(&iteration);
        }
        IterationCommands::List { bucket } => {
            let iterations = reconciler
                .list_iterations(&config.location, &bucket)
                .await
                .context("Failed to list iterations")?;

            if config.json {
                return print_json(&iterations);
            }

            if iterations.is_empty() {
                println!("{}", "No iterations found.".yellow());
                return Ok(());
            }

            println!(
                "{}",
                format!("Found {} iteration(s):", iterations.len()).bold()
            );
            for iteration in iterations {
                println!(
                    "  {} {} {} {}",
                    "▸".cyan(),
                    iteration.id.dimmed(),
                    iteration.fingerprint,
                    colorize_version(&iteration)
                );
            }
        }
        IterationCommands::Get { bucket, target } => {
            let target = target.require()?;
            let iteration = reconciler
                .get_iteration(&config.location, &bucket, &target)
                .await
                .with_context(|| format!("Failed to get iteration {}", target))?;

            if config.json {
                return print_json(&iteration);
            }
            print_iteration(&iteration);
        }
        IterationCommands::Revoke { bucket, target, at } => {
            let target = target.require()?;
            let iteration = reconciler
                .revoke_iteration(&config.location, &bucket, &target, at.unwrap_or_else(Utc::now))
                .await
                .with_context(|| format!("Failed to revoke iteration {}", target))?;

            if config.json {
                return print_json(&iteration);
            }
            println!("{}", "Iteration revoked".yellow().bold());
            print_iteration(&iteration);
        }
        IterationCommands::Delete { bucket, target } => {
            let target = target.require()?;
            reconciler
                .delete_iteration(&config.location, &bucket, &target)
                .await
                .with_context(|| format!("Failed to delete iteration {}", target))?;
            println!("{} {}", "Deleted iteration".green(), target.to_string().bold());
        }
    }

    Ok(())
}

fn print_iteration(iteration: &Iteration) {
    println!("  {} {}", "ID:".bold(), iteration.id);
    println!("  {} {}", "Bucket:".bold(), iteration.bucket_slug);
    println!("  {} {}", "Fingerprint:".bold(), iteration.fingerprint.cyan());
    println!("  {} {}", "Version:".bold(), colorize_version(iteration));
    if let Some(revoke_at) = iteration.revoke_at {
        println!("  {} {}", "Revoke at:".bold(), revoke_at.to_rfc3339().red());
    }
    if let Some(created_at) = iteration.created_at {
        println!(
            "  {} {}",
            "Created:".bold(),
            created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    if !iteration.builds.is_empty() {
        println!("  {}", "Builds:".bold());
        for build in &iteration.builds {
            print_build(build);
        }
    }
}

fn colorize_version(iteration: &Iteration) -> ColoredString {
    if iteration.is_revoked(Utc::now()) {
        format!("v{} (revoked)", iteration.incremental_version).red()
    } else if iteration.is_published() {
        format!("v{}", iteration.incremental_version).green()
    } else {
        "unpublished".dimmed()
    }
}
