//! Bucket command handlers

use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hangar_sync::desired::BucketSpec;

use super::print_json;
use crate::config::Config;
use crate::types::parse_key_val;

/// Bucket subcommands
#[derive(Subcommand)]
pub enum BucketCommands {
    /// List the names of every bucket in the project
    Names,
    /// Create a bucket if it does not exist
    Upsert {
        /// Bucket slug
        slug: String,

        /// Bucket description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Labels as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        label: Vec<(String, String)>,
    },
    /// Delete a bucket along with its channels and iterations
    Delete {
        /// Bucket slug
        slug: String,
    },
}

/// Handle bucket commands
pub async fn handle_bucket_command(command: BucketCommands, config: &Config) -> Result<()> {
    let reconciler = config.reconciler()?;

    match command {
        BucketCommands::Names => {
            let names = reconciler
                .bucket_names(&config.location)
                .await
                .context("Failed to list buckets")?;

            if config.json {
                return print_json(&names);
            }

            if names.is_empty() {
                println!("{}", "No buckets found.".yellow());
                return Ok(());
            }

            println!("{}", format!("Found {} bucket(s):", names.len()).bold());
            for name in names {
                println!("  {} {}", "▸".cyan(), name);
            }
        }
        BucketCommands::Upsert {
            slug,
            description,
            label,
        } => {
            let spec = BucketSpec {
                slug,
                description,
                labels: label.into_iter().collect::<HashMap<_, _>>(),
            };
            let bucket = reconciler
                .upsert_bucket(&config.location, &spec)
                .await
                .context("Failed to upsert bucket")?;

            if config.json {
                return print_json(&bucket);
            }

            println!("{}", "Bucket ready".green().bold());
            println!("  {} {}", "ID:".bold(), bucket.id);
            println!("  {} {}", "Slug:".bold(), bucket.slug.cyan());
            if !bucket.description.is_empty() {
                println!("  {} {}", "Description:".bold(), bucket.description);
            }
            let mut labels: Vec<_> = bucket.labels.iter().collect();
            labels.sort();
            for (key, value) in labels {
                println!("  {} {}={}", "Label:".bold(), key, value);
            }
        }
        BucketCommands::Delete { slug } => {
            reconciler
                .delete_bucket(&config.location, &slug)
                .await
                .with_context(|| format!("Failed to delete bucket {}", slug))?;
            println!("{} {}", "Deleted bucket".green(), slug.bold());
        }
    }

    Ok(())
}
