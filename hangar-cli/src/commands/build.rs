//! Build command handlers

use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hangar_core::domain::build::{Build, BuildStatus};
use hangar_sync::BuildPublication;
use hangar_sync::desired::{BuildSpec, ImageSpec};

use super::print_json;
use crate::config::Config;
use crate::types::{parse_image, parse_key_val};

/// Build subcommands
#[derive(Subcommand)]
pub enum BuildCommands {
    /// Publish a finished build into the iteration for a fingerprint
    ///
    /// The iteration is created when missing. If another run already
    /// claimed the component, its build is reported and nothing is changed.
    Publish {
        /// Bucket slug
        bucket: String,

        /// Iteration fingerprint
        fingerprint: String,

        /// Builder component (e.g., amazon-ebs.example)
        #[arg(short, long)]
        component_type: String,

        /// Cloud provider the images live in
        #[arg(short = 'p', long)]
        cloud_provider: String,

        /// Images as region=image_id pairs
        #[arg(short, long, value_parser = parse_image)]
        image: Vec<ImageSpec>,

        /// Labels as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        label: Vec<(String, String)>,
    },
}

/// Handle build commands
pub async fn handle_build_command(command: BuildCommands, config: &Config) -> Result<()> {
    match command {
        BuildCommands::Publish {
            bucket,
            fingerprint,
            component_type,
            cloud_provider,
            image,
            label,
        } => {
            let reconciler = config.reconciler()?;
            let iteration = reconciler
                .upsert_iteration(&config.location, &bucket, &fingerprint)
                .await
                .context("Failed to upsert iteration")?;

            let spec = BuildSpec {
                component_type,
                cloud_provider,
                images: image,
                labels: label.into_iter().collect::<HashMap<_, _>>(),
            };
            let publication = reconciler
                .publish_build(&config.location, &bucket, &iteration, &spec)
                .await
                .context("Failed to publish build")?;

            if config.json {
                return print_json(&publication.build());
            }

            match &publication {
                BuildPublication::Published(_) => {
                    println!("{}", "Build published".green().bold());
                }
                BuildPublication::Superseded(_) => {
                    println!(
                        "{}",
                        "Build already claimed by another run, left unchanged"
                            .yellow()
                            .bold()
                    );
                }
            }
            if let Some(build) = publication.build() {
                print_build(build);
            }
        }
    }

    Ok(())
}

pub(crate) fn print_build(build: &Build) {
    println!(
        "  {} {} {} {}",
        "▸".cyan(),
        build.component_type,
        format!("({})", build.cloud_provider).dimmed(),
        colorize_status(&build.status)
    );
    for image in &build.images {
        println!("      {} {}", image.region.dimmed(), image.image_id);
    }
}

fn colorize_status(status: &BuildStatus) -> ColoredString {
    match status {
        BuildStatus::Done => status.to_string().green(),
        BuildStatus::Failed | BuildStatus::Cancelled => status.to_string().red(),
        BuildStatus::Running => status.to_string().blue(),
        _ => status.to_string().yellow(),
    }
}
