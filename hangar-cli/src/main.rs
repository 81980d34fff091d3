//! Hangar CLI
//!
//! Command-line interface for reconciling image-registry state.

mod commands;
mod config;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use hangar_core::domain::location::Location;
use hangar_sync::SyncConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hangar")]
#[command(about = "Hangar image-registry reconciliation CLI", long_about = None)]
struct Cli {
    /// Registry service URL
    #[arg(long, env = "HANGAR_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "HANGAR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Organization the project belongs to
    #[arg(long, env = "HANGAR_ORGANIZATION_ID")]
    organization_id: String,

    /// Project to operate on
    #[arg(long, env = "HANGAR_PROJECT_ID")]
    project_id: String,

    /// Cloud provider of the region (required by network lookups)
    #[arg(long, env = "HANGAR_REGION_PROVIDER", requires = "region")]
    region_provider: Option<String>,

    /// Region within the provider
    #[arg(long, env = "HANGAR_REGION", requires = "region_provider")]
    region: Option<String>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hangar_cli=info,hangar_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let sync = SyncConfig::from_env().context("Failed to load sync configuration")?;
    sync.validate().context("Invalid sync configuration")?;

    let mut location = Location::new(cli.organization_id, cli.project_id);
    if let (Some(provider), Some(region)) = (cli.region_provider, cli.region) {
        location = location.with_region(provider, region);
    }

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
        location,
        sync,
        json: cli.json,
    };

    handle_command(cli.command, &config).await
}
