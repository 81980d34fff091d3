//! CLI configuration

use std::sync::Arc;

use anyhow::{Context, Result};
use hangar_client::RegistryClient;
use hangar_core::domain::location::Location;
use hangar_sync::{Reconciler, RunTaskRotator, SyncConfig};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Configuration shared by every command
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub location: Location,
    pub sync: SyncConfig,
    pub json: bool,
}

impl Config {
    /// Builds an HTTP client, authenticated when a token is configured
    pub fn client(&self) -> Result<Arc<RegistryClient>> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Token contains invalid header characters")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Arc::new(RegistryClient::with_client(&self.api_url, http)))
    }

    pub fn reconciler(&self) -> Result<Reconciler<RegistryClient>> {
        Reconciler::new(self.client()?, self.sync.clone()).context("Invalid sync configuration")
    }

    pub fn rotator(&self) -> Result<RunTaskRotator<RegistryClient>> {
        Ok(RunTaskRotator::new(self.client()?))
    }
}
