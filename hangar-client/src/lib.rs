//! Hangar HTTP Client
//!
//! A type-safe HTTP client for the remote image-registry service, its
//! operation service, and its network service.
//!
//! Every call is scoped by a [`Location`](hangar_core::domain::location::Location)
//! and is stateless: the client holds nothing but its base URL and a pooled
//! reqwest client, so it can be shared freely across tasks.
//!
//! The [`RegistryApi`] trait mirrors the inherent endpoint methods and is the
//! seam the reconciler is written against.
//!
//! # Example
//!
//! ```no_run
//! use hangar_client::RegistryClient;
//! use hangar_core::domain::location::Location;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RegistryClient::new("http://localhost:8080");
//!     let location = Location::new("my-org", "my-project");
//!
//!     let page = client.list_buckets(&location, None).await?;
//!     for bucket in page.items {
//!         println!("{}", bucket.slug);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod buckets;
mod builds;
mod channels;
pub mod error;
mod iterations;
mod networks;
mod operations;
mod registry;
mod run_task;

// Re-export commonly used types
pub use api::RegistryApi;
pub use error::{ClientError, Result, RpcCode};

use hangar_core::domain::location::Location;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// API version segment of the registry service
pub const REGISTRY_API_VERSION: &str = "2023-01-01";

/// API version segment of the operation service
pub const OPERATION_API_VERSION: &str = "2020-05-05";

/// API version segment of the network service
pub const NETWORK_API_VERSION: &str = "2020-09-07";

/// Extra time an operation wait request is given on top of its server-side timeout
pub const OPERATION_WAIT_GRACE: Duration = Duration::from_secs(5);

/// HTTP client for the registry service
///
/// Endpoint methods are organized into logical groups:
/// - Registry (create, get, update) and run-task credentials
/// - Buckets, iterations, builds and channels
/// - Operations (wait)
/// - Networks (get)
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Base URL of the service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl RegistryClient {
    /// Create a new registry client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use hangar_client::RegistryClient;
    ///
    /// let client = RegistryClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new registry client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings,
    /// authentication headers, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service
    /// * `client` - A configured reqwest Client
    ///
    /// # Example
    /// ```
    /// use hangar_client::RegistryClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = RegistryClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // URL Builders
    // =============================================================================

    /// Location-scoped root of the registry service
    fn registry_url(&self, location: &Location) -> String {
        format!(
            "{}/registry/{}/organizations/{}/projects/{}",
            self.base_url, REGISTRY_API_VERSION, location.organization_id, location.project_id
        )
    }

    /// Root of a bucket's resources
    fn bucket_url(&self, location: &Location, bucket_slug: &str) -> String {
        format!("{}/buckets/{}", self.registry_url(location), bucket_slug)
    }

    /// Location-scoped root of the operation service
    fn operation_url(&self, location: &Location) -> String {
        format!(
            "{}/operation/{}/organizations/{}/projects/{}",
            self.base_url, OPERATION_API_VERSION, location.organization_id, location.project_id
        )
    }

    /// Location-scoped root of the network service
    fn network_url(&self, location: &Location) -> String {
        format!(
            "{}/network/{}/organizations/{}/projects/{}",
            self.base_url, NETWORK_API_VERSION, location.organization_id, location.project_id
        )
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(status = status.as_u16(), body = %error_text, "Request rejected");
            return Err(ClientError::from_response_body(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(status = status.as_u16(), body = %error_text, "Request rejected");
            return Err(ClientError::from_response_body(status.as_u16(), &error_text));
        }

        Ok(())
    }
}

/// Query pairs for a paged list request
fn page_query(page_token: Option<&str>) -> Vec<(&'static str, String)> {
    page_token
        .filter(|token| !token.is_empty())
        .map(|token| vec![("pagination.next_page_token", token.to_string())])
        .unwrap_or_default()
}
