//! Registry upsert

use hangar_client::RegistryApi;
use hangar_core::domain::location::Location;
use hangar_core::domain::registry::{Registry, RegistryTier};
use hangar_core::dto::registry::{CreateRegistry, UpdateRegistry};
use tracing::{info, warn};

use super::{NodeKind, Reconciler, UpsertError};
use crate::error::Result;

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Ensures the project's registry exists with the given feature tier
    ///
    /// Creation and tier changes complete asynchronously and are awaited
    /// before returning. An existing registry on the desired tier is left
    /// untouched.
    pub async fn upsert_registry(&self, location: &Location, tier: RegistryTier) -> Result<Registry> {
        info!("Upserting registry ({}, tier {})", location, tier);

        let create = CreateRegistry {
            feature_tier: tier.clone(),
        };
        match self.api.create_registry(location, &create).await {
            Ok(mutation) => {
                if mutation.operation.is_some() {
                    self.await_operation(location, mutation.operation.as_ref(), "Create Registry")
                        .await?;
                    return Ok(self.api.get_registry(location).await?);
                }
                match mutation.registry {
                    Some(registry) => Ok(registry),
                    None => Ok(self.api.get_registry(location).await?),
                }
            }
            Err(err) => match UpsertError::classify(err, NodeKind::Registry) {
                UpsertError::AlreadyExists(err) => {
                    warn!("Registry already exists, reading it: {}", err.message());
                    let existing = self.api.get_registry(location).await?;
                    if existing.feature_tier == tier {
                        return Ok(existing);
                    }

                    info!(
                        "Changing registry tier from {} to {}",
                        existing.feature_tier, tier
                    );
                    let update = UpdateRegistry { feature_tier: tier };
                    let mutation = self.api.update_registry(location, &update).await?;
                    self.await_operation(location, mutation.operation.as_ref(), "Update Registry")
                        .await?;
                    Ok(self.api.get_registry(location).await?)
                }
                other => Err(other.into_inner().into()),
            },
        }
    }
}
