//! Two-phase build publication

use hangar_client::RegistryApi;
use hangar_core::domain::build::{Build, BuildStatus};
use hangar_core::domain::iteration::Iteration;
use hangar_core::domain::location::Location;
use hangar_core::dto::build::{BuildCreateBody, BuildUpdates, CreateBuild, UpdateBuild};
use tracing::{info, warn};
use uuid::Uuid;

use super::{NodeKind, Reconciler, UpsertError};
use crate::desired::BuildSpec;
use crate::error::Result;
use crate::paginate::list_all;

/// Result of publishing a build
#[derive(Debug, Clone, PartialEq)]
pub enum BuildPublication {
    /// This run created the build and marked it done
    Published(Build),

    /// Another run already claimed this component
    ///
    /// Carries that run's build when it could be found.
    Superseded(Option<Build>),
}

impl BuildPublication {
    /// The build as last seen, whoever published it
    pub fn build(&self) -> Option<&Build> {
        match self {
            BuildPublication::Published(build) => Some(build),
            BuildPublication::Superseded(build) => build.as_ref(),
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, BuildPublication::Published(_))
    }
}

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Publishes a build into an iteration
    ///
    /// The build is created as `RUNNING` under a fresh run id, then updated to
    /// `DONE` with its images and labels. If another run already claimed the
    /// component the service aborts the create; that is reported as
    /// [`BuildPublication::Superseded`] and no update is sent.
    pub async fn publish_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration: &Iteration,
        spec: &BuildSpec,
    ) -> Result<BuildPublication> {
        let create = CreateBuild {
            fingerprint: iteration.fingerprint.clone(),
            build: BuildCreateBody {
                cloud_provider: spec.cloud_provider.clone(),
                component_type: spec.component_type.clone(),
                packer_run_uuid: Uuid::new_v4().to_string(),
                status: BuildStatus::Running,
                labels: spec.labels.clone(),
            },
        };

        info!(
            "Creating build {} ({}) in iteration {}",
            spec.component_type, spec.cloud_provider, iteration.id
        );
        let build = match self
            .api
            .create_build(location, bucket_slug, &iteration.id, &create)
            .await
        {
            Ok(build) => build,
            Err(err) => {
                return match UpsertError::classify(err, NodeKind::Build) {
                    UpsertError::Aborted(err) => {
                        warn!(
                            "Build {} in iteration {} already claimed: {}",
                            spec.component_type,
                            iteration.id,
                            err.message()
                        );
                        let concurrent = match self
                            .find_build(location, bucket_slug, &iteration.id, spec)
                            .await
                        {
                            Ok(build) => build,
                            Err(err) => {
                                warn!(
                                    "Could not read the concurrent build of {}: {}",
                                    spec.component_type, err
                                );
                                None
                            }
                        };
                        Ok(BuildPublication::Superseded(concurrent))
                    }
                    other => Err(other.into_inner().into()),
                };
            }
        };

        if !build.status.can_transition_to(BuildStatus::Done) {
            warn!(
                "Build {} is already {}, leaving it as is",
                build.id, build.status
            );
            return Ok(BuildPublication::Superseded(Some(build)));
        }

        let update = UpdateBuild {
            updates: BuildUpdates {
                status: Some(BuildStatus::Done),
                images: spec.images.iter().map(Into::into).collect(),
                labels: spec.labels.clone(),
            },
        };
        let done = self
            .api
            .update_build(location, bucket_slug, &iteration.id, &build.id, &update)
            .await?;

        info!(
            "Published build {} with {} image(s)",
            done.id,
            done.images.len()
        );
        Ok(BuildPublication::Published(done))
    }

    /// Finds the build another run created for the same component
    async fn find_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        spec: &BuildSpec,
    ) -> Result<Option<Build>> {
        let api = self.api.as_ref();
        let builds = list_all(self.config.max_pages, move |cursor| async move {
            api.list_builds(location, bucket_slug, iteration_id, cursor.as_deref())
                .await
        })
        .await?;

        Ok(builds.into_iter().find(|build| {
            build.component_type == spec.component_type
                && build.cloud_provider == spec.cloud_provider
        }))
    }
}
