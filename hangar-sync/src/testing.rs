//! In-memory registry used by the reconciler tests
//!
//! Mimics the remote service closely enough to exercise the conflict,
//! pagination and operation paths: creates are unique per key, builds are
//! claimed once per component, deletes of missing nodes answer `NOT_FOUND`,
//! and every call is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hangar_client::{ClientError, RegistryApi, Result, RpcCode};
use hangar_core::domain::bucket::Bucket;
use hangar_core::domain::build::{Build, BuildStatus, Image};
use hangar_core::domain::channel::Channel;
use hangar_core::domain::iteration::{Iteration, IterationRef};
use hangar_core::domain::location::Location;
use hangar_core::domain::network::Network;
use hangar_core::domain::operation::{Operation, OperationState};
use hangar_core::domain::registry::{Registry, RegistryTier};
use hangar_core::domain::run_task::RunTaskCredential;
use hangar_core::dto::bucket::{CreateBucket, CreateBucketResponse};
use hangar_core::dto::build::{CreateBuild, UpdateBuild};
use hangar_core::dto::channel::{CreateChannel, UpdateChannel};
use hangar_core::dto::iteration::{CreateIteration, UpdateIteration};
use hangar_core::dto::pagination::Page;
use hangar_core::dto::registry::{CreateRegistry, RegistryMutation, UpdateRegistry};

pub const RUN_TASK_URL: &str = "https://registry.test/run-task";

#[derive(Default)]
struct State {
    registry: Option<Registry>,
    buckets: Vec<Bucket>,
    iterations: Vec<Iteration>,
    channels: Vec<Channel>,
    operations: HashMap<String, VecDeque<Operation>>,
    failures: HashMap<String, VecDeque<ClientError>>,
    calls: Vec<String>,
    channel_updates: Vec<UpdateChannel>,
    build_updates: Vec<UpdateBuild>,
    bucket_operation: Option<String>,
    run_task_generation: u32,
    next_id: u32,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn bucket_exists(&self, slug: &str) -> Result<()> {
        if self.buckets.iter().any(|b| b.slug == slug) {
            Ok(())
        } else {
            Err(not_found(format!("bucket {} not found", slug)))
        }
    }

    fn iteration_mut(&mut self, bucket_slug: &str, id: &str) -> Result<&mut Iteration> {
        self.iterations
            .iter_mut()
            .find(|it| it.bucket_slug == bucket_slug && it.id == id)
            .ok_or_else(|| not_found(format!("iteration {} not found", id)))
    }

    fn find_iteration(&self, bucket_slug: &str, target: &IterationRef) -> Result<Iteration> {
        self.iterations
            .iter()
            .find(|it| it.bucket_slug == bucket_slug && target.matches(it))
            .cloned()
            .ok_or_else(|| not_found(format!("iteration {} not found", target)))
    }

    fn channel_mut(&mut self, bucket_slug: &str, slug: &str) -> Result<&mut Channel> {
        self.channels
            .iter_mut()
            .find(|c| c.bucket_slug == bucket_slug && c.slug == slug)
            .ok_or_else(|| not_found(format!("channel {} not found", slug)))
    }
}

/// In-memory [`RegistryApi`]
pub struct FakeRegistry {
    state: Mutex<State>,
    page_size: usize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    /// A registry whose listings return at most `page_size` items per page
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(State {
                run_task_generation: 1,
                ..State::default()
            }),
            page_size,
        }
    }

    pub fn location(&self) -> Location {
        Location::new("org-1", "proj-1")
    }

    /// Scripts the states successive waits on `operation_id` return
    ///
    /// The last state repeats forever. Unscripted operations are done.
    pub fn script_operation(&self, operation_id: &str, states: Vec<Operation>) {
        self.lock()
            .operations
            .insert(operation_id.to_string(), states.into());
    }

    /// Makes the next call named `call` fail with `err`
    pub fn fail_next(&self, call: &str, err: ClientError) {
        self.lock()
            .failures
            .entry(call.to_string())
            .or_default()
            .push_back(err);
    }

    /// Makes bucket creation return an operation with this id
    pub fn set_bucket_operation(&self, operation_id: &str) {
        self.lock().bucket_operation = Some(operation_id.to_string());
    }

    pub fn seed_registry(&self, tier: RegistryTier) {
        self.lock().registry = Some(Registry {
            id: "reg-1".to_string(),
            feature_tier: tier,
            activated: true,
        });
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn buckets(&self) -> Vec<Bucket> {
        self.lock().buckets.clone()
    }

    pub fn iterations(&self) -> Vec<Iteration> {
        self.lock().iterations.clone()
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.lock().channels.clone()
    }

    pub fn channel_updates(&self) -> Vec<UpdateChannel> {
        self.lock().channel_updates.clone()
    }

    pub fn build_updates(&self) -> Vec<UpdateBuild> {
        self.lock().build_updates.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Records the call and applies any injected failure
    fn enter(&self, call: &str) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(call.to_string());
        if let Some(err) = state.failures.get_mut(call).and_then(VecDeque::pop_front) {
            return Err(err);
        }
        Ok(state)
    }
}

fn not_found(message: String) -> ClientError {
    ClientError::rpc_error(404, RpcCode::NotFound, message)
}

fn already_exists(message: String) -> ClientError {
    ClientError::rpc_error(409, RpcCode::AlreadyExists, message)
}

fn page_of<T: Clone>(items: Vec<T>, page_token: Option<&str>, page_size: usize) -> Page<T> {
    let start = page_token
        .and_then(|token| token.parse::<usize>().ok())
        .unwrap_or(0)
        .min(items.len());
    let end = (start + page_size).min(items.len());
    let next = if end < items.len() {
        end.to_string()
    } else {
        String::new()
    };
    Page::new(items[start..end].to_vec(), Some(next))
}

fn pending(id: &str) -> Operation {
    Operation {
        id: id.to_string(),
        state: OperationState::Pending,
        error: None,
    }
}

#[async_trait]
impl RegistryApi for FakeRegistry {
    async fn create_registry(
        &self,
        _location: &Location,
        req: &CreateRegistry,
    ) -> Result<RegistryMutation> {
        let mut state = self.enter("create_registry")?;
        if state.registry.is_some() {
            return Err(already_exists("registry already exists".to_string()));
        }
        let registry = Registry {
            id: "reg-1".to_string(),
            feature_tier: req.feature_tier.clone(),
            activated: true,
        };
        state.registry = Some(registry.clone());
        Ok(RegistryMutation {
            registry: Some(registry),
            operation: Some(pending("op-create-registry")),
        })
    }

    async fn get_registry(&self, _location: &Location) -> Result<Registry> {
        let state = self.enter("get_registry")?;
        state
            .registry
            .clone()
            .ok_or_else(|| not_found("registry not found".to_string()))
    }

    async fn update_registry(
        &self,
        _location: &Location,
        req: &UpdateRegistry,
    ) -> Result<RegistryMutation> {
        let mut state = self.enter("update_registry")?;
        let registry = state
            .registry
            .as_mut()
            .ok_or_else(|| not_found("registry not found".to_string()))?;
        registry.feature_tier = req.feature_tier.clone();
        Ok(RegistryMutation {
            registry: Some(registry.clone()),
            operation: Some(pending("op-update-registry")),
        })
    }

    async fn create_bucket(
        &self,
        _location: &Location,
        req: &CreateBucket,
    ) -> Result<CreateBucketResponse> {
        let mut state = self.enter("create_bucket")?;
        if state.bucket_exists(&req.slug).is_ok() {
            return Err(already_exists(format!("bucket {} already exists", req.slug)));
        }
        let bucket = Bucket {
            id: state.id("bkt"),
            slug: req.slug.clone(),
            name: req.slug.clone(),
            description: req.description.clone(),
            labels: req.labels.clone(),
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        state.buckets.push(bucket.clone());
        state.buckets.sort_by(|a, b| a.name.cmp(&b.name));

        // The service maintains a "latest" channel in every bucket.
        let latest = Channel {
            id: state.id("ch"),
            slug: "latest".to_string(),
            bucket_slug: req.slug.clone(),
            iteration: None,
            managed: true,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        state.channels.push(latest);

        let operation = state.bucket_operation.as_deref().map(pending);
        Ok(CreateBucketResponse { bucket, operation })
    }

    async fn get_bucket(&self, _location: &Location, bucket_slug: &str) -> Result<Bucket> {
        let state = self.enter("get_bucket")?;
        state
            .buckets
            .iter()
            .find(|b| b.slug == bucket_slug)
            .cloned()
            .ok_or_else(|| not_found(format!("bucket {} not found", bucket_slug)))
    }

    async fn list_buckets(
        &self,
        _location: &Location,
        page_token: Option<&str>,
    ) -> Result<Page<Bucket>> {
        let state = self.enter("list_buckets")?;
        Ok(page_of(state.buckets.clone(), page_token, self.page_size))
    }

    async fn delete_bucket(&self, _location: &Location, bucket_slug: &str) -> Result<()> {
        let mut state = self.enter("delete_bucket")?;
        state.bucket_exists(bucket_slug)?;
        let occupied = state.iterations.iter().any(|it| it.bucket_slug == bucket_slug)
            || state
                .channels
                .iter()
                .any(|c| c.bucket_slug == bucket_slug && !c.managed);
        if occupied {
            return Err(ClientError::rpc_error(
                400,
                RpcCode::FailedPrecondition,
                format!("bucket {} is not empty", bucket_slug),
            ));
        }
        state.buckets.retain(|b| b.slug != bucket_slug);
        state.channels.retain(|c| c.bucket_slug != bucket_slug);
        Ok(())
    }

    async fn create_iteration(
        &self,
        _location: &Location,
        bucket_slug: &str,
        req: &CreateIteration,
    ) -> Result<Iteration> {
        let mut state = self.enter("create_iteration")?;
        state.bucket_exists(bucket_slug)?;
        let fingerprint = IterationRef::Fingerprint(req.fingerprint.clone());
        if state.find_iteration(bucket_slug, &fingerprint).is_ok() {
            return Err(already_exists(format!(
                "iteration with fingerprint {} already exists",
                req.fingerprint
            )));
        }
        let iteration = Iteration {
            id: state.id("it"),
            bucket_slug: bucket_slug.to_string(),
            fingerprint: req.fingerprint.clone(),
            incremental_version: 0,
            complete: false,
            revoke_at: None,
            builds: Vec::new(),
            created_at: Some(Utc::now()),
        };
        state.iterations.push(iteration.clone());
        Ok(iteration)
    }

    async fn get_iteration(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration: &IterationRef,
    ) -> Result<Iteration> {
        let state = self.enter("get_iteration")?;
        state.find_iteration(bucket_slug, iteration)
    }

    async fn list_iterations(
        &self,
        _location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Iteration>> {
        let state = self.enter("list_iterations")?;
        state.bucket_exists(bucket_slug)?;
        let iterations = state
            .iterations
            .iter()
            .filter(|it| it.bucket_slug == bucket_slug)
            .cloned()
            .collect();
        Ok(page_of(iterations, page_token, self.page_size))
    }

    async fn update_iteration(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &UpdateIteration,
    ) -> Result<Iteration> {
        let mut state = self.enter("update_iteration")?;
        let iteration = state.iteration_mut(bucket_slug, iteration_id)?;
        if let Some(revoke_at) = req.revoke_at {
            iteration.revoke_at = Some(revoke_at);
        }
        Ok(iteration.clone())
    }

    async fn delete_iteration(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
    ) -> Result<()> {
        let mut state = self.enter("delete_iteration")?;
        state.iteration_mut(bucket_slug, iteration_id)?;
        state
            .iterations
            .retain(|it| !(it.bucket_slug == bucket_slug && it.id == iteration_id));
        Ok(())
    }

    async fn create_build(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &CreateBuild,
    ) -> Result<Build> {
        let mut state = self.enter("create_build")?;
        let build_id = state.id("bld");
        let iteration = state.iteration_mut(bucket_slug, iteration_id)?;
        let claimed = iteration.builds.iter().any(|b| {
            b.component_type == req.build.component_type
                && b.cloud_provider == req.build.cloud_provider
        });
        if claimed {
            return Err(ClientError::rpc_error(
                409,
                RpcCode::Aborted,
                format!("build for {} already claimed", req.build.component_type),
            ));
        }
        let build = Build {
            id: build_id,
            iteration_id: iteration_id.to_string(),
            component_type: req.build.component_type.clone(),
            cloud_provider: req.build.cloud_provider.clone(),
            packer_run_uuid: req.build.packer_run_uuid.clone(),
            status: req.build.status,
            images: Vec::new(),
            labels: req.build.labels.clone(),
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        iteration.builds.push(build.clone());
        Ok(build)
    }

    async fn update_build(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        build_id: &str,
        req: &UpdateBuild,
    ) -> Result<Build> {
        let mut state = self.enter("update_build")?;
        state.build_updates.push(req.clone());

        let next_version = state
            .iterations
            .iter()
            .filter(|it| it.bucket_slug == bucket_slug)
            .map(|it| it.incremental_version)
            .max()
            .unwrap_or(0)
            + 1;

        let iteration = state.iteration_mut(bucket_slug, iteration_id)?;
        let build = iteration
            .builds
            .iter_mut()
            .find(|b| b.id == build_id)
            .ok_or_else(|| not_found(format!("build {} not found", build_id)))?;

        if let Some(status) = req.updates.status {
            build.status = status;
        }
        build.images.extend(req.updates.images.iter().map(|image| Image {
            id: format!("img-{}", image.image_id),
            image_id: image.image_id.clone(),
            region: image.region.clone(),
            created_at: Some(Utc::now()),
        }));
        build.labels.extend(req.updates.labels.clone());
        build.updated_at = Some(Utc::now());
        let build = build.clone();

        if build.status == BuildStatus::Done && iteration.incremental_version == 0 {
            iteration.incremental_version = next_version;
            iteration.complete = true;
        }
        Ok(build)
    }

    async fn list_builds(
        &self,
        _location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Build>> {
        let mut state = self.enter("list_builds")?;
        let builds = state.iteration_mut(bucket_slug, iteration_id)?.builds.clone();
        Ok(page_of(builds, page_token, self.page_size))
    }

    async fn create_channel(
        &self,
        _location: &Location,
        bucket_slug: &str,
        req: &CreateChannel,
    ) -> Result<Channel> {
        let mut state = self.enter("create_channel")?;
        state.bucket_exists(bucket_slug)?;
        if state.channel_mut(bucket_slug, &req.slug).is_ok() {
            return Err(already_exists(format!("channel {} already exists", req.slug)));
        }
        let iteration = match &req.iteration_id {
            Some(id) => Some(state.find_iteration(bucket_slug, &IterationRef::Id(id.clone()))?),
            None => None,
        };
        let channel = Channel {
            id: state.id("ch"),
            slug: req.slug.clone(),
            bucket_slug: bucket_slug.to_string(),
            iteration,
            managed: false,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        state.channels.push(channel.clone());
        Ok(channel)
    }

    async fn get_channel(
        &self,
        _location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<Channel> {
        let mut state = self.enter("get_channel")?;
        state.channel_mut(bucket_slug, channel_slug).map(|c| c.clone())
    }

    async fn update_channel(
        &self,
        _location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        req: &UpdateChannel,
    ) -> Result<Channel> {
        let mut state = self.enter("update_channel")?;
        state.channel_updates.push(req.clone());

        let target = match (&req.iteration_id, &req.fingerprint, req.incremental_version) {
            (Some(id), _, _) => Some(IterationRef::Id(id.clone())),
            (None, Some(fingerprint), _) => Some(IterationRef::Fingerprint(fingerprint.clone())),
            (None, None, Some(version)) => Some(IterationRef::IncrementalVersion(version)),
            (None, None, None) => None,
        };
        let iteration = match target {
            Some(target) => Some(state.find_iteration(bucket_slug, &target)?),
            None => None,
        };

        let channel = state.channel_mut(bucket_slug, channel_slug)?;
        if channel.managed {
            return Err(ClientError::rpc_error(
                400,
                RpcCode::FailedPrecondition,
                format!("channel {} is managed by the service", channel_slug),
            ));
        }
        channel.iteration = iteration;
        channel.updated_at = Some(Utc::now());
        Ok(channel.clone())
    }

    async fn delete_channel(
        &self,
        _location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<()> {
        let mut state = self.enter("delete_channel")?;
        let channel = state.channel_mut(bucket_slug, channel_slug)?;
        if channel.managed {
            return Err(ClientError::rpc_error(
                400,
                RpcCode::FailedPrecondition,
                format!("channel {} is managed by the service", channel_slug),
            ));
        }
        state
            .channels
            .retain(|c| !(c.bucket_slug == bucket_slug && c.slug == channel_slug));
        Ok(())
    }

    async fn list_channels(
        &self,
        _location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Channel>> {
        let state = self.enter("list_channels")?;
        state.bucket_exists(bucket_slug)?;
        let channels = state
            .channels
            .iter()
            .filter(|c| c.bucket_slug == bucket_slug)
            .cloned()
            .collect();
        Ok(page_of(channels, page_token, self.page_size))
    }

    async fn wait_operation(
        &self,
        _location: &Location,
        operation_id: &str,
        _timeout: Duration,
    ) -> Result<Operation> {
        let mut state = self.enter("wait_operation")?;
        let scripted = state.operations.get_mut(operation_id).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });
        Ok(scripted.unwrap_or_else(|| Operation {
            id: operation_id.to_string(),
            state: OperationState::Done,
            error: None,
        }))
    }

    async fn get_run_task(&self, _location: &Location) -> Result<RunTaskCredential> {
        let state = self.enter("get_run_task")?;
        Ok(RunTaskCredential {
            endpoint_url: RUN_TASK_URL.to_string(),
            hmac_key: format!("hmac-{}", state.run_task_generation),
        })
    }

    async fn regenerate_run_task_hmac(&self, _location: &Location) -> Result<RunTaskCredential> {
        let mut state = self.enter("regenerate_run_task_hmac")?;
        state.run_task_generation += 1;
        Ok(RunTaskCredential {
            endpoint_url: RUN_TASK_URL.to_string(),
            hmac_key: format!("hmac-{}", state.run_task_generation),
        })
    }

    async fn get_network(&self, location: &Location, network_id: &str) -> Result<Network> {
        let _state = self.enter("get_network")?;
        if network_id != "hvn-1" || location.region.is_none() {
            return Err(not_found(format!("network {} not found", network_id)));
        }
        Ok(Network {
            id: network_id.to_string(),
            cidr_block: "172.25.16.0/20".to_string(),
            provider_type: "aws".to_string(),
            location: Some(location.clone()),
            state: "STABLE".to_string(),
        })
    }
}
