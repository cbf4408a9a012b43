//! Mock build service for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::models::Build;
use crate::domain::ports::{BuildService, BuildServiceError};

/// Scripted behaviour for one project.
#[derive(Debug, Clone, Default)]
struct MockProject {
    /// Build identifiers, most recent first
    ids: Vec<String>,
    fail_list: bool,
    delay: Option<Duration>,
}

/// In-memory build service with injectable failures and delays.
///
/// Projects are listed in registration order unless
/// [`MockBuildService::with_project_order`] says otherwise.
#[derive(Debug, Default)]
pub struct MockBuildService {
    project_order: Vec<String>,
    projects: HashMap<String, MockProject>,
    builds: HashMap<String, Build>,
    failing_ids: HashSet<String>,
    list_projects_error: Option<String>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    list_builds_calls: AtomicUsize,
    batch_get_calls: AtomicUsize,
}

impl MockBuildService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project whose builds are given most recent first.
    ///
    /// Builds with an empty id are assigned `<project>:<index>`.
    pub fn with_project(mut self, name: impl Into<String>, builds: Vec<Build>) -> Self {
        let name = name.into();
        let mut ids = Vec::with_capacity(builds.len());
        for (index, mut build) in builds.into_iter().enumerate() {
            if build.id.is_empty() {
                build.id = format!("{name}:{index}");
            }
            ids.push(build.id.clone());
            self.builds.insert(build.id.clone(), build);
        }
        self.register(name).ids = ids;
        self
    }

    /// Register a project that has never been built.
    pub fn with_empty_project(mut self, name: impl Into<String>) -> Self {
        self.register(name.into());
        self
    }

    /// Make listing build identifiers fail for a project.
    pub fn with_list_builds_failure(mut self, name: impl Into<String>) -> Self {
        self.register(name.into()).fail_list = true;
        self
    }

    /// Make the batch-get fail for every build of a project.
    ///
    /// Applies to the builds registered so far.
    pub fn with_batch_get_failure(mut self, name: impl Into<String>) -> Self {
        let ids = self.register(name.into()).ids.clone();
        self.failing_ids.extend(ids);
        self
    }

    /// Delay the build identifier listing of a project.
    pub fn with_delay(mut self, name: impl Into<String>, delay: Duration) -> Self {
        self.register(name.into()).delay = Some(delay);
        self
    }

    /// Make the project listing itself fail.
    pub fn with_list_projects_failure(mut self, message: impl Into<String>) -> Self {
        self.list_projects_error = Some(message.into());
        self
    }

    /// Override the order in which `list_projects` returns names.
    pub fn with_project_order(mut self, order: Vec<String>) -> Self {
        self.project_order = order;
        self
    }

    /// Highest number of concurrent `list_build_ids_for_project` calls seen.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn list_builds_calls(&self) -> usize {
        self.list_builds_calls.load(Ordering::SeqCst)
    }

    pub fn batch_get_calls(&self) -> usize {
        self.batch_get_calls.load(Ordering::SeqCst)
    }

    fn register(&mut self, name: String) -> &mut MockProject {
        if !self.projects.contains_key(&name) {
            self.project_order.push(name.clone());
        }
        self.projects.entry(name).or_default()
    }
}

/// Decrements the in-flight counter when a call finishes or is cancelled.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BuildService for MockBuildService {
    async fn list_projects(&self) -> Result<Vec<String>, BuildServiceError> {
        if let Some(message) = &self.list_projects_error {
            return Err(BuildServiceError::ListProjects(message.clone()));
        }
        Ok(self.project_order.clone())
    }

    async fn list_build_ids_for_project(
        &self,
        project: &str,
    ) -> Result<Vec<String>, BuildServiceError> {
        self.list_builds_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let Some(scripted) = self.projects.get(project) else {
            return Err(BuildServiceError::ListBuilds {
                project: project.to_string(),
                message: "project not found".to_string(),
            });
        };

        match scripted.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        if scripted.fail_list {
            return Err(BuildServiceError::ListBuilds {
                project: project.to_string(),
                message: "unable to list builds for project".to_string(),
            });
        }
        Ok(scripted.ids.clone())
    }

    async fn batch_get_builds(&self, ids: &[String]) -> Result<Vec<Build>, BuildServiceError> {
        self.batch_get_calls.fetch_add(1, Ordering::SeqCst);
        if ids.iter().any(|id| self.failing_ids.contains(id)) {
            return Err(BuildServiceError::BatchGetBuilds(
                "unable to get batch builds".to_string(),
            ));
        }
        Ok(ids.iter().filter_map(|id| self.builds.get(id).cloned()).collect())
    }
}
