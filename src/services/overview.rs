//! Overview report: latest build status of every project.
//!
//! The aggregator fans out one [`BuildLookupWorker`] per selected project,
//! bounded by a semaphore, and fans results back in through a channel. Arrival
//! order is meaningless; the record set is sorted by project name once every
//! lookup has finished.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildRecord, BuildStatus, OverviewConfig};
use crate::domain::ports::BuildService;
use crate::services::build_lookup::BuildLookupWorker;
use crate::services::project_filter::ProjectFilter;

/// Observer for overview progress.
///
/// Called from the collecting task only, never from the workers.
pub trait OverviewProgress: Send + Sync {
    /// The project list is known and `total` lookups are about to start.
    fn started(&self, _total: usize) {}

    /// One lookup produced its record.
    fn record_completed(&self, _record: &BuildRecord) {}

    /// Every lookup has finished.
    fn finished(&self) {}
}

/// Progress observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl OverviewProgress for NoProgress {}

/// Concurrent latest-build lookup across all projects.
pub struct OverviewAggregator {
    service: Arc<dyn BuildService>,
    worker: BuildLookupWorker,
    max_concurrency: usize,
    lookup_timeout: Option<Duration>,
    progress: Arc<dyn OverviewProgress>,
}

impl OverviewAggregator {
    pub fn new(service: Arc<dyn BuildService>) -> Self {
        Self::from_config(service, &OverviewConfig::default())
    }

    pub fn from_config(service: Arc<dyn BuildService>, config: &OverviewConfig) -> Self {
        Self {
            worker: BuildLookupWorker::new(service.clone()),
            service,
            max_concurrency: config.max_concurrency.max(1),
            lookup_timeout: config.lookup_timeout(),
            progress: Arc::new(NoProgress),
        }
    }

    /// Limit the number of lookups in flight at once (at least one).
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Bound each project lookup; a lookup that runs out of time is `Unknown`.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn OverviewProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Build the overview for every project accepted by `filter`.
    ///
    /// Returns one record per selected project, sorted by project name. The
    /// only error is a failure to list the projects themselves.
    pub async fn run(&self, filter: &ProjectFilter) -> DomainResult<Vec<BuildRecord>> {
        let projects = self
            .service
            .list_projects()
            .await
            .map_err(DomainError::ProjectListFailed)?;
        let listed = projects.len();

        let mut selected: Vec<String> = projects
            .into_iter()
            .filter(|project| filter.matches(project))
            .collect();
        selected.sort();
        selected.dedup();

        info!(
            listed,
            selected = selected.len(),
            filter = filter.as_str(),
            max_concurrency = self.max_concurrency,
            "starting overview"
        );

        self.progress.started(selected.len());
        let records = self.collect(selected).await;
        self.progress.finished();

        Ok(records)
    }

    /// Fan out one lookup per project and gather exactly one record each.
    async fn collect(&self, projects: Vec<String>) -> Vec<BuildRecord> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for project in &projects {
            let project = project.clone();
            let worker = self.worker.clone();
            let semaphore = semaphore.clone();
            let timeout = self.lookup_timeout;
            let tx = tx.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let record = lookup_with_timeout(&worker, &project, timeout).await;
                // The receiver outlives every task.
                let _ = tx.send(record);
            });
        }
        drop(tx);

        // Closes once every task has dropped its sender.
        let mut records = Vec::with_capacity(projects.len());
        while let Some(record) = rx.recv().await {
            debug!(project = %record.project, status = %record.status, "record received");
            self.progress.record_completed(&record);
            records.push(record);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "overview lookup task did not complete");
            }
        }

        // A task that panicked never sent its record.
        if records.len() < projects.len() {
            let reported: HashSet<&str> = records.iter().map(|r| r.project.as_str()).collect();
            let missing: Vec<BuildRecord> = projects
                .iter()
                .filter(|project| !reported.contains(project.as_str()))
                .map(BuildRecord::unknown)
                .collect();
            for record in &missing {
                self.progress.record_completed(record);
            }
            records.extend(missing);
        }

        records.sort_by(|a, b| a.project.cmp(&b.project));

        let unknown = records
            .iter()
            .filter(|r| r.status == BuildStatus::Unknown)
            .count();
        info!(records = records.len(), unknown, "overview complete");

        records
    }
}

async fn lookup_with_timeout(
    worker: &BuildLookupWorker,
    project: &str,
    timeout: Option<Duration>,
) -> BuildRecord {
    let Some(limit) = timeout else {
        return worker.lookup(project).await;
    };

    match tokio::time::timeout(limit, worker.lookup(project)).await {
        Ok(record) => record,
        Err(_) => {
            warn!(project, timeout_secs = limit.as_secs_f64(), "build lookup timed out");
            BuildRecord::unknown(project)
        }
    }
}
