//! Latest-build lookup for a single project.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::BuildRecord;
use crate::domain::ports::BuildService;

/// Resolves the most recent build of one project into a report row.
///
/// Every lookup yields exactly one [`BuildRecord`]. Failures of either remote
/// call are absorbed and reported as `Unknown`; a project without builds is
/// reported as `Empty`.
#[derive(Clone)]
pub struct BuildLookupWorker {
    service: Arc<dyn BuildService>,
}

impl BuildLookupWorker {
    pub fn new(service: Arc<dyn BuildService>) -> Self {
        Self { service }
    }

    pub async fn lookup(&self, project: &str) -> BuildRecord {
        debug!(project, "listing builds");
        let ids = match self.service.list_build_ids_for_project(project).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(project, error = %err, "build listing failed");
                return BuildRecord::unknown(project);
            }
        };

        // The service returns identifiers newest first.
        let Some(latest) = ids.first() else {
            debug!(project, "project has no builds");
            return BuildRecord::empty(project);
        };

        debug!(project, build_id = %latest, "fetching latest build");
        let builds = match self.service.batch_get_builds(std::slice::from_ref(latest)).await {
            Ok(builds) => builds,
            Err(err) => {
                warn!(project, build_id = %latest, error = %err, "build details failed");
                return BuildRecord::unknown(project);
            }
        };

        match builds.first() {
            Some(build) => BuildRecord::from_build(project, build),
            None => {
                warn!(project, build_id = %latest, "build details missing from response");
                BuildRecord::unknown(project)
            }
        }
    }
}
