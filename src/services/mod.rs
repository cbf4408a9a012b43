//! Service layer: the report logic built on top of the build service port.

pub mod build_lookup;
pub mod overview;
pub mod project_filter;

pub use build_lookup::BuildLookupWorker;
pub use overview::{NoProgress, OverviewAggregator, OverviewProgress};
pub use project_filter::{ProjectFilter, MATCH_ALL};
