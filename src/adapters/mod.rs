//! Infrastructure adapters for external systems.

pub mod codebuild;
pub mod mock;

pub use codebuild::CodeBuildService;
pub use mock::MockBuildService;
