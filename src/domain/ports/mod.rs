//! Port trait definitions (Hexagonal Architecture)
//!
//! Adapters implement these traits so the reports stay independent of the
//! transport used to reach the build service.

pub mod build_service;

pub use build_service::{BuildService, BuildServiceError};
