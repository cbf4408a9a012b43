//! Domain layer for the Knope build overview
//!
//! This module contains the build models, configuration types and the port
//! through which the build service is reached.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
