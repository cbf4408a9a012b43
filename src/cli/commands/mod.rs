//! CLI command handlers

pub mod builds;
pub mod overview;
pub mod projects;

use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::BuildService;

/// Everything a command needs once configuration is resolved.
#[derive(Clone)]
pub struct CommandContext {
    pub service: Arc<dyn BuildService>,
    pub config: Config,
    pub json: bool,
}
