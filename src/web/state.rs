//! # Web API Application State

use std::time::Duration;

use crate::config::WebConfig;
use crate::orchestration::BatchScheduler;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub scheduler: BatchScheduler,
    pub config: WebConfig,
}

impl AppState {
    pub fn new(scheduler: BatchScheduler, config: WebConfig) -> Self {
        Self { scheduler, config }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }
}
