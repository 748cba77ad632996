use std::sync::Arc;

use bharat_cache::RecordStore;
use bharat_config::{CorsConfig, ScheduleConfig};
use tokio_util::sync::CancellationToken;

use crate::scheduler::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub pipeline: Arc<Pipeline>,
    pub schedule_config: ScheduleConfig,
    pub cors_config: CorsConfig,
    /// Cancelled on SIGINT/SIGTERM; also stops in-flight pipeline runs.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        pipeline: Arc<Pipeline>,
        schedule_config: ScheduleConfig,
        cors_config: CorsConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            pipeline,
            schedule_config,
            cors_config,
            shutdown,
        }
    }
}
