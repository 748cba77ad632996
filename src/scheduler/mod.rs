pub mod cron;
pub mod pipeline;

pub use cron::CronScheduler;
pub use pipeline::{Pipeline, PipelineError, RunGuard, RunReport};
