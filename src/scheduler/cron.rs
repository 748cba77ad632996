use std::sync::Arc;

use anyhow::Context;
use bharat_config::ScheduleConfig;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::pipeline::{Pipeline, PipelineError};

/// Fires pipeline runs on the configured cron schedule (UTC).
pub struct CronScheduler {
    scheduler: JobScheduler,
}

impl CronScheduler {
    pub async fn start(
        pipeline: Arc<Pipeline>,
        schedule: &ScheduleConfig,
        cancel: CancellationToken,
    ) -> anyhow::Result<Self> {
        let expression = schedule.cron_expression()?;
        let scheduler = JobScheduler::new().await.context("creating scheduler")?;

        let job = Job::new_async(expression.as_str(), move |_uuid, _lock| {
            let pipeline = Arc::clone(&pipeline);
            let cancel = cancel.clone();
            Box::pin(async move {
                run_scheduled(&pipeline, &cancel).await;
            })
        })
        .with_context(|| format!("creating scheduler job for cron {expression}"))?;

        scheduler.add(job).await.context("adding scheduler job")?;
        scheduler.start().await.context("starting scheduler")?;
        info!(cron = %expression, "Cron scheduler started");

        Ok(Self { scheduler })
    }

    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.scheduler
            .shutdown()
            .await
            .context("stopping scheduler")?;
        info!("Cron scheduler stopped");
        Ok(())
    }
}

/// One timer-driven run; skipped when another run holds the slot.
pub async fn run_scheduled(pipeline: &Pipeline, cancel: &CancellationToken) {
    if cancel.is_cancelled() {
        return;
    }

    match pipeline.run(cancel).await {
        Ok(report) => info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Scheduled run complete"
        ),
        Err(PipelineError::AlreadyRunning) => {
            warn!("Scheduled run skipped: previous run still in progress")
        }
    }
}
