//! Fetch, transform and store one run across the configured fiscal years.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bharat_cache::{CacheError, RecordStore};
use bharat_config::{ScheduleConfig, UpstreamConfig};
use bharat_ingest::{FetchError, StatsSource, rows_to_records};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, warn};
use utoipa::ToSchema;

use crate::business_span;
use crate::metrics::{track_fiscal_year_outcome, track_keys_written, track_pipeline_run};
use crate::utils::tracing::{record_error, record_success};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("a pipeline run is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, thiserror::Error)]
enum StageError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("store write failed: {0}")]
    Store(#[from] CacheError),
}

impl StageError {
    fn outcome(&self) -> &'static str {
        match self {
            StageError::Fetch(_) => "fetch_failed",
            StageError::Store(_) => "store_failed",
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RunReport {
    /// Fiscal years whose fetch was started.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub keys_written: usize,
    /// Set when shutdown interrupted the run before every fiscal year was attempted.
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    fn started(at: DateTime<Utc>) -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed: 0,
            keys_written: 0,
            cancelled: false,
            started_at: at,
            finished_at: at,
        }
    }
}

/// Marks a run as in flight until dropped.
#[derive(Debug)]
pub struct RunGuard {
    running: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

pub struct Pipeline {
    source: Arc<dyn StatsSource>,
    store: Arc<dyn RecordStore>,
    state_name: String,
    fiscal_years: Vec<String>,
    fy_delay: Duration,
    running: Arc<AtomicBool>,
    last_report: RwLock<Option<RunReport>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("state_name", &self.state_name)
            .field("fiscal_years", &self.fiscal_years)
            .field("fy_delay", &self.fy_delay)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn StatsSource>,
        store: Arc<dyn RecordStore>,
        state_name: impl Into<String>,
        fiscal_years: Vec<String>,
        fy_delay: Duration,
    ) -> Self {
        Self {
            source,
            store,
            state_name: state_name.into(),
            fiscal_years,
            fy_delay,
            running: Arc::new(AtomicBool::new(false)),
            last_report: RwLock::new(None),
        }
    }

    pub fn from_config(
        source: Arc<dyn StatsSource>,
        store: Arc<dyn RecordStore>,
        upstream: &UpstreamConfig,
        schedule: &ScheduleConfig,
    ) -> Self {
        Self::new(
            source,
            store,
            upstream.state_name.clone(),
            schedule.fiscal_years.clone(),
            schedule.fy_delay,
        )
    }

    pub fn fiscal_years(&self) -> &[String] {
        &self.fiscal_years
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub async fn last_report(&self) -> Option<RunReport> {
        self.last_report.read().await.clone()
    }

    /// Claims the single run slot.
    pub fn begin(&self) -> Result<RunGuard, PipelineError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PipelineError::AlreadyRunning)?;

        Ok(RunGuard {
            running: Arc::clone(&self.running),
        })
    }

    /// Claims the run slot and runs to completion or cancellation.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunReport, PipelineError> {
        let guard = self.begin()?;
        Ok(self.execute(guard, cancel).await)
    }

    /// Claims the run slot and runs in a background task.
    pub fn spawn(
        self: &Arc<Self>,
        cancel: CancellationToken,
    ) -> Result<JoinHandle<RunReport>, PipelineError> {
        let guard = self.begin()?;
        let pipeline = Arc::clone(self);

        Ok(tokio::spawn(async move {
            pipeline.execute(guard, &cancel).await
        }))
    }

    /// Runs every configured fiscal year, newest first.
    ///
    /// Failures are counted and skipped. `cancel` interrupts the pause between
    /// fiscal years and ends the run.
    pub async fn execute(&self, guard: RunGuard, cancel: &CancellationToken) -> RunReport {
        let span = business_span!(
            "pipeline.run",
            state = %self.state_name,
            fiscal_years = self.fiscal_years.len()
        );

        let report = async {
            let mut report = RunReport::started(Utc::now());
            track_pipeline_run();
            info!(fiscal_years = ?self.fiscal_years, "Pipeline run started");

            for (idx, fin_year) in self.fiscal_years.iter().enumerate() {
                let proceed = if idx == 0 {
                    !cancel.is_cancelled()
                } else {
                    self.pause(cancel).await
                };
                if !proceed {
                    report.cancelled = true;
                    break;
                }

                report.attempted += 1;
                match self.process_fiscal_year(fin_year).await {
                    Ok(written) => {
                        report.succeeded += 1;
                        report.keys_written += written;
                        track_fiscal_year_outcome("succeeded");
                    }
                    Err(err) => {
                        report.failed += 1;
                        track_fiscal_year_outcome(err.outcome());
                        error!(fin_year = %fin_year, error = %err, "Skipping fiscal year");
                    }
                }
            }

            report.finished_at = Utc::now();
            if report.cancelled {
                warn!(attempted = report.attempted, "Pipeline run cancelled");
                record_error("cancelled");
            } else {
                record_success();
            }
            info!(
                attempted = report.attempted,
                succeeded = report.succeeded,
                failed = report.failed,
                keys_written = report.keys_written,
                "Pipeline run finished"
            );
            report
        }
        .instrument(span)
        .await;

        *self.last_report.write().await = Some(report.clone());
        drop(guard);
        report
    }

    /// Waits out the inter-year delay. Returns `false` if cancelled first.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.fy_delay) => true,
        }
    }

    async fn process_fiscal_year(&self, fin_year: &str) -> Result<usize, StageError> {
        let rows = self.source.fetch_rows(&self.state_name, fin_year).await?;
        let batch = rows_to_records(&rows).into_batch();

        if batch.is_empty() {
            info!(fin_year = %fin_year, "No rows returned");
            return Ok(0);
        }

        self.store.put_records(&batch).await?;
        track_keys_written(batch.len());
        info!(fin_year = %fin_year, rows = rows.len(), keys = batch.len(), "Stored fiscal year");

        Ok(batch.len())
    }
}
