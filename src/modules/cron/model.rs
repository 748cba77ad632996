use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::scheduler::RunReport;

pub const CRON_STARTED: &str = "cron started";
pub const RUN_IN_PROGRESS: &str = "a pipeline run is already in progress";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TriggerQuery {
    /// Run inline and return the report instead of starting in the background
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CronStatus {
    pub running: bool,
    pub fiscal_years: Vec<String>,
    pub last_report: Option<RunReport>,
}
