//! Pipeline schedule configuration.
//!
//! # Environment Variables
//!
//! - `CRON_SCHEDULE`: `minute hour day month weekday` (default: `0 2 * * *`, daily 02:00 UTC)
//! - `FY_LIST`: Comma-separated fiscal years, newest first; overrides the rolling window
//! - `FY_DELAY_SECS`: Pause between fiscal-year fetches (default: `30`)
//! - `RUN_ON_STARTUP`: Run the pipeline once when the server starts (default: `true`)

use chrono::Datelike;
use std::time::Duration;

use bharat_models::rolling_fiscal_years;

use crate::{env_non_empty, env_parse_or};

/// Fiscal years covered when `FY_LIST` is unset.
pub const ROLLING_WINDOW: usize = 6;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid cron expression '{0}': expected 5 or 6 fields")]
    InvalidCron(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub cron_schedule: String,
    /// Fiscal-year labels, newest first.
    pub fiscal_years: Vec<String>,
    pub fy_delay: Duration,
    pub run_on_startup: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron_schedule: "0 2 * * *".into(),
            fiscal_years: rolling_fiscal_years(chrono::Utc::now().year(), ROLLING_WINDOW),
            fy_delay: Duration::from_secs(30),
            run_on_startup: true,
        }
    }
}

impl ScheduleConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cron_schedule: env_non_empty("CRON_SCHEDULE").unwrap_or(defaults.cron_schedule),
            fiscal_years: env_non_empty("FY_LIST")
                .map(|raw| parse_fy_list(&raw))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.fiscal_years),
            fy_delay: Duration::from_secs(env_parse_or("FY_DELAY_SECS", defaults.fy_delay.as_secs())),
            run_on_startup: env_parse_or("RUN_ON_STARTUP", defaults.run_on_startup),
        }
    }

    /// The fiscal year used when a query omits one.
    pub fn default_fiscal_year(&self) -> Option<&str> {
        self.fiscal_years.first().map(String::as_str)
    }

    /// The schedule as a six-field (seconds-first) cron expression.
    ///
    /// Five-field expressions fire at second zero.
    pub fn cron_expression(&self) -> Result<String, ConfigError> {
        normalize_cron(&self.cron_schedule)
    }
}

/// Splits a comma-separated fiscal-year list, trimming entries and dropping blanks.
pub fn parse_fy_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn normalize_cron(expr: &str) -> Result<String, ConfigError> {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    match fields.len() {
        5 => Ok(format!("0 {}", fields.join(" "))),
        6 => Ok(fields.join(" ")),
        _ => Err(ConfigError::InvalidCron(expr.to_string())),
    }
}
