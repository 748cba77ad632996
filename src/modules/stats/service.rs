use bharat_cache::{RecordStore, keys};
use bharat_core::AppError;
use bharat_models::{AggregateRecord, districts::is_supported_state};
use tracing::{debug, instrument};

use crate::metrics::track_cache_lookup;

use super::model::{DistrictRange, FY_REQUIRED, STATE_NAME_REQUIRED, StateQuery, UNSUPPORTED_STATE};

pub struct StatsService;

impl StatsService {
    /// Year aggregates for every district of the supported state.
    #[instrument(skip(store, default_fy))]
    pub async fn state_year_records(
        store: &dyn RecordStore,
        query: &StateQuery,
        default_fy: Option<&str>,
    ) -> Result<Vec<AggregateRecord>, AppError> {
        let state_name = query
            .state_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!(STATE_NAME_REQUIRED)))?;

        let fin_year = query
            .fy
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(default_fy)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!(FY_REQUIRED)))?;

        if !is_supported_state(state_name) {
            return Err(AppError::bad_request(anyhow::anyhow!(UNSUPPORTED_STATE)));
        }

        let keys = keys::state_year(fin_year);
        Self::lookup(store, "state_all", &keys).await
    }

    /// Records for one district across a fiscal-year range, in key order.
    #[instrument(skip(store))]
    pub async fn district_records(
        store: &dyn RecordStore,
        district_code: &str,
        range: DistrictRange,
    ) -> Result<Vec<AggregateRecord>, AppError> {
        let keys = keys::district_range(
            district_code,
            range.period,
            range.start_year,
            range.end_year,
        );
        Self::lookup(store, "district", &keys).await
    }

    async fn lookup(
        store: &dyn RecordStore,
        endpoint: &'static str,
        keys: &[String],
    ) -> Result<Vec<AggregateRecord>, AppError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<AggregateRecord> = store
            .get_records(keys)
            .await
            .map_err(AppError::cache)?
            .into_iter()
            .flatten()
            .collect();

        track_cache_lookup(endpoint, keys.len(), found.len());
        debug!(requested = keys.len(), found = found.len(), "Cache lookup");

        Ok(found)
    }
}
