use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use bharat_core::{ApiQuery, ApiResponse, AppError};
use tracing::{info, instrument};

use crate::scheduler::{PipelineError, RunReport};
use crate::state::AppState;

use super::model::{CRON_STARTED, CronStatus, RUN_IN_PROGRESS, TriggerQuery};

fn run_rejected(err: PipelineError) -> AppError {
    match err {
        PipelineError::AlreadyRunning => AppError::conflict(anyhow::anyhow!(RUN_IN_PROGRESS)),
    }
}

#[utoipa::path(
    post,
    path = "/cron/trigger",
    params(TriggerQuery),
    responses(
        (status = 200, description = "Run started, or finished when wait=true", body = ApiResponse<RunReport>),
        (status = 400, description = "Malformed query string"),
        (status = 409, description = "A run is already in progress")
    ),
    tag = "Pipeline"
)]
#[instrument(skip(state))]
pub async fn trigger_run(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TriggerQuery>,
) -> Result<Response, AppError> {
    if query.wait {
        let report = state
            .pipeline
            .run(&state.shutdown)
            .await
            .map_err(run_rejected)?;
        return Ok(Json(ApiResponse::ok(report)).into_response());
    }

    state
        .pipeline
        .spawn(state.shutdown.clone())
        .map_err(run_rejected)?;
    info!("Pipeline run triggered over HTTP");

    Ok(Json(ApiResponse::<()>::empty(CRON_STARTED)).into_response())
}

#[utoipa::path(
    get,
    path = "/cron/status",
    responses(
        (status = 200, description = "Whether a run is in flight and the last run's outcome", body = ApiResponse<CronStatus>)
    ),
    tag = "Pipeline"
)]
#[instrument(skip(state))]
pub async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<CronStatus>> {
    let status = CronStatus {
        running: state.pipeline.is_running(),
        fiscal_years: state.pipeline.fiscal_years().to_vec(),
        last_report: state.pipeline.last_report().await,
    };

    Json(ApiResponse::ok(status))
}
