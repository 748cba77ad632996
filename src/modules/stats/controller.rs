use axum::{
    Json,
    extract::{Path, State},
};
use bharat_core::{ApiQuery, ApiResponse, AppError};
use bharat_models::AggregateRecord;
use tracing::instrument;

use crate::state::AppState;

use super::model::{DistrictRangeQuery, NO_ROWS_FOUND, StateQuery};
use super::service::StatsService;

fn records_response(records: Vec<AggregateRecord>) -> Json<ApiResponse<Vec<AggregateRecord>>> {
    if records.is_empty() {
        Json(ApiResponse::with_message(NO_ROWS_FOUND, records))
    } else {
        Json(ApiResponse::ok(records))
    }
}

#[utoipa::path(
    get,
    path = "/state/all",
    params(StateQuery),
    responses(
        (status = 200, description = "Year aggregates for every district, in district order", body = ApiResponse<Vec<AggregateRecord>>),
        (status = 400, description = "Malformed query string, missing state_name or fy, or unsupported state"),
        (status = 500, description = "Cache read failed")
    ),
    tag = "Statistics"
)]
#[instrument(skip(state))]
pub async fn get_state_all(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StateQuery>,
) -> Result<Json<ApiResponse<Vec<AggregateRecord>>>, AppError> {
    let records = StatsService::state_year_records(
        state.store.as_ref(),
        &query,
        state.schedule_config.default_fiscal_year(),
    )
    .await?;

    Ok(records_response(records))
}

#[utoipa::path(
    get,
    path = "/district/{districtcode}",
    params(
        ("districtcode" = String, Path, description = "District code, e.g. 1810"),
        DistrictRangeQuery
    ),
    responses(
        (status = 200, description = "Records found in the range, in request order", body = ApiResponse<Vec<AggregateRecord>>),
        (status = 400, description = "Malformed query string, missing or invalid startyear/endyear, or unknown type"),
        (status = 500, description = "Cache read failed")
    ),
    tag = "Statistics"
)]
#[instrument(skip(state))]
pub async fn get_district(
    State(state): State<AppState>,
    Path(district_code): Path<String>,
    ApiQuery(query): ApiQuery<DistrictRangeQuery>,
) -> Result<Json<ApiResponse<Vec<AggregateRecord>>>, AppError> {
    let range = query.validate()?;
    let records = StatsService::district_records(state.store.as_ref(), &district_code, range).await?;

    Ok(records_response(records))
}
