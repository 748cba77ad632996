use bharat_core::AppError;
use bharat_models::PeriodType;
use serde::Deserialize;
use utoipa::IntoParams;

pub const STATE_NAME_REQUIRED: &str = "state_name required";
pub const FY_REQUIRED: &str = "fy required";
pub const UNSUPPORTED_STATE: &str = "only maharashtra supported in MVP";
pub const YEARS_REQUIRED: &str = "startyear and endyear required (integers)";
pub const INVALID_YEARS: &str = "invalid startyear/endyear";
pub const NO_ROWS_FOUND: &str = "no rows found";

/// Widest `endyear - startyear` a district query may ask for.
pub const MAX_RANGE_YEARS: i64 = 50;

/// Query string for `GET /state/all`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    /// Only `maharashtra` (any case) is served
    pub state_name: Option<String>,
    /// Fiscal year such as `2024-2025`; defaults to the newest configured one
    pub fy: Option<String>,
}

/// Query string for `GET /district/{districtcode}`.
///
/// Years are kept as raw strings so malformed input maps to the same
/// envelope as any other validation failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistrictRangeQuery {
    /// `month` or `year` (default)
    #[serde(rename = "type")]
    pub period_type: Option<String>,
    /// First calendar year of the range
    pub startyear: Option<String>,
    /// End calendar year, exclusive of the fiscal year starting in it
    pub endyear: Option<String>,
}

/// A validated district range request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistrictRange {
    pub period: PeriodType,
    pub start_year: i32,
    pub end_year: i32,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl DistrictRangeQuery {
    /// Checks presence of both years before parsing anything.
    ///
    /// Spans wider than [`MAX_RANGE_YEARS`] are rejected as invalid.
    pub fn validate(&self) -> Result<DistrictRange, AppError> {
        let (Some(start), Some(end)) = (non_blank(&self.startyear), non_blank(&self.endyear)) else {
            return Err(AppError::bad_request(anyhow::anyhow!(YEARS_REQUIRED)));
        };

        let (Ok(start_year), Ok(end_year)) = (start.parse::<i32>(), end.parse::<i32>()) else {
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_YEARS)));
        };
        let span = i64::from(end_year) - i64::from(start_year);
        if !(0..=MAX_RANGE_YEARS).contains(&span) {
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_YEARS)));
        }

        let period = match non_blank(&self.period_type) {
            None => PeriodType::default(),
            Some(raw) => raw
                .parse::<PeriodType>()
                .map_err(|msg| AppError::bad_request(anyhow::anyhow!(msg)))?,
        };

        Ok(DistrictRange {
            period,
            start_year,
            end_year,
        })
    }
}
