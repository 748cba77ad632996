//! Cache key generation.
//!
//! Keys are plain strings so range queries can be answered by enumerating
//! every key in the range and issuing one `MGET`:
//!
//! - Year record: `<districtCode>_FY<startYear>-<endYear>`
//! - Month record: `<districtCode>_FY<startYear>-<endYear>_<Mon>`

use bharat_models::{MAHARASHTRA_DISTRICTS, MONTHS, PeriodType, fiscal_years_between};

/// Key for a district's fiscal-year aggregate.
pub fn year(district_code: &str, fin_year: &str) -> String {
    format!("{}_FY{}", district_code, fin_year)
}

/// Key for a district's single-month record.
pub fn month(district_code: &str, fin_year: &str, month: &str) -> String {
    format!("{}_FY{}_{}", district_code, fin_year, month)
}

/// Keys read by a district range query, in response order.
///
/// Covers fiscal years starting in `[start_year, end_year)`. Month queries
/// expand every fiscal year into twelve keys, January through December.
pub fn district_range(
    district_code: &str,
    period: PeriodType,
    start_year: i32,
    end_year: i32,
) -> Vec<String> {
    let fiscal_years = fiscal_years_between(start_year, end_year);

    match period {
        PeriodType::Year => fiscal_years
            .iter()
            .map(|fy| year(district_code, fy))
            .collect(),
        PeriodType::Month => fiscal_years
            .iter()
            .flat_map(|fy| MONTHS.iter().map(move |m| month(district_code, fy, m)))
            .collect(),
    }
}

/// Year keys for every supported district, in district order.
pub fn state_year(fin_year: &str) -> Vec<String> {
    MAHARASHTRA_DISTRICTS
        .iter()
        .map(|district| year(district.code, fin_year))
        .collect()
}
