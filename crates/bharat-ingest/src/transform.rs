//! Row-to-record transformation.
//!
//! Turns the rows of one fetch into month records and fiscal-year
//! aggregates. Never fails: missing columns become empty strings and
//! unparseable metrics become zero.

use bharat_cache::{RecordBatch, keys};
use bharat_models::{AggregateRecord, PeriodType};

use crate::fetcher::CsvRow;

pub const COLUMN_DISTRICT_CODE: &str = "District Code";
pub const COLUMN_DISTRICT_NAME: &str = "District Name";
pub const COLUMN_FIN_YEAR: &str = "fin year";
pub const COLUMN_MONTH: &str = "Month";
pub const COLUMN_APPROVED_LABOUR_BUDGET: &str = "Approved Labour Budget";
pub const COLUMN_PERSONDAYS_CENTRAL_LIABILITY: &str = "Persondays of Central Liability so far";
pub const COLUMN_TOTAL_HOUSEHOLDS_WORKED: &str = "Total Households Worked";
pub const COLUMN_TOTAL_JOBCARDS_ISSUED: &str = "Total No of JobCards issued";

/// Month records and year aggregates produced from one fetch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformOutput {
    pub months: RecordBatch,
    pub years: RecordBatch,
}

impl TransformOutput {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty() && self.years.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len() + self.years.len()
    }

    /// Merges both maps into a single write batch.
    pub fn into_batch(self) -> RecordBatch {
        let mut batch = self.months;
        batch.extend(self.years);
        batch
    }
}

/// Parses a metric cell as `f64`.
///
/// Blank, `NA` (any case) and unparseable values are zero. Thousands
/// separators are stripped first.
pub fn parse_metric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
        return 0.0;
    }

    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// First three characters of a month name; shorter values are kept whole.
pub fn month_abbrev(raw: &str) -> String {
    raw.trim().chars().take(3).collect()
}

fn column<'a>(row: &'a CsvRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or_default()
}

fn month_record(row: &CsvRow) -> AggregateRecord {
    AggregateRecord {
        district_code: column(row, COLUMN_DISTRICT_CODE).to_string(),
        district_name: column(row, COLUMN_DISTRICT_NAME).to_string(),
        fin_year: column(row, COLUMN_FIN_YEAR).to_string(),
        month: Some(month_abbrev(column(row, COLUMN_MONTH))),
        period_type: PeriodType::Month,
        approved_labour_budget: parse_metric(column(row, COLUMN_APPROVED_LABOUR_BUDGET)),
        persondays_central_liability: parse_metric(column(
            row,
            COLUMN_PERSONDAYS_CENTRAL_LIABILITY,
        )),
        total_households_worked: parse_metric(column(row, COLUMN_TOTAL_HOUSEHOLDS_WORKED)),
        total_jobcards_issued: parse_metric(column(row, COLUMN_TOTAL_JOBCARDS_ISSUED)),
    }
}

/// Builds month records and per-district fiscal-year sums.
///
/// A repeated month key keeps the last row. Year aggregates take their
/// identifiers from the first row seen for the key.
pub fn rows_to_records(rows: &[CsvRow]) -> TransformOutput {
    let mut output = TransformOutput::default();

    for row in rows {
        let record = month_record(row);
        let month = record.month.as_deref().unwrap_or_default();
        let month_key = keys::month(&record.district_code, &record.fin_year, month);
        let year_key = keys::year(&record.district_code, &record.fin_year);

        output
            .years
            .entry(year_key)
            .or_insert_with(|| {
                AggregateRecord::year(&record.district_code, &record.district_name, &record.fin_year)
            })
            .accumulate(&record);

        output.months.insert(month_key, record);
    }

    output
}
