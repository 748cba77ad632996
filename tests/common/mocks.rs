use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bharat_digital::bharat_ingest::transform::{
    COLUMN_APPROVED_LABOUR_BUDGET, COLUMN_DISTRICT_CODE, COLUMN_DISTRICT_NAME, COLUMN_FIN_YEAR,
    COLUMN_MONTH, COLUMN_PERSONDAYS_CENTRAL_LIABILITY, COLUMN_TOTAL_HOUSEHOLDS_WORKED,
    COLUMN_TOTAL_JOBCARDS_ISSUED,
};
use bharat_digital::bharat_ingest::{CsvRow, FetchError, StatsSource};

/// Upstream stand-in: fiscal years without canned rows fail.
#[derive(Default)]
pub struct StubSource {
    responses: HashMap<String, Vec<CsvRow>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, fin_year: &str, rows: Vec<CsvRow>) -> Self {
        self.responses.insert(fin_year.to_string(), rows);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(state_name, fin_year)` pairs in call order.
    pub fn requested(&self) -> Vec<(String, String)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsSource for StubSource {
    async fn fetch_rows(
        &self,
        state_name: &str,
        fin_year: &str,
    ) -> Result<Vec<CsvRow>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap()
            .push((state_name.to_string(), fin_year.to_string()));

        self.responses
            .get(fin_year)
            .cloned()
            .ok_or(FetchError::MissingHeader)
    }
}

#[allow(dead_code)]
pub fn csv_row(code: &str, name: &str, fin_year: &str, month: &str, metrics: [&str; 4]) -> CsvRow {
    [
        (COLUMN_DISTRICT_CODE, code),
        (COLUMN_DISTRICT_NAME, name),
        (COLUMN_FIN_YEAR, fin_year),
        (COLUMN_MONTH, month),
        (COLUMN_APPROVED_LABOUR_BUDGET, metrics[0]),
        (COLUMN_PERSONDAYS_CENTRAL_LIABILITY, metrics[1]),
        (COLUMN_TOTAL_HOUSEHOLDS_WORKED, metrics[2]),
        (COLUMN_TOTAL_JOBCARDS_ISSUED, metrics[3]),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
