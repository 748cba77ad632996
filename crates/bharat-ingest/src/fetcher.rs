//! Upstream CSV fetcher.

use async_trait::async_trait;
use bharat_config::UpstreamConfig;
use reqwest::StatusCode;
use std::collections::HashMap;
use tracing::{Span, debug, field, instrument};

/// One CSV record, keyed by trimmed header name.
pub type CsvRow = HashMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV response has no header line")]
    MissingHeader,
}

/// Source of raw statistics rows for one state and fiscal year.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_rows(&self, state_name: &str, fin_year: &str)
    -> Result<Vec<CsvRow>, FetchError>;
}

/// HTTP client for the data.gov.in CSV resource.
#[derive(Clone)]
pub struct DataGovClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    page_limit: u32,
}

impl std::fmt::Debug for DataGovClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGovClient")
            .field("base_url", &self.base_url)
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl DataGovClient {
    /// Builds a client whose requests time out after `config.timeout`.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            page_limit: config.page_limit,
        })
    }
}

#[async_trait]
impl StatsSource for DataGovClient {
    #[instrument(
        name = "http.client",
        skip(self),
        fields(
            service.name = "data.gov.in",
            http.status_code = field::Empty,
            rows = field::Empty,
            otel.kind = "client"
        )
    )]
    async fn fetch_rows(
        &self,
        state_name: &str,
        fin_year: &str,
    ) -> Result<Vec<CsvRow>, FetchError> {
        let limit = self.page_limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "csv"),
                ("limit", limit.as_str()),
                ("filters[state_name]", state_name),
                ("filters[fin_year]", fin_year),
            ])
            .send()
            .await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let rows = parse_csv(&body)?;

        Span::current().record("rows", rows.len());
        debug!(bytes = body.len(), rows = rows.len(), "Fetched upstream CSV");

        Ok(rows)
    }
}

/// Parses a CSV body whose first line is the header row.
///
/// Headers and values are trimmed. A record whose field count differs from
/// the header fails the whole parse.
pub fn parse_csv(body: &[u8]) -> Result<Vec<CsvRow>, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(FetchError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect::<CsvRow>();
        rows.push(row);
    }

    Ok(rows)
}
