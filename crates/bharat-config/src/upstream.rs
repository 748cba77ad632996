//! Upstream statistics API configuration.

use std::fmt;
use std::time::Duration;

use bharat_models::districts::UPSTREAM_STATE_NAME;

use crate::{env_non_empty, env_parse_or};

/// data.gov.in MGNREGA district-wise resource.
pub const DEFAULT_BASE_URL: &str =
    "https://api.data.gov.in/resource/ee03643a-ee4c-48c2-ac30-9f2ff26ab722";

/// Public sample key published by data.gov.in; limited page sizes.
pub const DEFAULT_API_KEY: &str = "579b464db66ec23bdd000001cdd3946e44ce4aad7209ff7b23ac571b";

/// Settings for fetching CSV statistics from the upstream API.
///
/// # Environment Variables
///
/// - `DATA_GOV_API_KEY`: API credential (default: the public sample key)
/// - `DATA_GOV_BASE_URL`: Resource URL (default: the MGNREGA district resource)
/// - `HTTP_TIMEOUT_SECS`: Whole-request timeout (default: `50`)
/// - `FETCH_LIMIT`: Page size requested per fiscal year (default: `20000`)
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub page_limit: u32,
    /// State sent as `filters[state_name]`.
    pub state_name: String,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("page_limit", &self.page_limit)
            .field("state_name", &self.state_name)
            .finish_non_exhaustive()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(50),
            page_limit: 20_000,
            state_name: UPSTREAM_STATE_NAME.into(),
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_non_empty("DATA_GOV_API_KEY").unwrap_or(defaults.api_key),
            base_url: env_non_empty("DATA_GOV_BASE_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(env_parse_or(
                "HTTP_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
            page_limit: env_parse_or("FETCH_LIMIT", defaults.page_limit),
            state_name: defaults.state_name,
        }
    }
}
