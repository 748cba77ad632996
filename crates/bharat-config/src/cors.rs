use crate::env_non_empty;

/// Origins allowed when `ALLOWED_ORIGINS` is unset: local dev server and the hosted frontend.
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,https://bharat-digital-fe.brschess.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env_non_empty("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.into());
        Self::from_list(&raw)
    }

    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_list(DEFAULT_ALLOWED_ORIGINS)
    }
}
