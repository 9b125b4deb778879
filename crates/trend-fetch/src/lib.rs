//! # trend-fetch
//!
//! Loads the weight feed over HTTP and hands the decoded series to the
//! reactive state. One request per load; failures are reported, not retried.

pub mod client;

pub use client::*;

/// Same-origin by default: the server also serves the app
pub const DEFAULT_BASE_URL: &str = "";

// ============================================================================
// FETCH CONFIGURATION
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Prefix for feed paths, without a trailing slash
    pub base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute (or same-origin) URL for a feed path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_state::ChartConfig;

    #[test]
    fn test_same_origin_by_default() {
        let config = FetchConfig::default();
        assert_eq!(config.url("/data?days=365"), "/data?days=365");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = FetchConfig::new("http://127.0.0.1:8080/");
        let chart = ChartConfig::default().with_lookback(30).with_user("kim");
        assert_eq!(
            config.url(&chart.data_path()),
            "http://127.0.0.1:8080/data?days=30&user=kim"
        );
    }
}
