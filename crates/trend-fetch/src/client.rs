//! Feed client and the load cycle that drives [`AppState`]

use crate::FetchConfig;
use gloo_net::http::Request;
use leptos::prelude::*;
use trend_core::{TimeSeries, TrendError, TrendResult};
use trend_state::{AppState, ChartConfig};
use wasm_bindgen_futures::spawn_local;

// ============================================================================
// DATA CLIENT
// ============================================================================

/// HTTP client for the weight feed
#[derive(Debug, Clone, Default)]
pub struct DataClient {
    config: FetchConfig,
}

impl DataClient {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Request URL for a chart configuration
    pub fn url_for(&self, chart: &ChartConfig) -> String {
        self.config.url(&chart.data_path())
    }

    /// Fetch and decode one feed response into a display-unit series
    pub async fn fetch(&self, chart: &ChartConfig) -> TrendResult<TimeSeries> {
        let url = self.url_for(chart);
        tracing::info!("Fetching {}", url);

        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| TrendError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(TrendError::Fetch {
                url,
                status: resp.status(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| TrendError::Network(e.to_string()))?;

        chart.mode.decode(&body, chart.unit)
    }
}

// ============================================================================
// LOAD CYCLE
// ============================================================================

/// Start a load for the current configuration (spawns async task).
///
/// Each call starts a new generation; a response that arrives after a later
/// call has started is dropped instead of overwriting newer data.
pub fn load(state: AppState, client: DataClient) {
    let chart = state.config.get_untracked();
    let generation = state.begin_load();

    spawn_local(async move {
        let result = client.fetch(&chart).await;
        if !state.finish_load(generation, result) {
            tracing::debug!("Dropped response for superseded request {}", generation);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_core::{FeedMode, Unit};

    #[test]
    fn test_url_for_modes() {
        let client = DataClient::new(FetchConfig::new("http://localhost:8080"));
        let chart = ChartConfig::default().with_unit(Unit::Kg);
        assert_eq!(client.url_for(&chart), "http://localhost:8080/data?days=365");

        let chart = chart.with_mode(FeedMode::Raw).with_lookback(0);
        assert_eq!(client.url_for(&chart), "http://localhost:8080/weights?days=0");
    }
}
