//! Page URL access: the query string is the bookmarkable form of the
//! chart configuration.

use leptos::prelude::*;
use trend_fetch::{DataClient, load};
use trend_state::{AppState, ChartConfig};
use wasm_bindgen::JsValue;

/// Current page query string (including the leading `?`, if any)
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Push a history entry for `config` without reloading the page
pub fn push_query(config: &ChartConfig) {
    let url = format!("?{}", config.to_query());
    let pushed = web_sys::window()
        .and_then(|w| w.history().ok())
        .map(|h| h.push_state_with_url(&JsValue::NULL, "", Some(&url)));

    match pushed {
        Some(Ok(())) => tracing::debug!("history: {}", url),
        Some(Err(e)) => tracing::warn!("history push failed: {:?}", e),
        None => tracing::warn!("history unavailable"),
    }
}

/// Record the current configuration in the URL and load it
pub fn reload(state: &AppState, client: &DataClient) {
    let config = state.config.get_untracked();
    push_query(&config);
    load(state.clone(), client.clone());
}
