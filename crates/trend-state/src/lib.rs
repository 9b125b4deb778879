//! # trend-state
//!
//! Reactive state for the weight trend dashboard.
//! The loaded series is replaced wholesale on every load, never mutated.

pub mod config;
pub mod generation;

pub use config::*;
pub use generation::*;

use leptos::prelude::*;
use trend_core::{TimeSeries, TrendResult};

// ============================================================================
// LOAD STATE
// ============================================================================

/// Data load state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading…",
            Self::Loaded => "Loaded",
            Self::Failed => "Failed",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Idle => "status-idle",
            Self::Loading => "status-loading",
            Self::Loaded => "status-loaded",
            Self::Failed => "status-failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone)]
pub struct AppState {
    /// Current chart configuration
    pub config: RwSignal<ChartConfig>,
    /// Last successfully loaded series (display unit)
    pub series: RwSignal<Option<TimeSeries>>,
    pub load: RwSignal<LoadState>,
    /// Error from the last load, cleared by the next successful one
    pub error: RwSignal<Option<String>>,
    /// Problem with the page query; outlives loads
    pub query_error: RwSignal<Option<String>>,
    pub generation: RenderGeneration,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config: RwSignal::new(config),
            series: RwSignal::new(None),
            load: RwSignal::new(LoadState::Idle),
            error: RwSignal::new(None),
            query_error: RwSignal::new(None),
            generation: RenderGeneration::new(),
        }
    }

    /// Mark a load as started and return its generation
    pub fn begin_load(&self) -> u64 {
        let generation = self.generation.next();
        self.load.set(LoadState::Loading);
        generation
    }

    /// Apply a completed load. Returns `false` (and changes nothing) when a
    /// later load has been started since.
    pub fn finish_load(&self, generation: u64, result: TrendResult<TimeSeries>) -> bool {
        if !self.generation.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.generation.current(),
                "discarding stale load"
            );
            return false;
        }

        match result {
            Ok(series) => {
                tracing::info!(samples = series.len(), "series loaded");
                self.series.set(Some(series));
                self.error.set(None);
                self.load.set(LoadState::Loaded);
            }
            Err(err) => {
                tracing::error!(%err, "load failed");
                self.error.set(Some(err.to_string()));
                self.load.set(LoadState::Failed);
            }
        }
        true
    }

    pub fn set_query_error(&self, msg: impl Into<String>) {
        self.query_error.set(Some(msg.into()));
    }

    /// Message for the status bar: a load failure wins over a query problem
    pub fn error_message(&self) -> Option<String> {
        self.error.get().or_else(|| self.query_error.get())
    }

    pub fn set_lookback(&self, days: u32) {
        self.config.update(|c| c.lookback_days = days);
    }

    pub fn toggle_unit(&self) {
        self.config.update(|c| c.unit = c.unit.toggle());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state(config: ChartConfig) -> AppState {
    let state = AppState::new(config);
    provide_context(state.clone());
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_core::TrendError;

    #[test]
    fn test_load_state_labels() {
        assert_eq!(LoadState::default(), LoadState::Idle);
        assert_eq!(LoadState::Failed.css_class(), "status-failed");
        assert!(LoadState::Loading.is_loading());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::default();
            let first = state.begin_load();
            let second = state.begin_load();

            assert!(!state.finish_load(first, Ok(TimeSeries::default())));
            assert_eq!(state.load.get_untracked(), LoadState::Loading);
            assert!(state.series.get_untracked().is_none());

            assert!(state.finish_load(second, Ok(TimeSeries::default())));
            assert_eq!(state.load.get_untracked(), LoadState::Loaded);
            assert!(state.series.get_untracked().is_some());
        });
    }

    #[test]
    fn test_failed_load_keeps_previous_series() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::default();
            let g = state.begin_load();
            state.finish_load(g, Ok(TimeSeries::default()));

            let g = state.begin_load();
            let err = TrendError::Fetch {
                url: "/data?days=365".into(),
                status: 500,
            };
            assert!(state.finish_load(g, Err(err)));
            assert_eq!(state.load.get_untracked(), LoadState::Failed);
            assert!(state.series.get_untracked().is_some());
            assert!(state.error.get_untracked().is_some_and(|e| e.contains("500")));
        });
    }

    #[test]
    fn test_query_error_survives_successful_load() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::default();
            state.set_query_error("days must be a non-negative integer, got `abc`");

            let g = state.begin_load();
            assert!(state.finish_load(g, Ok(TimeSeries::default())));

            assert_eq!(state.load.get_untracked(), LoadState::Loaded);
            assert!(state.error_message().is_some_and(|e| e.contains("abc")));
        });
    }

    #[test]
    fn test_load_error_shown_before_query_error() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::default();
            state.set_query_error("bad days");

            let g = state.begin_load();
            let err = TrendError::Network("connection refused".into());
            state.finish_load(g, Err(err));
            assert!(state.error_message().is_some_and(|e| e.contains("connection refused")));

            let g = state.begin_load();
            state.finish_load(g, Ok(TimeSeries::default()));
            assert_eq!(state.error_message().as_deref(), Some("bad days"));
        });
    }
}
