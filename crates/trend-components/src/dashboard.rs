//! Main dashboard layout component

use leptos::prelude::*;
use trend_charts::WeightChart;
use trend_core::colors;
use trend_state::use_app_state;

use crate::{Legend, RangePicker, UnitToggle};

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="dashboard">
            <header class="dash-header">
                <span class="dash-title">"Weight"</span>
                <RangePicker />
                <UnitToggle />
            </header>

            <main class="dash-main">
                <div class="panel chart-container">
                    <div class="panel-header">
                        <Legend />
                    </div>
                    <div class="panel-content">
                        <WeightChart series=state.series />
                    </div>
                </div>
            </main>

            <footer class="dash-footer">
                <StatusBar />
            </footer>
        </div>
    }
}

#[component]
fn StatusBar() -> impl IntoView {
    let state = use_app_state();
    let load = state.load;
    let series = state.series;
    let config = state.config;

    view! {
        <div class="status-bar">
            <div class="sb-load">
                <span class="sb-label">"Status:"</span>
                <span class=move || format!("sb-value {}", load.get().css_class())>
                    {move || load.get().label()}
                </span>
            </div>

            <div class="sb-samples">
                {move || {
                    if load.get().is_loading() {
                        return Some("…".to_string());
                    }
                    series.with(|s| s.as_ref().map(|s| format!("{} days", s.len())))
                }}
            </div>

            <div class="sb-unit">
                {move || config.with(|c| c.unit.label())}
            </div>

            {move || {
                state.error_message().map(|e| {
                    view! {
                        <div class="sb-error" style:color=colors::ERROR>
                            <span class="error-icon">"⚠"</span>
                            <span class="error-msg">{e}</span>
                        </div>
                    }
                })
            }}
        </div>
    }
}
