//! Lookback and unit controls

use crate::reload;
use leptos::prelude::*;
use trend_core::Channel;
use trend_fetch::DataClient;
use trend_state::{LOOKBACK_PRESETS, use_app_state};

/// One button per lookback preset; the active window is highlighted
#[component]
pub fn RangePicker() -> impl IntoView {
    let state = use_app_state();
    let client = expect_context::<DataClient>();
    let config = state.config;
    let lookback = Memo::new(move |_| config.with(|c| c.lookback_days));

    view! {
        <div class="range-picker">
            {LOOKBACK_PRESETS
                .iter()
                .map(|&(days, label)| {
                    let state = state.clone();
                    let client = client.clone();
                    view! {
                        <button
                            class=move || {
                                if lookback.get() == days { "range-btn active" } else { "range-btn" }
                            }
                            on:click=move |_| {
                                if lookback.get_untracked() != days {
                                    state.set_lookback(days);
                                    reload(&state, &client);
                                }
                            }
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Switches between pounds and kilograms
#[component]
pub fn UnitToggle() -> impl IntoView {
    let state = use_app_state();
    let client = expect_context::<DataClient>();
    let config = state.config;

    view! {
        <button
            class="unit-toggle"
            title="Switch unit"
            on:click=move |_| {
                state.toggle_unit();
                reload(&state, &client);
            }
        >
            {move || config.with(|c| c.unit.label())}
        </button>
    }
}

/// Color key for the three plotted channels
#[component]
pub fn Legend() -> impl IntoView {
    view! {
        <div class="legend">
            {Channel::all()
                .iter()
                .map(|channel| {
                    view! {
                        <span class="legend-item">
                            <span
                                class="legend-swatch"
                                style=format!("background: {}", channel.color())
                            />
                            <span class="legend-label">{channel.label()}</span>
                        </span>
                    }
                })
                .collect_view()}
        </div>
    }
}
