//! Weight trend dashboard - WASM entry point

use leptos::prelude::*;
use trend_components::{Dashboard, current_query};
use trend_core::{TrendError, TrendResult};
use trend_fetch::{DataClient, FetchConfig, load};
use trend_state::{ChartConfig, provide_app_state};
use wasm_bindgen::JsCast;

/// Element the app mounts into
const ROOT_ID: &str = "app";

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    // No container, no chart: log and stay unmounted
    if let Err(err) = mount_root() {
        tracing::error!("Not starting: {}", err);
    }
}

fn mount_root() -> TrendResult<()> {
    let missing = || TrendError::MissingContainer(ROOT_ID.to_string());

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(ROOT_ID))
        .ok_or_else(missing)?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| missing())?;

    leptos::mount::mount_to(root, App).forget();
    tracing::info!("Mounted into #{}", ROOT_ID);
    Ok(())
}

#[component]
fn App() -> impl IntoView {
    let (config, errors) = ChartConfig::parse_query(&current_query());
    for err in &errors {
        tracing::warn!("Ignoring page query parameter: {}", err);
    }

    let state = provide_app_state(config);
    if !errors.is_empty() {
        let msg: Vec<String> = errors.iter().map(ToString::to_string).collect();
        state.set_query_error(msg.join("; "));
    }

    let client = DataClient::new(FetchConfig::default());
    provide_context(client.clone());
    load(state, client);

    view! { <Dashboard /> }
}
