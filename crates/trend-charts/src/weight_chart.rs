//! Leptos adapter: measures the container, draws the [`Scene`] and tracks the
//! pointer.
//!
//! All drawing decisions live in [`ChartRenderer`] and [`CursorController`];
//! this component only maps their output to SVG nodes. The scene is a
//! derived signal, so every change replaces the previous SVG children.

use crate::{
    ChartArea, ChartRenderer, CursorController, CursorOverlay, CURSOR_DOT_RADIUS, Padding,
    PointerPosition, Scene, SceneElement, colors,
};
use leptos::{ev, html, prelude::*};
use trend_core::TimeSeries;

/// Weight chart configuration
#[derive(Debug, Clone, Copy)]
pub struct WeightChartConfig {
    pub renderer: ChartRenderer,
    pub padding: Padding,
    /// Subtracted from the container height so the SVG never forces a scrollbar
    pub inset: f64,
    /// Size used until the container has been measured
    pub fallback_width: f64,
    pub fallback_height: f64,
}

impl Default for WeightChartConfig {
    fn default() -> Self {
        Self {
            renderer: ChartRenderer::default(),
            padding: Padding::standard(),
            inset: 4.0,
            fallback_width: 800.0,
            fallback_height: 400.0,
        }
    }
}

/// Weight trend chart. `None` means nothing has been loaded yet and draws an
/// empty frame; an empty series draws the "no data" placeholder.
#[component]
pub fn WeightChart(
    #[prop(into)] series: Signal<Option<TimeSeries>>,
    #[prop(optional)] config: Option<WeightChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<html::Div>::new();
    let size = RwSignal::new((config.fallback_width, config.fallback_height));

    let measure = move || {
        let Some(el) = container.get_untracked() else {
            return;
        };
        let width = f64::from(el.offset_width());
        let height = f64::from(el.offset_height()) - config.inset;
        if width > 0.0 && height > 0.0 {
            tracing::trace!(width, height, "chart container measured");
            size.set((width, height));
        }
    };

    // First measurement once the container is mounted
    Effect::new(move |_| {
        if container.get().is_some() {
            measure();
        }
    });

    let resize = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize.remove());

    let area = Memo::new(move |_| {
        let (width, height) = size.get();
        ChartArea::new(width, height).with_padding(config.padding)
    });

    let scene = Memo::new(move |_| {
        let area = area.get();
        series.with(|s| match s {
            Some(s) => config.renderer.render(s, &area),
            None => Scene {
                area,
                bounds: None,
                elements: Vec::new(),
            },
        })
    });

    // A new layout pass gets a fresh cursor bound to the new bounds
    let cursor = StoredValue::new(None::<CursorController>);
    let overlay = RwSignal::new(None::<CursorOverlay>);

    Effect::new(move |_| {
        let scene = scene.get();
        cursor.set_value(scene.bounds.map(|b| CursorController::new(scene.area, b)));
        overlay.set(None);
    });

    let on_move = move |ev: ev::MouseEvent| {
        let Some(el) = container.get_untracked() else {
            return;
        };
        let pointer = PointerPosition::from_page(
            f64::from(ev.page_x()),
            f64::from(ev.page_y()),
            f64::from(el.offset_left()),
            f64::from(el.offset_top()),
        );

        let mut moved = None;
        cursor.update_value(|controller| {
            if let Some(controller) = controller {
                moved = series.with_untracked(|s| {
                    s.as_ref().map(|s| controller.pointer_moved(s, pointer))
                });
            }
        });
        if moved.is_some() {
            overlay.set(moved);
        }
    };

    view! {
        <div
            class="weight-chart"
            node_ref=container
            on:mousemove=on_move
            style="width: 100%; height: 100%; position: relative;"
        >
            <svg
                viewBox=move || scene.with(|s| s.viewbox())
                width=move || area.get().width
                height=move || area.get().height
                font-size="10"
                font-family="sans-serif"
            >
                {move || {
                    scene.with(|s| s.elements.iter().cloned().map(element_view).collect_view())
                }}
                {move || overlay.get().map(cursor_view)}
            </svg>
        </div>
    }
}

fn element_view(element: SceneElement) -> AnyView {
    match element {
        SceneElement::Line { x1, y1, x2, y2, stroke } => view! {
            <line x1=x1 y1=y1 x2=x2 y2=y2 stroke=stroke stroke-width="1" />
        }
        .into_any(),
        SceneElement::Text {
            x,
            y,
            content,
            anchor,
            transform,
            text_length,
        } => view! {
            <text
                x=x
                y=y
                text-anchor=anchor.as_str()
                transform=transform
                textLength=text_length
                fill=colors::TEXT
            >
                {content}
            </text>
        }
        .into_any(),
        SceneElement::Circle { cx, cy, r, fill, label } => view! {
            <circle cx=cx cy=cy r=r fill=fill>
                {label.map(|label| view! { <title>{label}</title> })}
            </circle>
        }
        .into_any(),
        SceneElement::Path { d, stroke } => view! {
            <path d=d fill="none" stroke=stroke stroke-width="1.5" stroke-linejoin="round" />
        }
        .into_any(),
    }
}

fn cursor_view(overlay: CursorOverlay) -> impl IntoView {
    let CursorOverlay {
        x,
        y,
        line_top,
        line_bottom,
        dots,
        anchor,
        dx,
        lines,
        ..
    } = overlay;

    view! {
        <g class="cursor" pointer-events="none">
            <line
                x1=x y1=line_top
                x2=x y2=line_bottom
                stroke=colors::CURSOR
                stroke-width="1"
            />
            {dots
                .into_iter()
                .map(|dot| view! {
                    <circle cx=dot.cx cy=dot.cy r=CURSOR_DOT_RADIUS fill=dot.color />
                })
                .collect_view()}
            <text x=x y=y text-anchor=anchor.as_str() fill=colors::TEXT>
                {lines
                    .into_iter()
                    .map(|line| view! { <tspan x=x dx=dx dy="1em">{line}</tspan> })
                    .collect_view()}
            </text>
        </g>
    }
}
