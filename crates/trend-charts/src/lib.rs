//! # trend-charts
//!
//! SVG weight trend chart built with Leptos.
//!
//! ## Architecture
//!
//! Rendering is split in two:
//! - pure functions that turn a [`TimeSeries`](trend_core::TimeSeries) and a
//!   [`ChartArea`] into a [`Scene`] (a flat list of SVG primitives), and a
//!   [`CursorOverlay`] for the pointer readout;
//! - a thin Leptos adapter ([`WeightChart`]) that applies them to the page.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: linear scale, path builder, formatters
//! - `scene` - Draw-list description of a chart
//! - `render` - Grid, markers and trend lines
//! - `cursor` - Pointer tracking and interpolated readout
//! - `weight_chart` - Leptos component

pub mod chartkit;
pub mod cursor;
pub mod render;
pub mod scene;
pub mod weight_chart;

pub use chartkit::*;
pub use cursor::*;
pub use render::*;
pub use scene::*;
pub use weight_chart::*;

// Re-export colors from trend-core for convenience
pub use trend_core::colors;

use trend_core::Bounds;

/// Padding between the SVG edge and the plot rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    /// Room for rotated date labels below the plot
    pub const fn standard() -> Self {
        Self::new(20.0, 80.0, 40.0, 40.0)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pixel rectangle of the chart and the affine map from data space onto its
/// padded interior. Rebuilt on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl ChartArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Left edge of the plot rectangle
    pub fn plot_left(&self) -> f64 {
        self.padding.left
    }

    /// Right edge of the plot rectangle
    pub fn plot_right(&self) -> f64 {
        self.width - self.padding.right
    }

    /// Top edge of the plot rectangle
    pub fn plot_top(&self) -> f64 {
        self.padding.top
    }

    /// Bottom edge of the plot rectangle
    pub fn plot_bottom(&self) -> f64 {
        self.height - self.padding.bottom
    }

    /// Time axis: `[min_x, max_x]` onto `[left, width - right]`
    pub fn x_scale(&self, bounds: &Bounds) -> LinearScale {
        LinearScale::new()
            .domain(bounds.min_x, bounds.max_x)
            .range(self.plot_left(), self.plot_right())
    }

    /// Value axis, inverted: larger values render higher
    pub fn y_scale(&self, bounds: &Bounds) -> LinearScale {
        LinearScale::new()
            .domain(bounds.min_y, bounds.max_y)
            .range(self.plot_bottom(), self.plot_top())
    }

    pub fn scale_x(&self, x: f64, bounds: &Bounds) -> f64 {
        self.x_scale(bounds).scale(x)
    }

    pub fn scale_y(&self, y: f64, bounds: &Bounds) -> f64 {
        self.y_scale(bounds).scale(y)
    }

    pub fn invert_x(&self, px: f64, bounds: &Bounds) -> f64 {
        self.x_scale(bounds).invert(px)
    }

    pub fn invert_y(&self, py: f64, bounds: &Bounds) -> f64 {
        self.y_scale(bounds).invert(py)
    }

    /// Clamp a pixel position into the plot rectangle
    pub fn clamp_to_plot(&self, px: f64, py: f64) -> (f64, f64) {
        (
            px.min(self.plot_right()).max(self.plot_left()),
            py.min(self.plot_bottom()).max(self.plot_top()),
        )
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartArea {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}
