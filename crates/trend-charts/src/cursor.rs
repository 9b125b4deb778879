//! Pointer tracking over the plot and the interpolated value readout

use crate::{ChartArea, TextAnchor, format_day};
use chrono::{DateTime, Utc};
use trend_core::{
    Bounds, Channel, FixedDecimalFormatter, TimeSeries, ValueFormatter, instant_from_millis,
};

/// Readout flips to the left of the cursor past this fraction of the width
const RIGHT_FLIP: f64 = 0.75;
/// ... and back to the right below this one
const LEFT_FLIP: f64 = 0.25;

/// Radius of the per-channel dots on the cursor line
pub const CURSOR_DOT_RADIUS: f64 = 4.0;

/// Pointer position relative to the chart container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Page coordinates corrected by the container's page offset
    pub fn from_page(page_x: f64, page_y: f64, offset_left: f64, offset_top: f64) -> Self {
        Self::new(page_x - offset_left, page_y - offset_top)
    }
}

/// Marker where the cursor line crosses a trend line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendDot {
    pub channel: Channel,
    pub cx: f64,
    pub cy: f64,
    pub color: &'static str,
}

/// Everything drawn for the cursor at one pointer position
#[derive(Debug, Clone, PartialEq)]
pub struct CursorOverlay {
    /// Clamped pointer position
    pub x: f64,
    pub y: f64,
    pub line_top: f64,
    pub line_bottom: f64,
    /// Instant under the cursor line
    pub at: DateTime<Utc>,
    /// Interpolated value per channel, `0.0` where undefined
    pub values: Vec<(Channel, f64)>,
    pub dots: Vec<TrendDot>,
    pub anchor: TextAnchor,
    /// `dx` offset of the readout text
    pub dx: &'static str,
    /// Readout: the date, then one line per defined channel
    pub lines: Vec<String>,
}

impl CursorOverlay {
    pub fn value(&self, channel: Channel) -> f64 {
        self.values
            .iter()
            .find(|(c, _)| *c == channel)
            .map_or(0.0, |(_, v)| *v)
    }
}

/// Cursor state machine. There is no exit transition: once tracking, the
/// overlay stays at the last pointer position.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CursorState {
    #[default]
    Idle,
    Tracking(CursorOverlay),
}

impl CursorState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Tracking(_) => "Tracking",
        }
    }
}

/// Maps pointer moves to cursor overlays for one rendered chart.
///
/// Built per layout pass alongside the [`Scene`](crate::Scene) it annotates,
/// using the same area and bounds.
#[derive(Debug, Clone)]
pub struct CursorController {
    area: ChartArea,
    bounds: Bounds,
    state: CursorState,
}

impl CursorController {
    pub fn new(area: ChartArea, bounds: Bounds) -> Self {
        Self {
            area,
            bounds,
            state: CursorState::Idle,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn overlay(&self) -> Option<&CursorOverlay> {
        match &self.state {
            CursorState::Tracking(overlay) => Some(overlay),
            CursorState::Idle => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, CursorState::Tracking(_))
    }

    /// Handle a pointer move: clamp, invert the x mapping, query every
    /// channel and lay out the readout. Returns the new overlay.
    pub fn pointer_moved(&mut self, series: &TimeSeries, pointer: PointerPosition) -> CursorOverlay {
        let (x, y) = self.area.clamp_to_plot(pointer.x, pointer.y);
        let data_x = self.area.invert_x(x, &self.bounds);

        let values: Vec<(Channel, f64)> = Channel::all()
            .iter()
            .map(|&c| (c, series.value_at_x(c, data_x)))
            .collect();

        let dots = values
            .iter()
            .filter(|(c, v)| *c != Channel::Raw && *v != 0.0)
            .map(|&(channel, v)| TrendDot {
                channel,
                cx: x,
                cy: self.area.scale_y(v, &self.bounds),
                color: channel.color(),
            })
            .collect();

        let at = instant_from_millis(data_x);
        let (anchor, dx) = self.anchoring(x);

        let overlay = CursorOverlay {
            x,
            y,
            line_top: self.area.plot_top(),
            line_bottom: self.area.plot_bottom(),
            at,
            lines: readout_lines(at, &values),
            values,
            dots,
            anchor,
            dx,
        };

        self.state = CursorState::Tracking(overlay.clone());
        overlay
    }

    /// Anchor near the edges, keep the previous one in the middle band
    fn anchoring(&self, x: f64) -> (TextAnchor, &'static str) {
        let ratio = if self.area.width > 0.0 { x / self.area.width } else { 0.5 };
        if ratio > RIGHT_FLIP {
            (TextAnchor::End, "-.1em")
        } else if ratio < LEFT_FLIP {
            (TextAnchor::Start, "1em")
        } else {
            match &self.state {
                CursorState::Tracking(prev) => (prev.anchor, prev.dx),
                CursorState::Idle => (TextAnchor::Start, "1em"),
            }
        }
    }
}

/// Date line followed by `"<label>: <value>"` for each defined channel
fn readout_lines(at: DateTime<Utc>, values: &[(Channel, f64)]) -> Vec<String> {
    let formatter = FixedDecimalFormatter::default();
    std::iter::once(format_day(at))
        .chain(
            values
                .iter()
                .filter(|(_, v)| *v != 0.0)
                .map(|(c, v)| format!("{}: {}", c.label(), formatter.format(*v))),
        )
        .collect()
}
