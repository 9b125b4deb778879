//! Chart renderer: gridlines, sample markers and trend lines
//!
//! Everything here is a pure function of the series and the [`ChartArea`];
//! the output is a [`Scene`] for the adapter to draw.

use crate::{
    ChartArea, LinePath, PathGenerator, Scale, Scene, SceneElement, TextAnchor, colors,
    format_date_label, format_day,
};
use chrono::{DateTime, Datelike, Duration, Months, Utc};
use trend_core::{
    Bounds, Channel, FixedDecimalFormatter, MS_PER_DAY, TimeSeries, ValueFormatter,
    instant_from_millis,
};

/// Placeholder shown instead of axes when there is nothing to plot
pub const NO_DATA_TEXT: &str = "No data in range.";

/// Spacing between vertical date gridlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStride {
    Quarterly,
    Monthly,
    Weekly,
    Daily,
}

impl DateStride {
    /// Stride for a time span given in days
    pub fn for_span(days: f64) -> Self {
        if days > 365.0 {
            Self::Quarterly
        } else if days > 90.0 {
            Self::Monthly
        } else if days > 30.0 {
            Self::Weekly
        } else {
            Self::Daily
        }
    }

    /// Month strides anchor on the first of the month
    pub fn is_month_based(&self) -> bool {
        matches!(self, Self::Quarterly | Self::Monthly)
    }

    /// Previous gridline before `date`
    pub fn step_back(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Quarterly => date.checked_sub_months(Months::new(3)),
            Self::Monthly => date.checked_sub_months(Months::new(1)),
            Self::Weekly => date.checked_sub_signed(Duration::days(7)),
            Self::Daily => date.checked_sub_signed(Duration::days(1)),
        }
    }
}

/// Chart renderer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRenderer {
    /// Horizontal value gridlines
    pub value_lines: usize,
    pub marker_radius: f64,
    /// Half-extent added around a single-instant x range (ms)
    pub min_half_width: f64,
    /// Half-extent added around a constant-value y range
    pub min_half_height: f64,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            value_lines: 12,
            marker_radius: 2.0,
            min_half_width: MS_PER_DAY as f64 / 2.0,
            min_half_height: 1.0,
        }
    }
}

impl ChartRenderer {
    /// Bounds over the raw and both trend channels; see [`Bounds::of_series`]
    pub fn compute_bounds(&self, series: &TimeSeries) -> Option<Bounds> {
        Bounds::of_series(series)
    }

    /// Full chart, or the placeholder when the series has nothing to plot
    pub fn render(&self, series: &TimeSeries, area: &ChartArea) -> Scene {
        let Some(bounds) = self.compute_bounds(series) else {
            tracing::debug!(samples = series.len(), "no plottable samples");
            return self.no_data(area);
        };

        let bounds = bounds.with_min_extent(self.min_half_width, self.min_half_height);
        let mut elements = self.render_grid(&bounds, area);
        elements.extend(self.render_series(series, area, &bounds));

        tracing::debug!(
            samples = series.len(),
            elements = elements.len(),
            span_days = bounds.span_days(),
            "rendered chart"
        );

        Scene {
            area: *area,
            bounds: Some(bounds),
            elements,
        }
    }

    /// "No data" placeholder
    pub fn no_data(&self, area: &ChartArea) -> Scene {
        Scene {
            area: *area,
            bounds: None,
            elements: vec![SceneElement::Text {
                x: area.width / 2.0,
                y: area.height / 2.0,
                content: NO_DATA_TEXT.to_string(),
                anchor: TextAnchor::Middle,
                transform: None,
                text_length: None,
            }],
        }
    }

    /// Value gridlines (evenly spaced from `min_y`) and date gridlines
    pub fn render_grid(&self, bounds: &Bounds, area: &ChartArea) -> Vec<SceneElement> {
        let mut elements = self.value_grid(bounds, area);
        elements.extend(self.date_grid(bounds, area));
        elements
    }

    fn value_grid(&self, bounds: &Bounds, area: &ChartArea) -> Vec<SceneElement> {
        let formatter = FixedDecimalFormatter { decimals: 1 };
        let x1 = area.scale_x(bounds.min_x, bounds);
        let x2 = area.scale_x(bounds.max_x, bounds);
        let y_scale = area.y_scale(bounds);

        y_scale
            .steps(self.value_lines)
            .into_iter()
            .flat_map(|value| {
                let y = y_scale.scale(value);
                [
                    SceneElement::text(0.0, y, formatter.format(value)),
                    SceneElement::line(x1, y, x2, y, colors::VALUE_GRID),
                ]
            })
            .collect()
    }

    /// Walks backwards from the end date so the most recent gridline always
    /// sits on the last sample.
    fn date_grid(&self, bounds: &Bounds, area: &ChartArea) -> Vec<SceneElement> {
        let span = bounds.span_days();
        let stride = DateStride::for_span(span);
        let with_day = span <= 90.0;
        let begin = instant_from_millis(bounds.min_x);
        let mut cursor = instant_from_millis(bounds.max_x);
        if stride.is_month_based() {
            cursor = cursor.with_day(1).unwrap_or(cursor);
        }

        let top = area.scale_y(bounds.max_y, bounds);
        let bottom = area.scale_y(bounds.min_y, bounds);
        let label_y = area.height;

        let mut elements = Vec::new();
        while cursor >= begin {
            let x = area.scale_x(cursor.timestamp_millis() as f64, bounds);
            elements.push(SceneElement::Text {
                x,
                y: label_y,
                content: format_date_label(cursor, with_day),
                anchor: TextAnchor::Start,
                transform: Some(format!("rotate(-90, {}, {})", x, label_y)),
                text_length: Some(area.padding.bottom),
            });
            elements.push(SceneElement::line(x, bottom, x, top, colors::DATE_GRID));

            match stride.step_back(cursor) {
                Some(prev) => cursor = prev,
                None => break,
            }
        }

        elements
    }

    /// Markers for each raw reading and one polyline per trend channel
    pub fn render_series(
        &self,
        series: &TimeSeries,
        area: &ChartArea,
        bounds: &Bounds,
    ) -> Vec<SceneElement> {
        let mut elements: Vec<SceneElement> = series
            .iter()
            .filter(|s| s.reading(Channel::Raw).is_some())
            .map(|s| SceneElement::Circle {
                cx: area.scale_x(s.x(), bounds),
                cy: area.scale_y(s.raw, bounds),
                r: self.marker_radius,
                fill: Channel::Raw.color(),
                label: Some(format_day(s.timestamp)),
            })
            .collect();

        for &channel in Channel::trends() {
            let points: Vec<(f64, f64)> = series
                .points_for(channel, false)
                .map(|(x, y)| (area.scale_x(x, bounds), area.scale_y(y, bounds)))
                .collect();
            if points.is_empty() {
                continue;
            }

            elements.push(SceneElement::Path {
                d: LinePath.generate(&points),
                stroke: channel.color(),
            });
        }

        elements
    }
}
