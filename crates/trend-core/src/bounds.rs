//! Data-space bounding box of a series

use crate::{Channel, MS_PER_DAY, TimeSeries, instant_from_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in data space. `x` is epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Tight bounds of every reading across all channels.
    ///
    /// Samples with no reading in any channel are ignored on both axes; a
    /// channel that is entirely sentinel contributes nothing to `y`.
    /// Returns `None` when nothing carries a reading.
    pub fn of_series(series: &TimeSeries) -> Option<Self> {
        Self::of_channels(series, Channel::all())
    }

    /// Like [`Bounds::of_series`], restricted to the given channels
    pub fn of_channels(series: &TimeSeries, channels: &[Channel]) -> Option<Self> {
        let mut bounds: Option<Self> = None;

        for sample in series {
            let readings = channels.iter().filter_map(|&c| sample.reading(c));
            for value in readings {
                let x = sample.x();
                bounds = Some(match bounds {
                    None => Self::new(x, x, value, value),
                    Some(b) => Self::new(
                        b.min_x.min(x),
                        b.max_x.max(x),
                        b.min_y.min(value),
                        b.max_y.max(value),
                    ),
                });
            }
        }

        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Span of the x axis in days
    pub fn span_days(&self) -> f64 {
        self.width() / MS_PER_DAY as f64
    }

    pub fn start(&self) -> DateTime<Utc> {
        instant_from_millis(self.min_x)
    }

    pub fn end(&self) -> DateTime<Utc> {
        instant_from_millis(self.max_x)
    }

    /// Widen zero-extent axes symmetrically so the coordinate mapping never
    /// divides by zero: `half_x` ms either side on x, `half_y` on y.
    pub fn with_min_extent(self, half_x: f64, half_y: f64) -> Self {
        let mut b = self;
        if b.width() <= 0.0 {
            b.min_x -= half_x;
            b.max_x += half_x;
        }
        if b.height() <= 0.0 {
            b.min_y -= half_y;
            b.max_y += half_y;
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_bounds_skip_blank_samples() {
        let series = TimeSeries::new(vec![
            Sample::new(at(1), 0.0),
            Sample::new(at(2), 80.0).with_trends(81.0, 0.0),
            Sample::new(at(3), 79.0).with_trends(80.5, 0.0),
            Sample::new(at(4), 0.0),
        ]);

        let b = Bounds::of_series(&series).unwrap();
        assert_eq!(b.min_x, at(2).timestamp_millis() as f64);
        assert_eq!(b.max_x, at(3).timestamp_millis() as f64);
        assert_eq!(b.min_y, 79.0);
        assert_eq!(b.max_y, 81.0);
    }

    #[test]
    fn test_sentinel_channel_excluded_from_y() {
        // All FiveDay values are missing; they must not pull min_y to zero.
        let series = TimeSeries::new(vec![
            Sample::new(at(1), 70.0).with_trends(0.0, 72.0),
            Sample::new(at(2), 74.0).with_trends(0.0, 72.5),
        ]);

        let b = Bounds::of_series(&series).unwrap();
        assert_eq!(b.min_y, 70.0);
        assert_eq!(b.max_y, 74.0);
    }

    #[test]
    fn test_trend_only_sample_extends_x() {
        let series = TimeSeries::new(vec![
            Sample::new(at(1), 70.0),
            Sample::new(at(9), 0.0).with_trends(0.0, 71.0),
        ]);

        let b = Bounds::of_series(&series).unwrap();
        assert_eq!(b.end(), at(9));
        assert_eq!(b.span_days(), 8.0);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Bounds::of_series(&TimeSeries::default()).is_none());
        let blank = TimeSeries::new(vec![Sample::new(at(1), 0.0)]);
        assert!(Bounds::of_series(&blank).is_none());
    }

    #[test]
    fn test_single_point_widened() {
        let series = TimeSeries::new(vec![Sample::new(at(1), 70.0)]);
        let b = Bounds::of_series(&series).unwrap();
        assert!(b.is_degenerate());

        let widened = b.with_min_extent(1000.0, 1.0);
        assert!(!widened.is_degenerate());
        assert_eq!(widened.min_y, 69.0);
        assert_eq!(widened.max_y, 71.0);
        assert_eq!(widened.width(), 2000.0);
    }
}
