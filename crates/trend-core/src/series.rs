//! Time series of daily weight samples
//!
//! Bucketing, moving averages and interpolation. Every operation returns a
//! new [`TimeSeries`]; instances are never mutated after construction.

use crate::{Channel, Sample, day_start};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Samples ordered by timestamp, ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series; samples are sorted (stable) by timestamp
    pub fn new(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Samples at or after `start`
    pub fn since(&self, start: DateTime<Utc>) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .filter(|s| s.timestamp >= start)
                .copied()
                .collect(),
        }
    }

    /// Every channel multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            samples: self.samples.iter().map(|s| s.scaled(factor)).collect(),
        }
    }

    // ========================================================================
    // Bucketing & smoothing
    // ========================================================================

    /// Mean raw value per UTC calendar day
    fn daily_means(&self) -> BTreeMap<NaiveDate, f64> {
        let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for sample in &self.samples {
            let entry = sums.entry(sample.day()).or_insert((0.0, 0));
            entry.0 += sample.raw;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(day, (sum, count))| (day, sum / count as f64))
            .collect()
    }

    /// One sample per calendar day holding the mean of that day's raw values.
    /// Days without samples are absent.
    pub fn bucket_by_day(&self) -> Self {
        Self {
            samples: self
                .daily_means()
                .into_iter()
                .map(|(day, mean)| Sample::new(day_start(day), mean))
                .collect(),
        }
    }

    /// Trailing moving average over a continuous day axis.
    ///
    /// Walks every day from the first to the last bucketed day. A day is
    /// emitted only if at least `min_coverage` days of its window have data
    /// (default `floor(window_days * 3 / 4)`). The mean is stored in the raw
    /// channel of the output.
    pub fn moving_average(&self, window_days: u32, min_coverage: Option<usize>) -> Self {
        let days = self.daily_means();
        let (Some(&first), Some(&last)) = (days.keys().next(), days.keys().next_back()) else {
            return Self::default();
        };

        Self {
            samples: window_means(&days, window_days, min_coverage, first, last)
                .into_iter()
                .map(|(day, mean)| Sample::new(day_start(day), mean))
                .collect(),
        }
    }

    /// Daily series with all three channels filled: the bucketed mean and
    /// both moving averages, `0.0` where a channel is undefined.
    pub fn smoothed(&self, short_window: u32, long_window: u32) -> Self {
        self.smoothed_through(short_window, long_window, None)
    }

    /// Like [`TimeSeries::smoothed`], extending the day walk up to `through`
    /// when it lies after the last bucketed day.
    pub fn smoothed_through(
        &self,
        short_window: u32,
        long_window: u32,
        through: Option<NaiveDate>,
    ) -> Self {
        let days = self.daily_means();
        let (Some(&first), Some(&last_bucket)) = (days.keys().next(), days.keys().next_back())
        else {
            return Self::default();
        };
        let last = through.map_or(last_bucket, |t| t.max(last_bucket));

        let short: BTreeMap<_, _> = window_means(&days, short_window, None, first, last)
            .into_iter()
            .collect();
        let long: BTreeMap<_, _> = window_means(&days, long_window, None, first, last)
            .into_iter()
            .collect();

        Self {
            samples: first
                .iter_days()
                .take_while(|day| *day <= last)
                .map(|day| {
                    Sample::new(day_start(day), days.get(&day).copied().unwrap_or(0.0)).with_trends(
                        short.get(&day).copied().unwrap_or(0.0),
                        long.get(&day).copied().unwrap_or(0.0),
                    )
                })
                .collect(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Interpolated channel value at an instant. See [`TimeSeries::value_at_x`].
    pub fn value_at(&self, channel: Channel, at: DateTime<Utc>) -> f64 {
        self.value_at_x(channel, at.timestamp_millis() as f64)
    }

    /// Piecewise-linear interpolation at `x` (epoch milliseconds).
    ///
    /// Only samples with a reading in `channel` are considered. Returns `0.0`
    /// unless there is a sample at-or-before and one at-or-after `x`; never
    /// extrapolates.
    pub fn value_at_x(&self, channel: Channel, x: f64) -> f64 {
        let mut left: Option<(f64, f64)> = None;
        let mut right: Option<(f64, f64)> = None;

        for sample in &self.samples {
            let Some(value) = sample.reading(channel) else {
                continue;
            };
            let t = sample.x();
            if t <= x {
                left = Some((t, value));
            }
            if t >= x {
                right = Some((t, value));
                break;
            }
        }

        match (left, right) {
            (Some((t0, v0)), Some((t1, _))) if t0 == t1 => v0,
            (Some((t0, v0)), Some((t1, v1))) => v0 + (x - t0) / (t1 - t0) * (v1 - v0),
            _ => 0.0,
        }
    }

    /// Plottable `(epoch-ms, value)` pairs for a channel, in series order.
    /// Sentinel entries are skipped unless `include_zero` is set.
    pub fn points_for(
        &self,
        channel: Channel,
        include_zero: bool,
    ) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.samples
            .iter()
            .filter(move |s| include_zero || s.reading(channel).is_some())
            .map(move |s| (s.x(), s.value(channel)))
    }
}

impl FromIterator<Sample> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Default coverage threshold for a window: `floor(window * 3 / 4)`
pub fn default_coverage(window_days: u32) -> usize {
    window_days as usize * 3 / 4
}

/// Trailing-window means for every day in `first..=last`. Days whose mean
/// is the sentinel do not count toward coverage.
fn window_means(
    days: &BTreeMap<NaiveDate, f64>,
    window_days: u32,
    min_coverage: Option<usize>,
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<(NaiveDate, f64)> {
    if window_days == 0 {
        return Vec::new();
    }
    let min_coverage = min_coverage.unwrap_or_else(|| default_coverage(window_days));
    let lookback = Days::new(u64::from(window_days - 1));

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter_map(|day| {
            let window_start = day.checked_sub_days(lookback).unwrap_or(NaiveDate::MIN);
            let (sum, count) = days
                .range(window_start..=day)
                .filter(|(_, v)| **v != 0.0)
                .fold((0.0, 0usize), |(sum, count), (_, v)| (sum + v, count + 1));

            (count > 0 && count >= min_coverage).then(|| (day, sum / count as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    /// Two readings on March 3rd, then one per day through March 7th
    fn fixture() -> TimeSeries {
        let times = [at(3, 4), at(3, 5), at(4, 0), at(5, 0), at(6, 0), at(7, 0)];
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Sample::new(t, i as f64))
            .collect()
    }

    #[test]
    fn test_new_sorts_samples() {
        let series = TimeSeries::new(vec![Sample::new(at(5, 0), 2.0), Sample::new(at(4, 0), 1.0)]);
        assert_eq!(series.first().map(|s| s.raw), Some(1.0));
        assert_eq!(series.last().map(|s| s.raw), Some(2.0));
    }

    #[test]
    fn test_bucket_by_day_merges_same_day() {
        let byday = fixture().bucket_by_day();
        assert_eq!(byday.len(), 5);

        let first = byday.first().unwrap();
        assert_eq!(first.timestamp, at(3, 0));
        assert_relative_eq!(first.raw, 0.5);

        let values: Vec<f64> = byday.iter().map(|s| s.raw).collect();
        assert_eq!(values, vec![0.5, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_moving_average_coverage() {
        let avg = fixture().moving_average(5, None);
        assert_eq!(avg.len(), 3);

        let days: Vec<u32> = avg.iter().map(|s| chrono::Datelike::day(&s.day())).collect();
        assert_eq!(days, vec![5, 6, 7]);

        assert_relative_eq!(avg.samples()[0].raw, (0.5 + 2.0 + 3.0) / 3.0);
        assert_relative_eq!(avg.samples()[2].raw, (0.5 + 2.0 + 3.0 + 4.0 + 5.0) / 5.0);
    }

    #[test]
    fn test_moving_average_explicit_coverage() {
        assert_eq!(fixture().moving_average(5, Some(1)).len(), 5);
        assert_eq!(fixture().moving_average(5, Some(5)).len(), 1);
        assert_eq!(fixture().moving_average(5, Some(6)).len(), 0);
    }

    #[test]
    fn test_moving_average_walks_gap_days() {
        let series: TimeSeries = [at(1, 9), at(4, 9)]
            .iter()
            .map(|&t| Sample::new(t, 80.0))
            .collect();
        let avg = series.moving_average(3, Some(1));

        // Days 1..=4, all covered by at least one reading
        assert_eq!(avg.len(), 4);
        assert_eq!(avg.samples()[2].timestamp, at(3, 0));
        assert_relative_eq!(avg.samples()[2].raw, 80.0);
    }

    #[test]
    fn test_moving_average_empty() {
        assert!(TimeSeries::default().moving_average(5, None).is_empty());
        assert!(TimeSeries::default().bucket_by_day().is_empty());
        assert!(fixture().moving_average(0, None).is_empty());
    }

    #[test]
    fn test_moving_average_ignores_zero_days() {
        let series = TimeSeries::new(vec![
            Sample::new(at(1, 8), 80.0),
            Sample::new(at(2, 8), 0.0),
            Sample::new(at(3, 8), 80.0),
            Sample::new(at(4, 8), 80.0),
        ]);
        let avg = series.moving_average(3, None);

        // March 2nd has only one real day in its window, so it falls below
        // the coverage of 2; later windows average the real days only
        let days: Vec<u32> = avg.iter().map(|s| chrono::Datelike::day(&s.day())).collect();
        assert_eq!(days, vec![3, 4]);
        assert!(avg.iter().all(|s| s.raw == 80.0));
    }

    #[test]
    fn test_smoothed_fills_every_day() {
        let smoothed = fixture().smoothed(5, 30);
        assert_eq!(smoothed.len(), 5);

        let last = smoothed.last().unwrap();
        assert_relative_eq!(last.raw, 5.0);
        assert_relative_eq!(last.short, 14.5 / 5.0);
        // 5 days of data never reach the 22-day coverage of a 30-day window
        assert_eq!(last.long, 0.0);
        assert_eq!(smoothed.first().unwrap().short, 0.0);
    }

    #[test]
    fn test_smoothed_through_extends_day_walk() {
        let through = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let smoothed = fixture().smoothed_through(5, 30, Some(through));
        assert_eq!(smoothed.len(), 7);

        let last = smoothed.last().unwrap();
        assert_eq!(last.raw, 0.0);
        // March 5..9 window holds three days of data
        assert_relative_eq!(last.short, (3.0 + 4.0 + 5.0) / 3.0);
    }

    #[test]
    fn test_value_at_exact_on_samples() {
        let series = fixture().bucket_by_day();
        assert_eq!(series.value_at(Channel::Raw, at(4, 0)), 2.0);
        assert_eq!(series.value_at(Channel::Raw, at(7, 0)), 5.0);
    }

    #[test]
    fn test_value_at_interpolates() {
        let series = fixture().bucket_by_day();
        assert_relative_eq!(series.value_at(Channel::Raw, at(4, 6)), 2.25);
        assert_relative_eq!(series.value_at(Channel::Raw, at(6, 12)), 4.5);
    }

    #[test]
    fn test_value_at_never_extrapolates() {
        let series = fixture().bucket_by_day();
        assert_eq!(series.value_at(Channel::Raw, at(2, 0)), 0.0);
        assert_eq!(series.value_at(Channel::Raw, at(7, 1)), 0.0);
        assert_eq!(TimeSeries::default().value_at(Channel::Raw, at(5, 0)), 0.0);
    }

    #[test]
    fn test_value_at_skips_sentinel() {
        let series = TimeSeries::new(vec![
            Sample::new(at(1, 0), 0.0).with_trends(10.0, 0.0),
            Sample::new(at(2, 0), 0.0).with_trends(0.0, 0.0),
            Sample::new(at(3, 0), 0.0).with_trends(20.0, 0.0),
        ]);

        assert_relative_eq!(series.value_at(Channel::Short, at(2, 0)), 15.0);
        assert_eq!(series.value_at(Channel::Long, at(2, 0)), 0.0);
    }

    #[test]
    fn test_points_for_restartable() {
        let series = TimeSeries::new(vec![
            Sample::new(at(1, 0), 70.0),
            Sample::new(at(2, 0), 0.0),
            Sample::new(at(3, 0), 71.0),
        ]);

        let points = series.points_for(Channel::Raw, false);
        assert_eq!(points.clone().count(), 2);
        assert_eq!(points.map(|(_, y)| y).collect::<Vec<_>>(), vec![70.0, 71.0]);

        let all: Vec<_> = series.points_for(Channel::Raw, true).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1], (at(2, 0).timestamp_millis() as f64, 0.0));
    }

    #[test]
    fn test_since() {
        let series = fixture().bucket_by_day().since(at(5, 0));
        assert_eq!(series.len(), 3);
    }

    fn arbitrary_series() -> impl Strategy<Value = Vec<(u64, u32, f64)>> {
        prop::collection::vec((0u64..60, 0u32..24, 1.0f64..200.0), 0..120)
    }

    fn build(readings: &[(u64, u32, f64)]) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        readings
            .iter()
            .map(|&(offset, hour, value)| {
                let day = base + Days::new(offset);
                Sample::new(day.and_hms_opt(hour, 0, 0).unwrap().and_utc(), value)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_bucket_one_entry_per_day_with_mean(readings in arbitrary_series()) {
            let series = build(&readings);
            let byday = series.bucket_by_day();

            let mut days: Vec<NaiveDate> = byday.iter().map(|s| s.day()).collect();
            let n = days.len();
            days.dedup();
            prop_assert_eq!(days.len(), n);

            for bucket in byday.iter() {
                let values: Vec<f64> = series
                    .iter()
                    .filter(|s| s.day() == bucket.day())
                    .map(|s| s.raw)
                    .collect();
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                prop_assert!((bucket.raw - mean).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_moving_average_emits_exactly_covered_days(readings in arbitrary_series(), window in 1u32..31) {
            let series = build(&readings);
            let byday = series.bucket_by_day();
            let avg = series.moving_average(window, None);
            let present: Vec<NaiveDate> = byday.iter().map(|s| s.day()).collect();

            let expected: Vec<NaiveDate> = match (present.first(), present.last()) {
                (Some(&first), Some(&last)) => first
                    .iter_days()
                    .take_while(|day| *day <= last)
                    .filter(|&day| {
                        let start = day.checked_sub_days(Days::new(u64::from(window - 1))).unwrap();
                        let count = present.iter().filter(|d| **d >= start && **d <= day).count();
                        count > 0 && count >= default_coverage(window)
                    })
                    .collect(),
                _ => Vec::new(),
            };

            let emitted: Vec<NaiveDate> = avg.iter().map(|s| s.day()).collect();
            prop_assert_eq!(emitted, expected);
        }
    }
}
