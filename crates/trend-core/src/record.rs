//! Wire records of the data feed and their conversion into [`TimeSeries`]
//!
//! The feed always carries kilograms; conversion to the display unit happens
//! while decoding.

use crate::{
    LONG_WINDOW_DAYS, MS_PER_DAY, SHORT_WINDOW_DAYS, Sample, TimeSeries, TrendResult, Unit,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One day of the smoothed feed. Missing fields decode as the sentinel `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Day", default)]
    pub day: f64,
    #[serde(rename = "FiveDay", default)]
    pub five_day: f64,
    #[serde(rename = "ThirtyDay", default)]
    pub thirty_day: f64,
}

impl From<DailyRecord> for Sample {
    fn from(r: DailyRecord) -> Self {
        Sample::new(r.date, r.day).with_trends(r.five_day, r.thirty_day)
    }
}

impl From<&Sample> for DailyRecord {
    fn from(s: &Sample) -> Self {
        Self {
            date: s.timestamp,
            day: s.raw,
            five_day: s.short,
            thirty_day: s.long,
        }
    }
}

/// A single raw weighing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Kgs")]
    pub kgs: f64,
}

impl WeightRecord {
    pub fn new(date: DateTime<Utc>, kgs: f64) -> Self {
        Self { date, kgs }
    }
}

/// Which feed the client consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedMode {
    /// Server-smoothed `{Date, Day, FiveDay, ThirtyDay}` records
    #[default]
    Daily,
    /// Raw `{Date, Kgs}` weighings, smoothed on the client
    Raw,
}

impl FeedMode {
    /// Endpoint path serving this feed
    pub fn path(&self) -> &'static str {
        match self {
            Self::Daily => "/data",
            Self::Raw => "/weights",
        }
    }

    /// Decode a feed body into a display-unit series
    pub fn decode(&self, body: &str, unit: Unit) -> TrendResult<TimeSeries> {
        match self {
            Self::Daily => decode_daily(body, unit),
            Self::Raw => decode_weights(body, unit),
        }
    }
}

/// Decode `{Date, Day, FiveDay, ThirtyDay}` records
pub fn decode_daily(body: &str, unit: Unit) -> TrendResult<TimeSeries> {
    let records: Vec<DailyRecord> = serde_json::from_str(body)?;
    let factor = unit.factor();

    Ok(records
        .into_iter()
        .map(|r| Sample::from(r).scaled(factor))
        .collect())
}

/// Decode `{Date, Kgs}` records and smooth them with the default windows
pub fn decode_weights(body: &str, unit: Unit) -> TrendResult<TimeSeries> {
    let weights: Vec<WeightRecord> = serde_json::from_str(body)?;

    Ok(weights_series(&weights)
        .smoothed(SHORT_WINDOW_DAYS, LONG_WINDOW_DAYS)
        .scaled(unit.factor()))
}

/// Raw weighings as a series (raw channel only)
pub fn weights_series(weights: &[WeightRecord]) -> TimeSeries {
    weights.iter().map(|w| Sample::new(w.date, w.kgs)).collect()
}

/// Start of a lookback window; `None` when `days <= 0` (everything)
pub fn lookback_start(days: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (days > 0).then(|| now - Duration::milliseconds(days * MS_PER_DAY))
}

/// Weighings inside the lookback window
pub fn weights_since(weights: &[WeightRecord], days: i64, now: DateTime<Utc>) -> Vec<WeightRecord> {
    let start = lookback_start(days, now);
    weights
        .iter()
        .filter(|w| start.is_none_or(|s| w.date >= s))
        .copied()
        .collect()
}

/// Smoothed daily records for the last `days` days (all history when
/// `days <= 0`), one per day through today.
///
/// The long window needs history before the visible range, so readings up to
/// `LONG_WINDOW_DAYS` before the start still feed the averages.
pub fn daily_export(weights: &[WeightRecord], days: i64, now: DateTime<Utc>) -> Vec<DailyRecord> {
    let start = lookback_start(days, now);
    let cutoff = start.map(|s| s - Duration::days(i64::from(LONG_WINDOW_DAYS)));

    let series: TimeSeries = weights
        .iter()
        .filter(|w| cutoff.is_none_or(|c| w.date >= c))
        .map(|w| Sample::new(w.date, w.kgs))
        .collect();

    let smoothed =
        series.smoothed_through(SHORT_WINDOW_DAYS, LONG_WINDOW_DAYS, Some(now.date_naive()));
    let visible = match start {
        Some(s) => smoothed.since(s),
        None => smoothed,
    };

    visible.iter().map(DailyRecord::from).collect()
}
