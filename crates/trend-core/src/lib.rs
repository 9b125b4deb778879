//! # trend-core
//!
//! Core domain types for the weight trend dashboard.
//! Daily bucketing, moving-average smoothing and interpolation live in
//! [`series`]; the wire format of the data feed lives in [`record`].

pub mod bounds;
pub mod error;
pub mod record;
pub mod series;

pub use bounds::*;
pub use error::*;
pub use record::*;
pub use series::*;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one calendar day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Default smoothing windows (days)
pub const SHORT_WINDOW_DAYS: u32 = 5;
pub const LONG_WINDOW_DAYS: u32 = 30;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for value formatting (axis labels, cursor readout)
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed number of decimals
#[derive(Debug, Clone)]
pub struct FixedDecimalFormatter {
    pub decimals: usize,
}

impl Default for FixedDecimalFormatter {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

impl ValueFormatter for FixedDecimalFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Selects one value of a [`Sample`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Mean of the readings taken that day
    #[serde(rename = "Day")]
    Raw,
    /// Short moving average (5 days)
    #[serde(rename = "FiveDay")]
    Short,
    /// Long moving average (30 days)
    #[serde(rename = "ThirtyDay")]
    Long,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Raw => "Day",
            Self::Short => "5-Day",
            Self::Long => "30-Day",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Raw => colors::MARKER,
            Self::Short => colors::SHORT_TREND,
            Self::Long => colors::LONG_TREND,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Raw, Self::Short, Self::Long]
    }

    /// Channels drawn as connected trend lines
    pub fn trends() -> &'static [Self] {
        &[Self::Short, Self::Long]
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One point of a time series.
///
/// `0.0` in any channel means "no reading". A genuine zero weight cannot be
/// represented; [`Sample::reading`] gives the `Option` view of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub raw: f64,
    pub short: f64,
    pub long: f64,
}

impl Sample {
    /// Sample carrying only a raw reading
    pub fn new(timestamp: DateTime<Utc>, raw: f64) -> Self {
        Self {
            timestamp,
            raw,
            short: 0.0,
            long: 0.0,
        }
    }

    pub fn with_trends(mut self, short: f64, long: f64) -> Self {
        self.short = short;
        self.long = long;
        self
    }

    /// Channel value, sentinel included
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Raw => self.raw,
            Channel::Short => self.short,
            Channel::Long => self.long,
        }
    }

    /// Channel value with the sentinel mapped to `None`
    pub fn reading(&self, channel: Channel) -> Option<f64> {
        let v = self.value(channel);
        (v != 0.0).then_some(v)
    }

    /// True when no channel carries a reading
    pub fn is_blank(&self) -> bool {
        Channel::all().iter().all(|&c| self.reading(c).is_none())
    }

    /// Epoch milliseconds, the numeric x coordinate used for plotting
    pub fn x(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64
    }

    /// UTC calendar day of the sample
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Same sample with every channel multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            timestamp: self.timestamp,
            raw: self.raw * factor,
            short: self.short * factor,
            long: self.long * factor,
        }
    }
}

/// Display unit for weights. The feed is always in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    Kg,
    #[default]
    Lb,
}

impl Unit {
    /// Kilograms in one pound
    pub const KG_PER_LB: f64 = 0.45359237;

    /// Multiplier applied to kilogram values
    pub fn factor(&self) -> f64 {
        match self {
            Self::Kg => 1.0,
            Self::Lb => 1.0 / Self::KG_PER_LB,
        }
    }

    pub fn from_kg_flag(kg: bool) -> Self {
        if kg { Self::Kg } else { Self::Lb }
    }

    pub fn is_kg(&self) -> bool {
        matches!(self, Self::Kg)
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Kg => Self::Lb,
            Self::Lb => Self::Kg,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lb => "lb",
        }
    }
}

/// Midnight UTC of a calendar day
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Instant from epoch milliseconds (clamped to the representable range)
pub fn instant_from_millis(ms: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms.round() as i64).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const MARKER: &str = "green";
    pub const SHORT_TREND: &str = "gold";
    pub const LONG_TREND: &str = "plum";
    pub const VALUE_GRID: &str = "#C0C0C0";
    pub const DATE_GRID: &str = "#F0F0F0";
    pub const CURSOR: &str = "#C0C0C0";
    pub const TEXT: &str = "#333333";
    pub const ERROR: &str = "#ef4444";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sentinel_reading() {
        let s = Sample::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(), 80.0)
            .with_trends(0.0, 79.5);
        assert_eq!(s.reading(Channel::Raw), Some(80.0));
        assert_eq!(s.reading(Channel::Short), None);
        assert_eq!(s.reading(Channel::Long), Some(79.5));
        assert!(!s.is_blank());
    }

    #[test]
    fn test_true_zero_is_indistinguishable_from_missing() {
        // Known limitation: zero is the "no reading" marker.
        let s = Sample::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 0.0);
        assert_eq!(s.reading(Channel::Raw), None);
        assert!(s.is_blank());
    }

    #[test]
    fn test_unit_factor() {
        assert_eq!(Unit::Kg.factor(), 1.0);
        let lb = 100.0 * Unit::Lb.factor();
        assert!((lb - 220.462_262_18).abs() < 1e-6);
        assert_eq!(Unit::from_kg_flag(false), Unit::Lb);
        assert_eq!(Unit::Lb.toggle(), Unit::Kg);
    }

    #[test]
    fn test_decimal_formatter() {
        let f = FixedDecimalFormatter::default();
        assert_eq!(f.format(81.26), "81.3");
        assert_eq!(f.format(-0.04), "-0.0");
    }

    #[test]
    fn test_day_start() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(day_start(day), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }
}
