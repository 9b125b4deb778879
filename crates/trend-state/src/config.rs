//! Chart configuration and its page query-string form

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use trend_core::{FeedMode, TrendError, TrendResult, Unit};

/// Default lookback window (days)
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Lookback choices offered by the range picker; `0` shows all history
pub const LOOKBACK_PRESETS: &[(u32, &str)] = &[
    (14, "2W"),
    (30, "1M"),
    (90, "3M"),
    (365, "1Y"),
    (730, "2Y"),
    (0, "All"),
];

/// Everything a data load depends on. Passed explicitly to the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Days of history to show; `0` means all
    pub lookback_days: u32,
    pub unit: Unit,
    pub user_id: Option<String>,
    pub mode: FeedMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            unit: Unit::default(),
            user_id: None,
            mode: FeedMode::default(),
        }
    }
}

impl ChartConfig {
    pub fn with_lookback(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user_id = Some(user.into());
        self
    }

    pub fn with_mode(mut self, mode: FeedMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse a page query string (`days`, `user`, `kg`, `raw`), with or
    /// without the leading `?`. Unknown parameters are ignored; the first
    /// malformed one is an error.
    pub fn from_query(query: &str) -> TrendResult<Self> {
        let (config, mut errors) = Self::parse_query(query);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors.swap_remove(0))
        }
    }

    /// Lenient form of [`from_query`](Self::from_query): a malformed
    /// parameter keeps its default and is reported, the rest still apply.
    pub fn parse_query(query: &str) -> (Self, Vec<TrendError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if let Err(err) = config.apply_param(key, value) {
                errors.push(err);
            }
        }

        (config, errors)
    }

    fn apply_param(&mut self, key: &str, value: &str) -> TrendResult<()> {
        let value = decode(value)?;
        match key {
            "days" => {
                self.lookback_days = value.parse().map_err(|_| {
                    TrendError::InvalidQuery(format!("days must be a non-negative integer, got `{value}`"))
                })?;
            }
            "user" if !value.is_empty() => self.user_id = Some(value.into_owned()),
            "kg" => self.unit = Unit::from_kg_flag(is_flag_set(&value)),
            "raw" if is_flag_set(&value) => self.mode = FeedMode::Raw,
            _ => {}
        }
        Ok(())
    }

    /// Page query string, without the leading `?`
    pub fn to_query(&self) -> String {
        let mut params = vec![format!("days={}", self.lookback_days)];
        if let Some(user) = &self.user_id {
            params.push(format!("user={}", urlencoding::encode(user)));
        }
        if self.unit.is_kg() {
            params.push("kg=1".to_string());
        }
        if self.mode == FeedMode::Raw {
            params.push("raw=1".to_string());
        }
        params.join("&")
    }

    /// Feed path with the server-side parameters. Unit conversion happens on
    /// the client, so `kg` is not sent.
    pub fn data_path(&self) -> String {
        let mut path = format!("{}?days={}", self.mode.path(), self.lookback_days);
        if let Some(user) = &self.user_id {
            path.push_str("&user=");
            path.push_str(&urlencoding::encode(user));
        }
        path
    }
}

fn decode(value: &str) -> TrendResult<Cow<'_, str>> {
    urlencoding::decode(value).map_err(|e| TrendError::InvalidQuery(e.to_string()))
}

/// A bare flag (`?kg`) or any value other than `0`/`false` turns it on
fn is_flag_set(value: &str) -> bool {
    !matches!(value, "0" | "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::from_query("").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.lookback_days, 365);
        assert_eq!(config.unit, Unit::Lb);
        assert_eq!(config.mode, FeedMode::Daily);
    }

    #[test]
    fn test_parse_all_params() {
        let config = ChartConfig::from_query("?days=30&user=ann%20b&kg&raw=1&theme=dark").unwrap();
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.user_id.as_deref(), Some("ann b"));
        assert_eq!(config.unit, Unit::Kg);
        assert_eq!(config.mode, FeedMode::Raw);
    }

    #[test]
    fn test_false_flags() {
        let config = ChartConfig::from_query("kg=false&raw=0&user=").unwrap();
        assert_eq!(config.unit, Unit::Lb);
        assert_eq!(config.mode, FeedMode::Daily);
        assert_eq!(config.user_id, None);
    }

    #[test]
    fn test_invalid_days() {
        assert!(matches!(
            ChartConfig::from_query("days=-3"),
            Err(TrendError::InvalidQuery(_))
        ));
        assert!(ChartConfig::from_query("days=lots").is_err());
    }

    #[test]
    fn test_bad_days_keeps_other_params() {
        let (config, errors) = ChartConfig::parse_query("?days=abc&user=sam&kg=1");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("abc"));
        assert_eq!(config.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(config.user_id.as_deref(), Some("sam"));
        assert_eq!(config.unit, Unit::Kg);
    }

    #[test]
    fn test_query_round_trip() {
        let config = ChartConfig::default()
            .with_lookback(90)
            .with_user("j&k")
            .with_unit(Unit::Kg)
            .with_mode(FeedMode::Raw);

        let query = config.to_query();
        assert_eq!(query, "days=90&user=j%26k&kg=1&raw=1");
        assert_eq!(ChartConfig::from_query(&query).unwrap(), config);
    }

    #[test]
    fn test_data_path() {
        let config = ChartConfig::default().with_lookback(0).with_unit(Unit::Kg);
        assert_eq!(config.data_path(), "/data?days=0");

        let config = config.with_user("sam").with_mode(FeedMode::Raw);
        assert_eq!(config.data_path(), "/weights?days=0&user=sam");
    }
}
