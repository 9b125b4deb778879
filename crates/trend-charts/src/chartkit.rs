//! # chartkit
//!
//! Core chart primitives: linear scale, path builders, label formatters.

use chrono::{DateTime, Utc};
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// `count` evenly spaced domain values from the minimum, excluding the maximum
    fn steps(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        // Zero-width domain: everything lands mid-range
        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn steps(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count == 0 {
            return Vec::new();
        }

        let step = (max - min) / count as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Straight segments between consecutive points
#[derive(Debug, Clone, Copy, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        rest.iter()
            .fold(PathBuilder::with_capacity(points.len()).move_to(x, y), |b, &(x, y)| {
                b.line_to(x, y)
            })
            .build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    /// Builder sized for `points` commands
    pub fn with_capacity(points: usize) -> Self {
        Self {
            commands: String::with_capacity(points * 20),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Date gridline label: `"5 Mar 2024"` with the day, `"Mar 2024"` without
pub fn format_date_label(date: DateTime<Utc>, with_day: bool) -> String {
    if with_day {
        date.format("%-d %b %Y").to_string()
    } else {
        date.format("%b %Y").to_string()
    }
}

/// Long date for tooltips and the cursor readout, e.g. `"Tue Mar 05 2024"`
pub fn format_day(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

// ============================================================================
// TESTS
// ============================================================================
