//! # trend-components
//!
//! Dashboard layout and controls. Controls change the [`ChartConfig`],
//! record it in the page URL and start a new load.
//!
//! [`ChartConfig`]: trend_state::ChartConfig

pub mod controls;
pub mod dashboard;
pub mod navigation;

pub use controls::*;
pub use dashboard::*;
pub use navigation::*;
