//! Tunable thresholds for the analytics engine.
//!
//! Every field has a default, so a `config.toml` only needs the keys it
//! overrides:
//!
//! ```toml
//! weekly_factor = "4.33"
//! portfolio_warning_ratio = "0.85"
//! max_insights = 3
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Average weeks per month used to normalize weekly items.
    pub weekly_factor: Decimal,
    /// Percentage change below which a trend is "stable".
    pub stable_band_pct: Decimal,
    /// Fractional band around the 3-month average that counts as "normal".
    pub average_band: Decimal,
    /// Seasonal deviation (percent) below which spend is typical.
    pub seasonal_typical_pct: Decimal,
    /// Actual progress must reach this fraction of expected progress.
    pub on_track_tolerance: Decimal,
    /// Total spend / total budget ratio that triggers the portfolio warning.
    pub portfolio_warning_ratio: Decimal,
    pub overall_change_pct: Decimal,
    pub category_change_pct: Decimal,
    /// Categories spending less than this are ignored for swing insights.
    pub category_noise_floor: Decimal,
    pub savings_rate_good_pct: Decimal,
    pub savings_rate_low_pct: Decimal,
    pub dominant_category_pct: Decimal,
    pub max_insights: usize,
    pub recent_contribution_months: u32,
    /// Emit explicit zero entries from the aggregator instead of dropping them.
    pub keep_zero_totals: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weekly_factor: Decimal::new(433, 2),
            stable_band_pct: Decimal::from(5),
            average_band: Decimal::new(1, 1),
            seasonal_typical_pct: Decimal::from(25),
            on_track_tolerance: Decimal::new(9, 1),
            portfolio_warning_ratio: Decimal::new(9, 1),
            overall_change_pct: Decimal::from(5),
            category_change_pct: Decimal::from(15),
            category_noise_floor: Decimal::from(50),
            savings_rate_good_pct: Decimal::from(20),
            savings_rate_low_pct: Decimal::from(10),
            dominant_category_pct: Decimal::from(40),
            max_insights: 5,
            recent_contribution_months: 6,
            keep_zero_totals: false,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load overrides from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
