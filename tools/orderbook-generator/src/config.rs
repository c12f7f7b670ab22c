//! Generator configuration
//!
//! Every tunable of the synthetic book lives here. Defaults reproduce the
//! behavior of the dashboard demo; a JSON document can override any subset.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};

/// Configuration for the order book generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Levels per side when the caller does not ask for a depth
    pub default_levels: usize,
    /// Upper bound on requested levels per side
    pub max_levels: usize,
    /// Smallest quantity any level may carry
    pub quantity_floor: u64,
    /// Band around mid counted as market capacity, in basis points
    pub capacity_band_bps: u32,
    /// Decimal places of the price tick (4 = 0.0001)
    pub price_scale: u32,
    /// First price step away from the touch, in basis points of mid
    pub base_step_bps: f64,
    /// Linear growth of the step per level index
    pub step_growth: f64,
    /// Spread multiplier applied to tokenized instruments
    pub tokenized_spread_factor: f64,
    /// Base liquidity multiplier applied to tokenized instruments
    pub tokenized_liquidity_boost: f64,
    /// Exponential decay rate of liquidity for tokenized instruments
    pub tokenized_decay_rate: f64,
    /// Exponential decay rate of liquidity for traditional instruments
    pub traditional_decay_rate: f64,
    /// Half-width of the uniform spread jitter (0.2 = [0.8, 1.2])
    pub spread_jitter: f64,
    /// Half-width of the uniform quantity jitter
    pub quantity_jitter: f64,
    /// Session open, UTC hour
    pub trading_open_hour: u32,
    /// Session close, UTC hour (exclusive)
    pub trading_close_hour: u32,
    /// Hours either side of the session priced as the shoulder
    pub shoulder_hours: u32,
    /// Timestamp spacing of streamed updates
    pub update_interval_ms: i64,
    pub update_quantity_min: u64,
    pub update_quantity_max: u64,
    /// Probability that a streamed update is a removal
    pub remove_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_levels: 20,
            max_levels: 200,
            quantity_floor: 10_000,
            capacity_band_bps: 100,
            price_scale: 4,
            base_step_bps: 5.0,
            step_growth: 0.1,
            tokenized_spread_factor: 0.7,
            tokenized_liquidity_boost: 1.4,
            tokenized_decay_rate: 0.15,
            traditional_decay_rate: 0.25,
            spread_jitter: 0.2,
            quantity_jitter: 0.2,
            trading_open_hour: 8,
            trading_close_hour: 17,
            shoulder_hours: 2,
            update_interval_ms: 500,
            update_quantity_min: 50_000,
            update_quantity_max: 550_000,
            remove_probability: 0.3,
        }
    }
}

impl GeneratorConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        let config: Self = serde_json::from_str(json).map_err(|e| GeneratorError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break book invariants.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let invalid = |reason: String| Err(GeneratorError::InvalidConfig { reason });

        if self.max_levels == 0 {
            return invalid("max_levels must be positive".into());
        }
        if self.default_levels == 0 || self.default_levels > self.max_levels {
            return invalid(format!(
                "default_levels {} outside 1..={}",
                self.default_levels, self.max_levels
            ));
        }
        if self.quantity_floor == 0 {
            return invalid("quantity_floor must be positive".into());
        }
        if self.price_scale > 10 {
            return invalid(format!("price_scale {} exceeds 10", self.price_scale));
        }
        if !(self.base_step_bps.is_finite() && self.base_step_bps > 0.0) {
            return invalid("base_step_bps must be positive".into());
        }
        if !(self.step_growth.is_finite() && self.step_growth >= 0.0) {
            return invalid("step_growth must be non-negative".into());
        }
        for (name, value) in [
            ("tokenized_spread_factor", self.tokenized_spread_factor),
            ("tokenized_liquidity_boost", self.tokenized_liquidity_boost),
            ("tokenized_decay_rate", self.tokenized_decay_rate),
            ("traditional_decay_rate", self.traditional_decay_rate),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be positive"));
            }
        }
        for (name, value) in [
            ("spread_jitter", self.spread_jitter),
            ("quantity_jitter", self.quantity_jitter),
        ] {
            if !(0.0..1.0).contains(&value) {
                return invalid(format!("{name} {value} outside [0, 1)"));
            }
        }
        if !(0.0..=1.0).contains(&self.remove_probability) {
            return invalid(format!(
                "remove_probability {} outside [0, 1]",
                self.remove_probability
            ));
        }
        if self.trading_open_hour >= 24
            || self.trading_close_hour > 24
            || self.trading_open_hour >= self.trading_close_hour
        {
            return invalid(format!(
                "trading session {}..{} is not a valid UTC window",
                self.trading_open_hour, self.trading_close_hour
            ));
        }
        if self.update_interval_ms <= 0 {
            return invalid("update_interval_ms must be positive".into());
        }
        if self.update_quantity_min == 0 || self.update_quantity_min > self.update_quantity_max {
            return invalid(format!(
                "update quantity range {}..={} is empty",
                self.update_quantity_min, self.update_quantity_max
            ));
        }
        Ok(())
    }
}
