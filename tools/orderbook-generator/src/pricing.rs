//! Spread and liquidity model
//!
//! Pure functions behind the synthetic book: rating tiers set the base
//! spread and step width, issue size sets depth, tokenization narrows the
//! spread and slows the liquidity decay, the trading session widens quotes
//! off-hours.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::instrument::InstrumentRef;
use types::rating::RatingTier;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::random::RandomSource;

/// Issue size at which the market-cap factor is neutral.
const REFERENCE_MARKET_CAP: f64 = 1_000_000_000.0;

const MARKET_CAP_FACTOR_MIN: f64 = 0.5;
const MARKET_CAP_FACTOR_MAX: f64 = 2.0;

const SHOULDER_FACTOR: f64 = 1.2;
const AFTER_HOURS_FACTOR: f64 = 1.5;

/// Base spread per tier, in price units.
const BASE_SPREADS: [(RatingTier, f64); 5] = [
    (RatingTier::Aaa, 0.02),
    (RatingTier::Aa, 0.04),
    (RatingTier::A, 0.06),
    (RatingTier::Bbb, 0.10),
    (RatingTier::Bb, 0.25),
];

/// Price step width multiplier per tier.
const STEP_MULTIPLIERS: [(RatingTier, f64); 5] = [
    (RatingTier::Aaa, 1.0),
    (RatingTier::Aa, 1.15),
    (RatingTier::A, 1.3),
    (RatingTier::Bbb, 1.6),
    (RatingTier::Bb, 2.0),
];

/// Base liquidity per level by minimum issue size, largest first.
const LIQUIDITY_TIERS: [(f64, f64); 5] = [
    (5_000_000_000.0, 5_000_000.0),
    (1_000_000_000.0, 2_500_000.0),
    (500_000_000.0, 1_500_000.0),
    (100_000_000.0, 800_000.0),
    (0.0, 400_000.0),
];

fn lookup(table: &[(RatingTier, f64)], tier: RatingTier) -> f64 {
    table
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, v)| *v)
        .unwrap_or(table[table.len() - 1].1)
}

/// Base spread for a rating tier.
pub fn base_spread(tier: RatingTier) -> f64 {
    lookup(&BASE_SPREADS, tier)
}

/// Step width multiplier for a rating tier; lower ratings step wider.
pub fn step_multiplier(tier: RatingTier) -> f64 {
    lookup(&STEP_MULTIPLIERS, tier)
}

/// Inverse issue-size factor, clamped to `[0.5, 2.0]`.
pub fn market_cap_factor(market_cap: f64) -> f64 {
    if !(market_cap.is_finite() && market_cap > 0.0) {
        return MARKET_CAP_FACTOR_MAX;
    }
    (REFERENCE_MARKET_CAP / market_cap).clamp(MARKET_CAP_FACTOR_MIN, MARKET_CAP_FACTOR_MAX)
}

/// Spread widening by time of day: 1.0 in session, 1.2 on the shoulders,
/// 1.5 overnight and at weekends.
pub fn session_factor(at: DateTime<Utc>, config: &GeneratorConfig) -> f64 {
    if matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
        return AFTER_HOURS_FACTOR;
    }
    let hour = at.hour() as i64;
    let open = config.trading_open_hour as i64;
    let close = config.trading_close_hour as i64;
    let shoulder = config.shoulder_hours as i64;

    if hour >= open && hour < close {
        1.0
    } else if hour >= open - shoulder && hour < close + shoulder {
        SHOULDER_FACTOR
    } else {
        AFTER_HOURS_FACTOR
    }
}

/// Spread before jitter: tier base, issue size, tokenization, session.
pub fn deterministic_spread(
    instrument: &InstrumentRef,
    at: DateTime<Utc>,
    config: &GeneratorConfig,
) -> Result<f64, GeneratorError> {
    let market_cap = to_f64(instrument.market_cap, "market cap")?;
    let mut spread = base_spread(instrument.rating.tier()) * market_cap_factor(market_cap);
    if instrument.is_tokenized {
        spread *= config.tokenized_spread_factor;
    }
    Ok(spread * session_factor(at, config))
}

/// Full dynamic spread including uniform jitter in `[1 - j, 1 + j)`.
pub fn dynamic_spread<R: RandomSource + ?Sized>(
    instrument: &InstrumentRef,
    at: DateTime<Utc>,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<f64, GeneratorError> {
    let spread = deterministic_spread(instrument, at, config)?
        * rng.range(1.0 - config.spread_jitter, 1.0 + config.spread_jitter);
    if spread.is_finite() {
        Ok(spread)
    } else {
        Err(GeneratorError::NonFinite { quantity: "spread" })
    }
}

/// Liquidity at the touch for an issue, before decay.
pub fn base_liquidity(market_cap: f64, is_tokenized: bool, config: &GeneratorConfig) -> f64 {
    let base = LIQUIDITY_TIERS
        .iter()
        .find(|(min_cap, _)| market_cap >= *min_cap)
        .map(|(_, liquidity)| *liquidity)
        .unwrap_or(LIQUIDITY_TIERS[LIQUIDITY_TIERS.len() - 1].1);
    if is_tokenized {
        base * config.tokenized_liquidity_boost
    } else {
        base
    }
}

/// Decay rate: tokenized books are deeper.
pub fn decay_rate(is_tokenized: bool, config: &GeneratorConfig) -> f64 {
    if is_tokenized {
        config.tokenized_decay_rate
    } else {
        config.traditional_decay_rate
    }
}

/// `base × exp(−distance × 100 × decay)`, distance as a fraction of mid.
pub fn decayed_liquidity(base: f64, distance: f64, decay: f64) -> f64 {
    base * (-distance.abs() * 100.0 * decay).exp()
}

/// Smallest price increment for a scale.
pub fn tick(scale: u32) -> Decimal {
    Decimal::new(1, scale)
}

/// Round a positive price distance to the tick, never below one tick.
pub fn to_ticks(value: f64, scale: u32, quantity: &'static str) -> Result<Decimal, GeneratorError> {
    let decimal = Decimal::from_f64(value).ok_or(GeneratorError::NonFinite { quantity })?;
    Ok(decimal.round_dp(scale).max(tick(scale)))
}

/// Decimal to f64 for the stochastic parts of the model.
pub fn to_f64(value: Decimal, quantity: &'static str) -> Result<f64, GeneratorError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(GeneratorError::NonFinite { quantity })
}
