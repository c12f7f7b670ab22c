//! Order book analytics
//!
//! Derived metrics over a snapshot: spread, depth inside fixed bands around
//! mid, volume imbalance, top-of-book pressure and a bounded liquidity
//! score. Pure functions; no randomness.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::book::{OrderBookLevel, OrderBookSnapshot};

/// Bands reported in `MarketDepth`, in basis points.
pub const DEPTH_BANDS_BPS: [u32; 3] = [50, 100, 200];

/// Distance floor for the pressure index; a level sitting on mid saturates
/// instead of dividing by zero.
const MIN_DISTANCE: f64 = 1e-9;

const MAX_SPREAD_PENALTY: f64 = 30.0;
const MAX_DEPTH_BONUS: f64 = 20.0;

/// Cumulative volume within fixed bands of mid, both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDepth {
    pub bps50: u64,
    pub bps100: u64,
    pub bps200: u64,
}

/// Analytics derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookMetrics {
    pub spread: Decimal,
    pub spread_bps: f64,
    pub market_depth: MarketDepth,
    /// `(bid − ask) / (bid + ask)` total volume, in `[-1, 1]`.
    pub imbalance: f64,
    /// Top-of-book weight by inverse distance from mid, in `[-1, 1]`.
    pub pressure_index: f64,
    /// In `[0, 100]`.
    pub liquidity_score: f64,
}

/// Volume on `levels` whose price lies within `bps` of `mid`.
pub fn depth_within_bps(levels: &[OrderBookLevel], mid: Decimal, bps: u32) -> u64 {
    let limit = mid.abs() * Decimal::from(bps) / Decimal::from(10_000);
    levels
        .iter()
        .filter(|l| (l.price.as_decimal() - mid).abs() <= limit)
        .map(|l| l.quantity)
        .fold(0u64, u64::saturating_add)
}

/// Compute analytics for a snapshot.
pub fn calculate_order_book_metrics(snapshot: &OrderBookSnapshot) -> OrderBookMetrics {
    let mid = snapshot.mid_price.as_decimal();

    let (spread, spread_bps) = match (snapshot.best_bid(), snapshot.best_ask()) {
        (Some(bid), Some(ask)) => {
            let spread = ask.price.as_decimal() - bid.price.as_decimal();
            let bps = (spread * Decimal::from(10_000) / mid).to_f64().unwrap_or(snapshot.spread_bps);
            (spread, bps)
        }
        _ => (snapshot.spread, snapshot.spread_bps),
    };

    let depth_at = |bps| {
        depth_within_bps(&snapshot.bids, mid, bps)
            .saturating_add(depth_within_bps(&snapshot.asks, mid, bps))
    };
    let market_depth = MarketDepth {
        bps50: depth_at(DEPTH_BANDS_BPS[0]),
        bps100: depth_at(DEPTH_BANDS_BPS[1]),
        bps200: depth_at(DEPTH_BANDS_BPS[2]),
    };

    OrderBookMetrics {
        spread,
        spread_bps,
        market_depth,
        imbalance: imbalance(snapshot.total_bid_volume, snapshot.total_ask_volume),
        pressure_index: pressure_index(snapshot),
        liquidity_score: liquidity_score(spread_bps, market_depth.bps100),
    }
}

/// Volume imbalance; 0 for an empty book.
pub fn imbalance(total_bid: u64, total_ask: u64) -> f64 {
    let bid = total_bid as f64;
    let ask = total_ask as f64;
    let total = bid + ask;
    if total <= 0.0 {
        return 0.0;
    }
    ((bid - ask) / total).clamp(-1.0, 1.0)
}

/// Best-level quantity over distance from mid, bid against ask.
pub fn pressure_index(snapshot: &OrderBookSnapshot) -> f64 {
    let Some(mid) = snapshot.mid_price.as_decimal().to_f64().filter(|m| *m > 0.0) else {
        return 0.0;
    };
    let side_pressure = |level: Option<&OrderBookLevel>| {
        level
            .and_then(|l| {
                let price = l.price.as_decimal().to_f64()?;
                let distance = ((price - mid).abs() / mid).max(MIN_DISTANCE);
                Some(l.quantity as f64 / distance)
            })
            .unwrap_or(0.0)
    };

    let bid = side_pressure(snapshot.best_bid());
    let ask = side_pressure(snapshot.best_ask());
    let total = bid + ask;
    if !(total.is_finite() && total > 0.0) {
        return 0.0;
    }
    ((bid - ask) / total).clamp(-1.0, 1.0)
}

/// `100 − min(30, spread_bps × 0.1) + min(20, depth100 / 1e6)`, clamped to `[0, 100]`.
pub fn liquidity_score(spread_bps: f64, depth_100bps: u64) -> f64 {
    let spread_penalty = (spread_bps * 0.1).min(MAX_SPREAD_PENALTY);
    let depth_bonus = (depth_100bps as f64 / 1_000_000.0).min(MAX_DEPTH_BONUS);
    let score = 100.0 - spread_penalty + depth_bonus;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
