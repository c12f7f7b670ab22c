//! Order book data model
//!
//! Snapshots are full two-sided books at an instant; updates are single
//! `(side, price)` events sharing the snapshot sequence space.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::InstrumentId;
use types::numeric::Price;
use types::side::Side;

/// A single price point on one side of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: Price,
    /// Resting quantity, never below the configured floor.
    pub quantity: u64,
    /// Approximate number of orders behind the quantity, at least 1.
    pub order_count: u32,
    pub timestamp: DateTime<Utc>,
}

/// Full two-sided book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub instrument_id: InstrumentId,
    /// Strictly descending by price.
    pub bids: Vec<OrderBookLevel>,
    /// Strictly ascending by price.
    pub asks: Vec<OrderBookLevel>,
    /// Instrument reference price at generation time.
    pub mid_price: Price,
    /// Best ask minus best bid.
    pub spread: Decimal,
    pub spread_bps: f64,
    pub total_bid_volume: u64,
    pub total_ask_volume: u64,
    /// Volume within the capacity band around mid, both sides.
    pub market_capacity: u64,
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
}

impl OrderBookSnapshot {
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Levels on one side, best first.
    pub fn levels(&self, side: Side) -> &[OrderBookLevel] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Best bid at or above best ask.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Move the snapshot and its levels to another instant.
    pub fn retimestamp(&mut self, at: DateTime<Utc>) {
        self.timestamp = at;
        for level in self.bids.iter_mut().chain(self.asks.iter_mut()) {
            level.timestamp = at;
        }
    }
}

/// Kind of incremental change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Add,
    Update,
    Remove,
}

/// An illustrative streaming event touching one `(side, price)` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookUpdate {
    pub sequence: u64,
    pub instrument_id: InstrumentId,
    pub side: Side,
    pub action: UpdateAction,
    pub price: Price,
    /// Zero for `Remove`.
    pub quantity: u64,
    pub timestamp: DateTime<Utc>,
}
