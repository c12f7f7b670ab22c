//! Depth chart export
//!
//! Turns a snapshot into cumulative depth curves, the shape a market-depth
//! chart plots, and serializes them as JSON.

use serde::{Deserialize, Serialize};

use crate::book::{OrderBookLevel, OrderBookSnapshot};

/// A single point on a cumulative depth curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthPoint {
    pub price: String,
    pub quantity: u64,
    pub cumulative_quantity: u64,
}

/// Both depth curves of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthChart {
    pub instrument_id: String,
    pub sequence: u64,
    pub timestamp: i64,
    pub mid_price: String,
    /// Best bid first.
    pub bids: Vec<DepthPoint>,
    /// Best ask first.
    pub asks: Vec<DepthPoint>,
    pub total_bid_depth: u64,
    pub total_ask_depth: u64,
    pub spread: Option<String>,
}

fn cumulative(levels: &[OrderBookLevel]) -> Vec<DepthPoint> {
    let mut running = 0u64;
    levels
        .iter()
        .map(|level| {
            running = running.saturating_add(level.quantity);
            DepthPoint {
                price: level.price.to_string(),
                quantity: level.quantity,
                cumulative_quantity: running,
            }
        })
        .collect()
}

impl DepthChart {
    /// Build cumulative curves from a snapshot.
    pub fn from_snapshot(snapshot: &OrderBookSnapshot) -> Self {
        let bids = cumulative(&snapshot.bids);
        let asks = cumulative(&snapshot.asks);
        let spread = match (snapshot.best_bid(), snapshot.best_ask()) {
            (Some(bid), Some(ask)) => {
                Some((ask.price.as_decimal() - bid.price.as_decimal()).to_string())
            }
            _ => None,
        };

        Self {
            instrument_id: snapshot.instrument_id.to_string(),
            sequence: snapshot.sequence,
            timestamp: snapshot.timestamp.timestamp_millis(),
            mid_price: snapshot.mid_price.to_string(),
            total_bid_depth: bids.last().map_or(0, |p| p.cumulative_quantity),
            total_ask_depth: asks.last().map_or(0, |p| p.cumulative_quantity),
            bids,
            asks,
            spread,
        }
    }
}

/// Export a snapshot's depth chart as pretty JSON.
pub fn export_json(snapshot: &OrderBookSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DepthChart::from_snapshot(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use types::ids::InstrumentId;
    use types::numeric::Price;

    fn level(price: u64, quantity: u64) -> OrderBookLevel {
        OrderBookLevel {
            price: Price::from_u64(price),
            quantity,
            order_count: 1,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap(),
        }
    }

    fn test_snapshot() -> OrderBookSnapshot {
        OrderBookSnapshot {
            instrument_id: InstrumentId::new("KFW-2028"),
            bids: vec![level(99, 20_000), level(98, 30_000)],
            asks: vec![level(101, 10_000)],
            mid_price: Price::from_u64(100),
            spread: Decimal::from(2),
            spread_bps: 200.0,
            total_bid_volume: 50_000,
            total_ask_volume: 10_000,
            market_capacity: 60_000,
            sequence: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_depth_chart() {
        let chart = DepthChart::from_snapshot(&test_snapshot());
        assert_eq!(chart.instrument_id, "KFW-2028");
        assert_eq!(chart.bids.len(), 2);
        assert_eq!(chart.asks.len(), 1);
        assert_eq!(chart.spread.as_deref(), Some("2"));
    }

    #[test]
    fn test_cumulative_quantity() {
        let chart = DepthChart::from_snapshot(&test_snapshot());
        // First bid: qty=20k, cum=20k. Second bid: qty=30k, cum=50k.
        assert_eq!(chart.bids[0].cumulative_quantity, 20_000);
        assert_eq!(chart.bids[1].cumulative_quantity, 50_000);
        assert_eq!(chart.total_bid_depth, 50_000);
        assert_eq!(chart.total_ask_depth, 10_000);
    }

    #[test]
    fn test_export_json() {
        let json = export_json(&test_snapshot()).unwrap();
        assert!(json.contains("KFW-2028"));
        assert!(json.contains("bids"));
        assert!(json.contains("asks"));
    }

    #[test]
    fn test_one_sided_book_has_no_spread() {
        let mut snap = test_snapshot();
        snap.asks.clear();
        let chart = DepthChart::from_snapshot(&snap);
        assert!(chart.spread.is_none());
        assert_eq!(chart.total_ask_depth, 0);
    }
}
