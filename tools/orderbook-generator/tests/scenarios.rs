//! Scenario tests
//!
//! End-to-end runs against a small bond universe: tokenized vs traditional
//! spreads, unknown instruments, historical series, metrics and export.

use chrono::{DateTime, Duration, TimeZone, Utc};
use orderbook_generator::depth::{export_json, DepthChart};
use orderbook_generator::{
    calculate_order_book_metrics, FixedClock, GeneratorConfig, GeneratorError,
    InstrumentLookup, InstrumentRegistry, OrderBookGenerator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use types::errors::InstrumentError;
use types::ids::InstrumentId;
use types::instrument::InstrumentRef;
use types::rating::Rating;

type TestGenerator = OrderBookGenerator<InstrumentRegistry, ChaCha8Rng, FixedClock>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn bond(id: &str, rating: Rating, tokenized: bool) -> InstrumentRef {
    InstrumentRef::new(
        InstrumentId::new(id),
        id,
        "98.75".parse().unwrap(),
        rating,
        Decimal::from(2_000_000_000u64),
        tokenized,
        Decimal::from(100_000),
    )
    .unwrap()
}

fn universe() -> InstrumentRegistry {
    InstrumentRegistry::from_instruments(vec![
        bond("AAA-TOKEN", Rating::Aaa, true),
        bond("BB-TRAD", Rating::BbMinus, false),
    ])
    .unwrap()
}

// Thursday, mid-session
fn trading_hours() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 11, 0, 0).unwrap()
}

fn generator_at(seed: u64, at: DateTime<Utc>) -> TestGenerator {
    OrderBookGenerator::with_parts(
        universe(),
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(seed),
        FixedClock(at),
    )
    .unwrap()
}

#[test]
fn tokenized_aaa_quotes_tighter_than_high_yield() {
    init_tracing();
    for seed in 0..20 {
        let gen = generator_at(seed, trading_hours());
        let aaa = gen.generate_snapshot(&InstrumentId::new("AAA-TOKEN"), 15).unwrap();
        let bb = gen.generate_snapshot(&InstrumentId::new("BB-TRAD"), 15).unwrap();

        assert!(aaa.spread_bps < 10.0, "AAA spread {} bps", aaa.spread_bps);
        assert!(aaa.spread_bps * 5.0 < bb.spread_bps);
        assert!(aaa.total_bid_volume > bb.total_bid_volume);
    }
}

#[test]
fn after_hours_widens_spread() {
    // Same seed, so the jitter draw is identical.
    let day = generator_at(4, trading_hours())
        .generate_snapshot(&InstrumentId::new("BB-TRAD"), 5)
        .unwrap();
    let night = generator_at(4, Utc.with_ymd_and_hms(2024, 3, 14, 2, 0, 0).unwrap())
        .generate_snapshot(&InstrumentId::new("BB-TRAD"), 5)
        .unwrap();
    assert!(night.spread > day.spread);
}

#[test]
fn unknown_instrument_fails_loudly() {
    init_tracing();
    let gen = generator_at(1, trading_hours());
    let id = InstrumentId::new("DOES-NOT-EXIST");

    let err = gen.generate_snapshot(&id, 20).unwrap_err();
    assert_eq!(
        err,
        GeneratorError::Instrument(InstrumentError::NotFound {
            instrument_id: "DOES-NOT-EXIST".to_string()
        })
    );
    assert!(gen.generate_order_book_updates(&id, 5).unwrap_err().is_not_found());
    assert!(gen.generate_historical_snapshots(&id, 15, 6).unwrap_err().is_not_found());
    assert_eq!(gen.current_sequence(), 0);
}

#[test]
fn six_hours_at_fifteen_minutes_is_24_snapshots() {
    let now = trading_hours();
    let gen = generator_at(6, now);
    let history = gen
        .generate_historical_snapshots(&InstrumentId::new("AAA-TOKEN"), 15, 6)
        .unwrap();

    assert_eq!(history.len(), 24);
    assert_eq!(history[23].timestamp, now);
    assert_eq!(history[0].timestamp, now - Duration::minutes(345));
    let sequences: Vec<u64> = history.iter().map(|s| s.sequence).collect();
    assert_eq!(sequences, (1..=24).collect::<Vec<u64>>());
}

#[test]
fn historical_snapshots_are_independent_draws() {
    let gen = generator_at(12, trading_hours());
    let history = gen
        .generate_historical_snapshots(&InstrumentId::new("BB-TRAD"), 60, 4)
        .unwrap();
    let first_bids: Vec<u64> = history.iter().map(|s| s.bids[0].quantity).collect();
    assert!(first_bids.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |gen: &TestGenerator| {
        let snap = gen.generate_snapshot(&InstrumentId::new("AAA-TOKEN"), 20).unwrap();
        let updates = gen.generate_order_book_updates(&InstrumentId::new("BB-TRAD"), 10).unwrap();
        (snap, updates)
    };
    let a = run(&generator_at(77, trading_hours()));
    let b = run(&generator_at(77, trading_hours()));
    assert_eq!(a, b);

    let c = run(&generator_at(78, trading_hours()));
    assert_ne!(a.0.bids, c.0.bids);
}

#[test]
fn metrics_on_generated_book() {
    let gen = generator_at(3, trading_hours());
    let snap = gen.generate_snapshot(&InstrumentId::new("AAA-TOKEN"), 20).unwrap();
    let metrics = calculate_order_book_metrics(&snap);

    assert_eq!(metrics.spread, snap.spread);
    assert!((metrics.spread_bps - snap.spread_bps).abs() < 1e-9);
    assert!(metrics.market_depth.bps50 > 0);
    assert!(metrics.market_depth.bps50 <= metrics.market_depth.bps100);
    assert!(metrics.market_depth.bps100 <= metrics.market_depth.bps200);
    // Tight, deep tokenized AAA book
    assert!(metrics.liquidity_score > 95.0);
    assert!((-1.0..=1.0).contains(&metrics.imbalance));
}

#[test]
fn depth_chart_matches_snapshot_totals() {
    let gen = generator_at(5, trading_hours());
    let snap = gen.generate_snapshot(&InstrumentId::new("BB-TRAD"), 12).unwrap();
    let chart = DepthChart::from_snapshot(&snap);

    assert_eq!(chart.total_bid_depth, snap.total_bid_volume);
    assert_eq!(chart.total_ask_depth, snap.total_ask_volume);
    assert_eq!(chart.sequence, snap.sequence);
    assert!(chart
        .bids
        .windows(2)
        .all(|w| w[0].cumulative_quantity < w[1].cumulative_quantity));

    let json = export_json(&snap).unwrap();
    let parsed: DepthChart = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, chart);
}

#[test]
fn config_from_json_drives_generation() {
    let config = GeneratorConfig::from_json(
        r#"{ "default_levels": 8, "quantity_floor": 25000, "remove_probability": 0.0 }"#,
    )
    .unwrap();
    let gen = OrderBookGenerator::with_parts(
        universe(),
        config,
        ChaCha8Rng::seed_from_u64(9),
        FixedClock(trading_hours()),
    )
    .unwrap();

    let snap = gen.generate_default_snapshot(&InstrumentId::new("BB-TRAD")).unwrap();
    assert_eq!(snap.asks.len(), 8);
    assert!(snap.asks.iter().all(|l| l.quantity >= 25_000));

    let updates = gen.generate_order_book_updates(&InstrumentId::new("BB-TRAD"), 50).unwrap();
    assert!(updates.iter().all(|u| u.quantity > 0));
}

/// Serves whatever it holds, without the registry's insert-time checks.
struct RawLookup(InstrumentRef);

impl InstrumentLookup for RawLookup {
    fn get_instrument(&self, id: &InstrumentId) -> Option<InstrumentRef> {
        (self.0.id == *id).then(|| self.0.clone())
    }
}

#[test]
fn tiny_trade_size_saturates_order_counts() {
    let mut dust = bond("DUST-LOTS", Rating::A, false);
    dust.typical_trade_size = Decimal::new(1, 28);
    let registry = InstrumentRegistry::from_instruments(vec![dust]).unwrap();
    let gen = OrderBookGenerator::with_parts(
        registry,
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(17),
        FixedClock(trading_hours()),
    )
    .unwrap();

    let snap = gen.generate_snapshot(&InstrumentId::new("DUST-LOTS"), 30).unwrap();
    for level in snap.bids.iter().chain(&snap.asks) {
        assert!(level.order_count >= u32::MAX - 2);
    }
}

#[test]
fn lookup_with_invalid_reference_data_is_rejected() {
    init_tracing();
    let mut broken = bond("ZERO-LOT", Rating::Bbb, false);
    broken.typical_trade_size = Decimal::ZERO;
    let gen = OrderBookGenerator::with_parts(
        RawLookup(broken),
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(2),
        FixedClock(trading_hours()),
    )
    .unwrap();
    let id = InstrumentId::new("ZERO-LOT");

    assert_eq!(
        gen.generate_snapshot(&id, 10).unwrap_err(),
        GeneratorError::Instrument(InstrumentError::InvalidTradeSize("0".to_string()))
    );
    assert!(gen.generate_order_book_updates(&id, 3).is_err());
    assert!(gen.generate_historical_snapshots(&id, 15, 1).is_err());
    assert_eq!(gen.current_sequence(), 0);
}

#[test]
fn extreme_requests_fail_without_consuming_sequences() {
    let gen = generator_at(10, trading_hours());
    let id = InstrumentId::new("BB-TRAD");

    assert!(matches!(
        gen.generate_historical_snapshots(&id, 1_000_000_000, u32::MAX),
        Err(GeneratorError::TimestampOutOfRange { .. })
    ));
    assert!(matches!(
        gen.generate_order_book_updates(&id, usize::MAX),
        Err(GeneratorError::TimestampOutOfRange { .. })
    ));
    assert_eq!(gen.current_sequence(), 0);

    // A long but representable window still works.
    let history = gen.generate_historical_snapshots(&id, 1_440, 24 * 365).unwrap();
    assert_eq!(history.len(), 365);
    assert_eq!(history[0].timestamp, trading_hours() - Duration::days(364));
}
