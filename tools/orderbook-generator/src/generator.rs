//! Synthetic order book generator
//!
//! Builds a plausible two-sided book for a bond from its reference data
//! alone: a rating/size/tokenization driven spread, a widening price ladder
//! and exponentially decaying liquidity. The only mutable state is the
//! sequence counter; every call re-randomizes from scratch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use types::errors::InstrumentError;
use types::ids::InstrumentId;
use types::instrument::InstrumentRef;
use types::numeric::Price;
use types::side::Side;

use crate::book::{OrderBookLevel, OrderBookSnapshot, OrderBookUpdate, UpdateAction};
use crate::clock::{Clock, SystemClock};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::instruments::InstrumentLookup;
use crate::metrics::depth_within_bps;
use crate::pricing;
use crate::random::RandomSource;

/// Basis points per unit.
const BPS: i64 = 10_000;

/// Upper bound on up-front allocation for caller-sized batches.
const MAX_PREALLOCATED: usize = 1_024;

/// Synthetic order book generator.
///
/// Safe to share across threads: the sequence counter is atomic and the
/// random source is locked for the duration of one operation.
pub struct OrderBookGenerator<L, R = ChaCha8Rng, C = SystemClock> {
    instruments: L,
    config: GeneratorConfig,
    rng: Mutex<R>,
    clock: C,
    sequence: AtomicU64,
}

/// Per-snapshot inputs shared by both sides of the ladder.
struct Ladder {
    /// Mid rounded to the tick; prices are placed around it.
    anchor: Decimal,
    anchor_f64: f64,
    /// Distance of each level from the anchor, touch first.
    offsets: Vec<Decimal>,
    base_liquidity: f64,
    decay: f64,
    trade_size: f64,
    at: DateTime<Utc>,
}

impl<L: InstrumentLookup> OrderBookGenerator<L> {
    /// Create a generator on the system clock with a seeded ChaCha source.
    pub fn new(instruments: L, config: GeneratorConfig, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_parts(instruments, config, ChaCha8Rng::seed_from_u64(seed), SystemClock)
    }
}

impl<L, R, C> OrderBookGenerator<L, R, C>
where
    L: InstrumentLookup,
    R: RandomSource,
    C: Clock,
{
    /// Create a generator from explicit collaborators.
    pub fn with_parts(
        instruments: L,
        config: GeneratorConfig,
        rng: R,
        clock: C,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;
        info!(
            default_levels = config.default_levels,
            max_levels = config.max_levels,
            quantity_floor = config.quantity_floor,
            price_scale = config.price_scale,
            "OrderBookGenerator initialized"
        );

        Ok(Self {
            instruments,
            config,
            rng: Mutex::new(rng),
            clock,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Last sequence number handed out (0 before the first call).
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Snapshot at the configured default depth.
    pub fn generate_default_snapshot(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<OrderBookSnapshot, GeneratorError> {
        self.generate_snapshot(instrument_id, self.config.default_levels)
    }

    /// Generate a full book with `levels` price points per side.
    pub fn generate_snapshot(
        &self,
        instrument_id: &InstrumentId,
        levels: usize,
    ) -> Result<OrderBookSnapshot, GeneratorError> {
        self.check_depth(levels)?;
        let instrument = self.resolve(instrument_id)?;
        let at = self.clock.now();
        let mut rng = self.lock_rng();
        self.build_snapshot(&instrument, levels, at, &mut *rng)
    }

    /// Generate `count` streaming updates spaced `update_interval_ms` apart.
    ///
    /// The events are illustrative; they are not deltas against any book.
    pub fn generate_order_book_updates(
        &self,
        instrument_id: &InstrumentId,
        count: usize,
    ) -> Result<Vec<OrderBookUpdate>, GeneratorError> {
        let instrument = self.resolve(instrument_id)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let start = self.clock.now();
        let interval_ms = self.config.update_interval_ms;
        // Reject the batch before any sequence number is consumed.
        offset_time(start, interval_ms, count - 1)?;
        let scale = self.config.price_scale;
        let tick = pricing::tick(scale);
        let anchor = self.anchor(&instrument)?;

        let mut rng = self.lock_rng();
        let spread = pricing::dynamic_spread(&instrument, start, &self.config, &mut *rng)?;

        let mut updates = Vec::with_capacity(count.min(MAX_PREALLOCATED));
        for i in 0..count {
            let side = if rng.chance(0.5) { Side::Bid } else { Side::Ask };
            let action = if rng.chance(self.config.remove_probability) {
                UpdateAction::Remove
            } else if rng.chance(0.5) {
                UpdateAction::Add
            } else {
                UpdateAction::Update
            };

            let offset = pricing::to_ticks(
                spread / 2.0 + rng.next_f64() * spread,
                scale,
                "update price offset",
            )?;
            let raw = match side {
                Side::Bid => (anchor - offset).max(tick),
                Side::Ask => anchor + offset,
            };
            let price = Price::try_new(raw).ok_or_else(|| GeneratorError::PriceBelowTick {
                price: raw.to_string(),
                tick: tick.to_string(),
            })?;

            let quantity = match action {
                UpdateAction::Remove => 0,
                UpdateAction::Add | UpdateAction::Update => uniform_u64(
                    &mut *rng,
                    self.config.update_quantity_min,
                    self.config.update_quantity_max,
                ),
            };

            let timestamp = offset_time(start, interval_ms, i)?;
            updates.push(OrderBookUpdate {
                sequence: self.next_sequence(),
                instrument_id: instrument.id.clone(),
                side,
                action,
                price,
                quantity,
                timestamp,
            });
        }

        debug!(
            instrument_id = %instrument.id,
            count,
            last_sequence = self.current_sequence(),
            "Generated order book updates"
        );
        Ok(updates)
    }

    /// Generate `hours × 60 / interval_minutes` snapshots, oldest first.
    ///
    /// The most recent snapshot is stamped now; each earlier one sits one
    /// interval before its successor. Snapshots are independently
    /// randomized, so they do not form a continuous price path.
    pub fn generate_historical_snapshots(
        &self,
        instrument_id: &InstrumentId,
        interval_minutes: u32,
        hours: u32,
    ) -> Result<Vec<OrderBookSnapshot>, GeneratorError> {
        if interval_minutes == 0 {
            return Err(GeneratorError::InvalidInterval { interval_minutes });
        }
        let instrument = self.resolve(instrument_id)?;
        let count = usize::try_from(u64::from(hours) * 60 / u64::from(interval_minutes))
            .map_err(|_| GeneratorError::TimestampOutOfRange { quantity: "history length" })?;
        let levels = self.config.default_levels;
        let now = self.clock.now();
        let interval_ms = i64::from(interval_minutes) * 60_000;
        if count > 0 {
            // The oldest slot bounds the whole range.
            offset_time(now, -interval_ms, count - 1)?;
        }

        let mut rng = self.lock_rng();
        let mut snapshots = Vec::with_capacity(count.min(MAX_PREALLOCATED));
        for k in 0..count {
            let at = offset_time(now, -interval_ms, count - 1 - k)?;
            let mut snapshot = self.build_snapshot(&instrument, levels, now, &mut *rng)?;
            snapshot.retimestamp(at);
            snapshots.push(snapshot);
        }

        debug!(
            instrument_id = %instrument.id,
            interval_minutes,
            hours,
            count,
            "Generated historical snapshots"
        );
        Ok(snapshots)
    }

    fn build_snapshot(
        &self,
        instrument: &InstrumentRef,
        levels: usize,
        at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<OrderBookSnapshot, GeneratorError> {
        let ladder = self.ladder(instrument, levels, at, rng)?;
        let bids = self.build_side(&ladder, Side::Bid, rng)?;
        let asks = self.build_side(&ladder, Side::Ask, rng)?;

        let (best_bid, best_ask) = match (bids.first(), asks.first()) {
            (Some(bid), Some(ask)) => (bid.price.as_decimal(), ask.price.as_decimal()),
            _ => {
                return Err(GeneratorError::PriceBelowTick {
                    price: instrument.current_price.to_string(),
                    tick: pricing::tick(self.config.price_scale).to_string(),
                })
            }
        };

        let mid = instrument.current_price.as_decimal();
        let spread = best_ask - best_bid;
        let spread_bps = pricing::to_f64(spread * Decimal::from(BPS) / mid, "spread bps")?;
        let total_bid_volume = bids.iter().map(|l| l.quantity).fold(0u64, u64::saturating_add);
        let total_ask_volume = asks.iter().map(|l| l.quantity).fold(0u64, u64::saturating_add);
        let band = self.config.capacity_band_bps;
        let market_capacity =
            depth_within_bps(&bids, mid, band).saturating_add(depth_within_bps(&asks, mid, band));

        let sequence = self.next_sequence();
        debug!(
            instrument_id = %instrument.id,
            levels,
            spread_bps,
            market_capacity,
            sequence,
            "Generated order book snapshot"
        );

        Ok(OrderBookSnapshot {
            instrument_id: instrument.id.clone(),
            bids,
            asks,
            mid_price: instrument.current_price,
            spread,
            spread_bps,
            total_bid_volume,
            total_ask_volume,
            market_capacity,
            sequence,
            timestamp: at,
        })
    }

    /// Price offsets and liquidity parameters for one snapshot.
    fn ladder(
        &self,
        instrument: &InstrumentRef,
        levels: usize,
        at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Ladder, GeneratorError> {
        let scale = self.config.price_scale;
        let tick = pricing::tick(scale);
        let anchor = self.anchor(instrument)?;
        let anchor_f64 = pricing::to_f64(anchor, "mid price")?;

        let spread = pricing::dynamic_spread(instrument, at, &self.config, rng)?;
        // Best bid must stay at least one tick above zero.
        let half_spread = pricing::to_ticks(spread / 2.0, scale, "half spread")?.min(anchor - tick);

        let step = anchor_f64 * self.config.base_step_bps / BPS as f64
            * pricing::step_multiplier(instrument.rating.tier());
        let mut offsets = Vec::with_capacity(levels);
        let mut offset = half_spread;
        for i in 0..levels {
            if i > 0 {
                let width = step * (1.0 + i as f64 * self.config.step_growth);
                offset += pricing::to_ticks(width, scale, "price step")?;
            }
            offsets.push(offset);
        }

        let market_cap = pricing::to_f64(instrument.market_cap, "market cap")?;
        Ok(Ladder {
            anchor,
            anchor_f64,
            offsets,
            base_liquidity: pricing::base_liquidity(market_cap, instrument.is_tokenized, &self.config),
            decay: pricing::decay_rate(instrument.is_tokenized, &self.config),
            trade_size: pricing::to_f64(instrument.typical_trade_size, "typical trade size")?,
            at,
        })
    }

    /// One side of the ladder, best price first.
    ///
    /// Quantities are floored at `quantity_floor` and capped by the previous
    /// level, so depth never grows away from mid.
    fn build_side(
        &self,
        ladder: &Ladder,
        side: Side,
        rng: &mut R,
    ) -> Result<Vec<OrderBookLevel>, GeneratorError> {
        let floor = self.config.quantity_floor;
        let jitter = self.config.quantity_jitter;
        let mut levels = Vec::with_capacity(ladder.offsets.len());
        let mut ceiling = u64::MAX;

        for offset in &ladder.offsets {
            let raw = match side {
                Side::Bid => ladder.anchor - *offset,
                Side::Ask => ladder.anchor + *offset,
            };
            let Some(price) = Price::try_new(raw) else {
                warn!(
                    side = %side,
                    dropped = ladder.offsets.len() - levels.len(),
                    "Price ladder reached zero, truncating side"
                );
                break;
            };

            let distance = pricing::to_f64(*offset, "distance from mid")? / ladder.anchor_f64;
            let liquidity = pricing::decayed_liquidity(ladder.base_liquidity, distance, ladder.decay)
                * rng.range(1.0 - jitter, 1.0 + jitter);
            if !liquidity.is_finite() {
                return Err(GeneratorError::NonFinite { quantity: "level quantity" });
            }
            let quantity = (liquidity.floor() as u64).clamp(floor, ceiling);
            ceiling = quantity;

            let expected_orders = (quantity as f64 / ladder.trade_size)
                .round()
                .clamp(0.0, f64::from(u32::MAX)) as i64;
            let order_count = expected_orders.saturating_add(rng.int_inclusive(-2, 2)).max(1);

            levels.push(OrderBookLevel {
                price,
                quantity,
                order_count: u32::try_from(order_count).unwrap_or(u32::MAX),
                timestamp: ladder.at,
            });
        }

        Ok(levels)
    }

    /// Reference price rounded to the tick; needs room for a two-tick spread.
    fn anchor(&self, instrument: &InstrumentRef) -> Result<Decimal, GeneratorError> {
        let tick = pricing::tick(self.config.price_scale);
        let anchor = instrument.current_price.as_decimal().round_dp(self.config.price_scale);
        if anchor < tick * Decimal::TWO {
            return Err(GeneratorError::PriceBelowTick {
                price: instrument.current_price.to_string(),
                tick: tick.to_string(),
            });
        }
        Ok(anchor)
    }

    fn check_depth(&self, levels: usize) -> Result<(), GeneratorError> {
        if levels == 0 || levels > self.config.max_levels {
            return Err(GeneratorError::InvalidDepth {
                requested: levels,
                max: self.config.max_levels,
            });
        }
        Ok(())
    }

    fn resolve(&self, instrument_id: &InstrumentId) -> Result<InstrumentRef, GeneratorError> {
        match self.instruments.get_instrument(instrument_id) {
            Some(instrument) => {
                instrument.validate()?;
                Ok(instrument)
            }
            None => {
                warn!(instrument_id = %instrument_id, "Instrument not found");
                Err(InstrumentError::NotFound {
                    instrument_id: instrument_id.to_string(),
                }
                .into())
            }
        }
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock_rng(&self) -> MutexGuard<'_, R> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `start + steps × step_ms`, or an error when it leaves chrono's range.
fn offset_time(
    start: DateTime<Utc>,
    step_ms: i64,
    steps: usize,
) -> Result<DateTime<Utc>, GeneratorError> {
    i64::try_from(steps)
        .ok()
        .and_then(|steps| step_ms.checked_mul(steps))
        .and_then(Duration::try_milliseconds)
        .and_then(|offset| start.checked_add_signed(offset))
        .ok_or(GeneratorError::TimestampOutOfRange { quantity: "timestamp offset" })
}

/// Uniform integer in `lo..=hi`.
fn uniform_u64<R: RandomSource + ?Sized>(rng: &mut R, lo: u64, hi: u64) -> u64 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo) as f64;
    let offset = (rng.next_f64() * (span + 1.0)).floor().min(span) as u64;
    lo.saturating_add(offset).min(hi)
}
