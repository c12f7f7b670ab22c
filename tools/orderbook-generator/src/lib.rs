//! Synthetic Order Book Generator
//!
//! Produces realistic-looking limit order books for tokenized and
//! traditional bonds without any market data source. Spreads follow credit
//! rating, issue size, tokenization and the trading session; liquidity
//! decays exponentially away from mid. Seeded randomness keeps every run
//! reproducible.
//!
//! # Modules
//! - `generator`: Snapshots, streaming updates and historical series
//! - `pricing`: Spread, step and liquidity model
//! - `book`: Snapshot, level and update types
//! - `metrics`: Depth bands, imbalance, pressure and liquidity score
//! - `depth`: Cumulative depth chart export
//! - `instruments`: Instrument lookup and in-memory registry
//! - `random`: Pluggable random source
//! - `clock`: Pluggable wall clock
//! - `config`: Generator configuration
//! - `error`: Error taxonomy

pub mod book;
pub mod clock;
pub mod config;
pub mod depth;
pub mod error;
pub mod generator;
pub mod instruments;
pub mod metrics;
pub mod pricing;
pub mod random;

pub use book::{OrderBookLevel, OrderBookSnapshot, OrderBookUpdate, UpdateAction};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::OrderBookGenerator;
pub use instruments::{InstrumentLookup, InstrumentRegistry};
pub use metrics::{calculate_order_book_metrics, MarketDepth, OrderBookMetrics};
pub use random::RandomSource;
