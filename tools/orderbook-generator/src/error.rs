//! Generator error taxonomy

use thiserror::Error;
use types::errors::InstrumentError;

/// Errors returned by the order book generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Invalid depth: requested {requested} levels, allowed 1..={max}")]
    InvalidDepth { requested: usize, max: usize },

    #[error("Invalid interval: {interval_minutes} minutes")]
    InvalidInterval { interval_minutes: u32 },

    #[error("Price {price} too small for tick {tick}")]
    PriceBelowTick { price: String, tick: String },

    #[error("Non-finite value while computing {quantity}")]
    NonFinite { quantity: &'static str },

    #[error("Timestamp out of range while computing {quantity}")]
    TimestampOutOfRange { quantity: &'static str },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl GeneratorError {
    /// True when the requested instrument does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeneratorError::Instrument(InstrumentError::NotFound { .. }))
    }
}
