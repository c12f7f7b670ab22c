//! Error types for instrument reference data
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Instrument lookup and validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    #[error("Instrument not found: {instrument_id}")]
    NotFound { instrument_id: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid market cap: {0}")]
    InvalidMarketCap(String),

    #[error("Invalid typical trade size: {0}")]
    InvalidTradeSize(String),

    #[error("Unknown rating: {0}")]
    UnknownRating(String),
}
