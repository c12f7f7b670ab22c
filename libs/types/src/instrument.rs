//! Instrument reference data
//!
//! Read-only inputs to book generation: where the instrument trades, how it
//! is rated, how big the issue is and whether it lives on a ledger.

use crate::errors::InstrumentError;
use crate::ids::InstrumentId;
use crate::numeric::Price;
use crate::rating::Rating;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference data for one bond
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRef {
    pub id: InstrumentId,
    pub name: String,
    /// Mid-market reference price
    pub current_price: Price,
    pub rating: Rating,
    /// Outstanding notional in quote currency
    pub market_cap: Decimal,
    /// Issued as a token on a distributed ledger
    pub is_tokenized: bool,
    /// Usual ticket size, used to turn quantities into order counts
    pub typical_trade_size: Decimal,
}

impl InstrumentRef {
    /// Build validated reference data
    pub fn new(
        id: InstrumentId,
        name: impl Into<String>,
        current_price: Price,
        rating: Rating,
        market_cap: Decimal,
        is_tokenized: bool,
        typical_trade_size: Decimal,
    ) -> Result<Self, InstrumentError> {
        let instrument = Self {
            id,
            name: name.into(),
            current_price,
            rating,
            market_cap,
            is_tokenized,
            typical_trade_size,
        };
        instrument.validate()?;
        Ok(instrument)
    }

    /// Check the numeric fields, e.g. after deserializing
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if self.market_cap <= Decimal::ZERO {
            return Err(InstrumentError::InvalidMarketCap(self.market_cap.to_string()));
        }
        if self.typical_trade_size <= Decimal::ZERO {
            return Err(InstrumentError::InvalidTradeSize(
                self.typical_trade_size.to_string(),
            ));
        }
        Ok(())
    }
}
