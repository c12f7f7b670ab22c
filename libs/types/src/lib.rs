//! Types library for the fixed-income order book generator
//!
//! Core type definitions shared by the generator and its consumers:
//! instrument reference data, prices, book sides and credit ratings.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Instrument identifiers
//! - `numeric`: Fixed-point decimal price type
//! - `side`: Book side (bid / ask)
//! - `rating`: Credit rating scale and tiers
//! - `instrument`: Instrument reference data
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod side;
pub mod rating;
pub mod instrument;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::side::*;
    pub use crate::rating::*;
    pub use crate::instrument::*;
    pub use crate::errors::*;
}
