//! Instrument lookup
//!
//! The generator does not own reference data; it asks an `InstrumentLookup`.
//! `InstrumentRegistry` is the in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use types::errors::InstrumentError;
use types::ids::InstrumentId;
use types::instrument::InstrumentRef;

/// Resolves instrument identifiers to reference data.
pub trait InstrumentLookup {
    fn get_instrument(&self, id: &InstrumentId) -> Option<InstrumentRef>;
}

impl<T: InstrumentLookup + ?Sized> InstrumentLookup for &T {
    fn get_instrument(&self, id: &InstrumentId) -> Option<InstrumentRef> {
        (**self).get_instrument(id)
    }
}

impl<T: InstrumentLookup + ?Sized> InstrumentLookup for Arc<T> {
    fn get_instrument(&self, id: &InstrumentId) -> Option<InstrumentRef> {
        (**self).get_instrument(id)
    }
}

/// In-memory reference data keyed by id.
///
/// Uses `BTreeMap` for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct InstrumentRegistry {
    instruments: BTreeMap<InstrumentId, InstrumentRef>,
}

impl InstrumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from validated instruments.
    pub fn from_instruments(
        instruments: impl IntoIterator<Item = InstrumentRef>,
    ) -> Result<Self, InstrumentError> {
        let mut registry = Self::new();
        for instrument in instruments {
            registry.insert(instrument)?;
        }
        Ok(registry)
    }

    /// Add or replace an instrument. Returns the previous entry, if any.
    pub fn insert(
        &mut self,
        instrument: InstrumentRef,
    ) -> Result<Option<InstrumentRef>, InstrumentError> {
        instrument.validate()?;
        debug!(instrument_id = %instrument.id, rating = %instrument.rating, "Registered instrument");
        Ok(self.instruments.insert(instrument.id.clone(), instrument))
    }

    pub fn remove(&mut self, id: &InstrumentId) -> Option<InstrumentRef> {
        self.instruments.remove(id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &InstrumentId> {
        self.instruments.keys()
    }
}

impl InstrumentLookup for InstrumentRegistry {
    fn get_instrument(&self, id: &InstrumentId) -> Option<InstrumentRef> {
        self.instruments.get(id).cloned()
    }
}
