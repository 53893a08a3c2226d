//! # Pool Interface
//!
//! The read-only view of a liquidity pool the oracle consumes.

use super::asset::AssetPair;
use super::observation::Observation;

/// Snapshot of the pool's price state and ring position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSlot {
    /// Current tick
    pub tick: i32,
    /// Index of the most recently written observation
    pub observation_index: u16,
    /// Number of ring slots in use; `observation_index < observation_cardinality`
    pub observation_cardinality: u16,
}

/// A pool's observation ring, read-only.
///
/// Implementations must answer every call of one query from the same
/// snapshot. Borrowing the pool immutably for the query is enough.
pub trait ObservationSource {
    /// Current tick and ring position
    fn slot(&self) -> PoolSlot;

    /// Observation stored at `index`. Slots never written report
    /// `initialized == false`.
    fn observation(&self, index: u16) -> Observation;

    /// The pool's declared pair
    fn assets(&self) -> AssetPair;
}

impl<T: ObservationSource + ?Sized> ObservationSource for &T {
    fn slot(&self) -> PoolSlot {
        (**self).slot()
    }

    fn observation(&self, index: u16) -> Observation {
        (**self).observation(index)
    }

    fn assets(&self) -> AssetPair {
        (**self).assets()
    }
}
