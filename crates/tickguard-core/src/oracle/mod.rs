//! # Oracle Module
//!
//! Tick resolvers over a pool's observation ring and the worse-of selection
//! that turns resolved ticks into a quote.

pub mod clock;
pub mod selector;
pub mod spot;
pub mod twap;
pub mod walker;

pub use clock::*;
pub use selector::*;
pub use spot::*;
pub use twap::*;
pub use walker::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{AssetId, AssetPair, Observation, ObservationSource, PoolSlot};

    /// Hand-built ring for resolver tests
    #[derive(Debug, Clone)]
    pub struct Ring {
        pub tick: i32,
        pub index: u16,
        pub slots: Vec<Observation>,
        pub pair: AssetPair,
    }

    impl Ring {
        pub fn new(tick: i32, index: u16, slots: Vec<Observation>) -> Self {
            Self {
                tick,
                index,
                slots,
                pair: AssetPair::new(AssetId::from_low_u64(1), AssetId::from_low_u64(2)),
            }
        }

        pub fn with_pair(mut self, a: AssetId, b: AssetId) -> Self {
            self.pair = AssetPair::new(a, b);
            self
        }
    }

    pub fn obs(timestamp: u32, tick_cumulative: i64) -> Observation {
        Observation::new(timestamp, tick_cumulative)
    }

    pub fn empty() -> Observation {
        Observation::uninitialized()
    }

    impl ObservationSource for Ring {
        fn slot(&self) -> PoolSlot {
            PoolSlot {
                tick: self.tick,
                observation_index: self.index,
                observation_cardinality: self.slots.len() as u16,
            }
        }

        fn observation(&self, index: u16) -> Observation {
            self.slots.get(index as usize).copied().unwrap_or_default()
        }

        fn assets(&self) -> AssetPair {
            self.pair
        }
    }
}
