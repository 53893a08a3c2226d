//! Simulated liquidity pool
//!
//! Only the price state the oracle reads is modelled: the current tick and
//! the observation ring. Swaps are reduced to "the tick moved at time t".

use tickguard_core::math::tick_math::is_tick_valid;
use tickguard_core::{
    AssetPair, Observation, ObservationSource, OracleError, PoolId, PoolSlot, MAX_CARDINALITY,
};
use tracing::{debug, trace};

use crate::{SimulationError, SimulationResult};

/// How a pool reports its ring size to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardinalityView {
    /// Slots that have been brought into rotation by a write
    #[default]
    Populated,
    /// Every allocated slot, including grown slots not yet written
    Allocated,
}

/// A pool with an observation ring
#[derive(Debug, Clone)]
pub struct SimulatedPool {
    id: PoolId,
    assets: AssetPair,
    tick: i32,
    observation_index: u16,
    observation_cardinality: u16,
    observation_cardinality_next: u16,
    observations: Vec<Observation>,
    view: CardinalityView,
}

impl SimulatedPool {
    /// Create a pool and write its first observation
    pub fn initialize(
        id: PoolId,
        assets: AssetPair,
        timestamp: u32,
        tick: i32,
    ) -> SimulationResult<Self> {
        if assets.token0 == assets.token1 {
            return Err(SimulationError::InvalidParameter(
                "pool assets must differ".to_string(),
            ));
        }
        check_tick(tick)?;

        debug!(%id, %assets, timestamp, tick, "pool initialized");
        Ok(Self {
            id,
            assets,
            tick,
            observation_index: 0,
            observation_cardinality: 1,
            observation_cardinality_next: 1,
            observations: vec![Observation::new(timestamp, 0)],
            view: CardinalityView::default(),
        })
    }

    pub fn with_view(mut self, view: CardinalityView) -> Self {
        self.view = view;
        self
    }

    pub fn set_view(&mut self, view: CardinalityView) {
        self.view = view;
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    pub fn observation_index(&self) -> u16 {
        self.observation_index
    }

    pub fn observation_cardinality(&self) -> u16 {
        self.observation_cardinality
    }

    pub fn observation_cardinality_next(&self) -> u16 {
        self.observation_cardinality_next
    }

    /// The most recently written observation
    pub fn latest_observation(&self) -> Observation {
        self.observations[self.observation_index as usize]
    }

    /// Allocate ring slots up to `next`. New slots stay uninitialized and
    /// join the rotation once the write index wraps onto them.
    pub fn grow(&mut self, next: u16) -> u16 {
        let next = next.min(MAX_CARDINALITY);
        let current = self.observation_cardinality_next;
        if next <= current {
            return current;
        }

        self.observations
            .extend((current..next).map(|_| Observation::uninitialized()));
        self.observation_cardinality_next = next;
        debug!(pool = %self.id, from = current, to = next, "observation ring grown");
        next
    }

    /// Record an observation at `timestamp` with the tick in effect up to it.
    /// A second write in the same block is ignored.
    pub fn write(&mut self, timestamp: u32) -> SimulationResult<()> {
        let last = self.latest_observation();
        if last.timestamp == timestamp {
            return Ok(());
        }

        // Anything more than half the u32 range ahead is a step backwards
        if timestamp.wrapping_sub(last.timestamp) > u32::MAX / 2 {
            return Err(SimulationError::TimestampRegression {
                last: last.timestamp,
                next: timestamp,
            });
        }

        let cardinality = if self.observation_cardinality_next > self.observation_cardinality
            && self.observation_index == self.observation_cardinality - 1
        {
            self.observation_cardinality_next
        } else {
            self.observation_cardinality
        };

        let index = ((self.observation_index as u32 + 1) % cardinality as u32) as u16;
        self.observations[index as usize] = last.transform(timestamp, self.tick)?;
        self.observation_index = index;
        self.observation_cardinality = cardinality;

        trace!(pool = %self.id, index, timestamp, "observation written");
        Ok(())
    }

    /// A swap at `timestamp` that leaves the pool at `tick`
    pub fn swap_to_tick(&mut self, timestamp: u32, tick: i32) -> SimulationResult<()> {
        check_tick(tick)?;
        self.write(timestamp)?;
        self.tick = tick;
        Ok(())
    }
}

fn check_tick(tick: i32) -> SimulationResult<()> {
    if !is_tick_valid(tick) {
        return Err(OracleError::TickOutOfRange(tick as i64).into());
    }
    Ok(())
}

impl ObservationSource for SimulatedPool {
    fn slot(&self) -> PoolSlot {
        let observation_cardinality = match self.view {
            CardinalityView::Populated => self.observation_cardinality,
            CardinalityView::Allocated => self.observation_cardinality_next,
        };
        PoolSlot {
            tick: self.tick,
            observation_index: self.observation_index,
            observation_cardinality,
        }
    }

    fn observation(&self, index: u16) -> Observation {
        self.observations
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }

    fn assets(&self) -> AssetPair {
        self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickguard_core::AssetId;

    fn pool(timestamp: u32, tick: i32) -> SimulatedPool {
        SimulatedPool::initialize(
            PoolId::from_low_u64(1),
            AssetPair::new(AssetId::from_low_u64(10), AssetId::from_low_u64(20)),
            timestamp,
            tick,
        )
        .unwrap()
    }

    #[test]
    fn test_write_accrues_previous_tick() {
        let mut pool = pool(1_000, 5);
        pool.swap_to_tick(1_010, -3).unwrap();
        assert_eq!(pool.latest_observation(), Observation::new(1_010, 50));
        pool.swap_to_tick(1_030, 0).unwrap();
        assert_eq!(pool.latest_observation(), Observation::new(1_030, -10));
        assert_eq!(pool.tick(), 0);
    }

    #[test]
    fn test_single_slot_ring_overwrites() {
        let mut pool = pool(1_000, 1);
        pool.swap_to_tick(1_010, 1).unwrap();
        assert_eq!(pool.observation_index(), 0);
        assert_eq!(pool.observation_cardinality(), 1);
        assert_eq!(pool.latest_observation().tick_cumulative, 10);
    }

    #[test]
    fn test_one_write_per_block() {
        let mut pool = pool(1_000, 2);
        pool.swap_to_tick(1_010, 7).unwrap();
        pool.swap_to_tick(1_010, 9).unwrap();
        assert_eq!(pool.latest_observation(), Observation::new(1_010, 20));
        assert_eq!(pool.tick(), 9);
    }

    #[test]
    fn test_growth_takes_effect_at_ring_end() {
        let mut pool = pool(1_000, 1);
        assert_eq!(pool.grow(3), 3);
        assert_eq!(pool.grow(2), 3);
        assert_eq!(pool.observation_cardinality(), 1);

        pool.swap_to_tick(1_010, 1).unwrap();
        assert_eq!(pool.observation_cardinality(), 3);
        assert_eq!(pool.observation_index(), 1);
        assert!(!pool.observation(2).initialized);

        pool.swap_to_tick(1_020, 1).unwrap();
        pool.swap_to_tick(1_030, 1).unwrap();
        assert_eq!(pool.observation_index(), 0);
        assert_eq!(pool.observation(0), Observation::new(1_030, 30));
    }

    #[test]
    fn test_allocated_view_reports_grown_slots() {
        let mut pool = pool(1_000, 1);
        pool.grow(2);
        pool.swap_to_tick(1_010, 1).unwrap();
        pool.grow(4);
        assert_eq!(pool.slot().observation_cardinality, 2);
        pool.set_view(CardinalityView::Allocated);
        assert_eq!(pool.slot().observation_cardinality, 4);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut pool = pool(1_000, 1);
        assert_eq!(
            pool.swap_to_tick(999, 1),
            Err(SimulationError::TimestampRegression {
                last: 1_000,
                next: 999
            })
        );
        assert_eq!(
            pool.swap_to_tick(1_001, 900_000),
            Err(SimulationError::Core(OracleError::TickOutOfRange(900_000)))
        );

        let same = AssetId::from_low_u64(3);
        assert!(SimulatedPool::initialize(
            PoolId::from_low_u64(2),
            AssetPair::new(same, same),
            0,
            0
        )
        .is_err());
    }
}
