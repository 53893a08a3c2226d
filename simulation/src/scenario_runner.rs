//! Scenario runner
//!
//! Replays a timeline of swaps across the pools of a registry. Events are
//! applied in timestamp order; events sharing a timestamp keep the order in
//! which they were scheduled.

use tickguard_core::PoolId;
use tracing::{debug, info};

use crate::price_path::PricePath;
use crate::registry::PoolRegistry;
use crate::SimulationResult;

/// A scheduled change to one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    Swap { pool: PoolId, timestamp: u32, tick: i32 },
    Grow { pool: PoolId, timestamp: u32, cardinality: u16 },
}

impl PoolEvent {
    pub fn swap(pool: PoolId, timestamp: u32, tick: i32) -> Self {
        Self::Swap {
            pool,
            timestamp,
            tick,
        }
    }

    pub fn grow(pool: PoolId, timestamp: u32, cardinality: u16) -> Self {
        Self::Grow {
            pool,
            timestamp,
            cardinality,
        }
    }

    pub fn timestamp(&self) -> u32 {
        match self {
            Self::Swap { timestamp, .. } | Self::Grow { timestamp, .. } => *timestamp,
        }
    }

    pub fn pool(&self) -> PoolId {
        match self {
            Self::Swap { pool, .. } | Self::Grow { pool, .. } => *pool,
        }
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events_applied: usize,
    pub pools_touched: Vec<PoolId>,
    pub last_timestamp: Option<u32>,
}

/// Timeline replay over a registry
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    registry: PoolRegistry,
    pending: Vec<PoolEvent>,
}

impl ScenarioRunner {
    pub fn new(registry: PoolRegistry) -> Self {
        Self {
            registry,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, event: PoolEvent) {
        self.pending.push(event);
    }

    /// Schedule every move of `path` as a swap on `pool`
    pub fn schedule_path(&mut self, pool: PoolId, path: &PricePath) {
        self.pending.extend(
            path.points()
                .iter()
                .map(|point| PoolEvent::swap(pool, point.timestamp, point.tick)),
        );
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply all pending events at or before `until`
    pub fn run_until(&mut self, until: u32) -> SimulationResult<RunSummary> {
        // Stable sort keeps same-block scheduling order
        self.pending.sort_by_key(PoolEvent::timestamp);
        let split = self.pending.partition_point(|event| event.timestamp() <= until);
        let due: Vec<PoolEvent> = self.pending.drain(..split).collect();

        let mut summary = RunSummary::default();
        for event in due {
            let pool = self.registry.get_mut(&event.pool())?;
            match event {
                PoolEvent::Swap { timestamp, tick, .. } => pool.swap_to_tick(timestamp, tick)?,
                PoolEvent::Grow { cardinality, .. } => {
                    pool.grow(cardinality);
                }
            }
            debug!(?event, "event applied");

            summary.events_applied += 1;
            summary.last_timestamp = Some(event.timestamp());
            if !summary.pools_touched.contains(&event.pool()) {
                summary.pools_touched.push(event.pool());
            }
        }

        info!(
            applied = summary.events_applied,
            pools = summary.pools_touched.len(),
            remaining = self.pending.len(),
            "scenario run complete"
        );
        Ok(summary)
    }

    /// Apply every pending event
    pub fn run_all(&mut self) -> SimulationResult<RunSummary> {
        self.run_until(u32::MAX)
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PoolRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> PoolRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_path::PricePathConfig;
    use crate::SimulationError;
    use tickguard_core::{AssetId, AssetPair, Observation};

    fn runner_with_pool() -> (ScenarioRunner, PoolId) {
        let mut registry = PoolRegistry::new();
        let pair = AssetPair::new(AssetId::from_low_u64(1), AssetId::from_low_u64(2));
        let id = registry.deploy(pair, 1_000, 0).unwrap();
        (ScenarioRunner::new(registry), id)
    }

    #[test]
    fn test_events_apply_in_time_order() {
        let (mut runner, pool) = runner_with_pool();
        runner.schedule(PoolEvent::swap(pool, 1_020, 3));
        runner.schedule(PoolEvent::grow(pool, 1_000, 4));
        runner.schedule(PoolEvent::swap(pool, 1_010, 2));

        let summary = runner.run_until(1_015).unwrap();
        assert_eq!(summary.events_applied, 2);
        assert_eq!(summary.last_timestamp, Some(1_010));
        assert_eq!(summary.pools_touched, vec![pool]);
        assert_eq!(runner.pending(), 1);

        runner.run_all().unwrap();
        let state = runner.registry().get(&pool).unwrap();
        assert_eq!(state.tick(), 3);
        assert_eq!(state.observation_index(), 2);
        // 10s at 0, then 10s at 2
        assert_eq!(state.latest_observation(), Observation::new(1_020, 20));
    }

    #[test]
    fn test_unknown_pool_aborts() {
        let (mut runner, _) = runner_with_pool();
        let missing = PoolId::from_low_u64(3);
        runner.schedule(PoolEvent::swap(missing, 1_010, 1));
        assert_eq!(runner.run_all(), Err(SimulationError::UnknownPool(missing)));
    }

    #[test]
    fn test_path_replay_matches_accumulator() {
        let (mut runner, pool) = runner_with_pool();
        runner.schedule(PoolEvent::grow(pool, 1_000, 500));
        let config = PricePathConfig {
            start_time: 1_000,
            seed: 11,
            steps: 200,
            ..Default::default()
        };
        let path = PricePath::generate(&config).unwrap();
        runner.schedule_path(pool, &path);
        runner.run_all().unwrap();

        let last = path.last().unwrap();
        let state = runner.registry().get(&pool).unwrap();
        let expected = path.time_weighted_tick_sum(0, 1_000, last.timestamp);
        assert_eq!(state.latest_observation().tick_cumulative, expected);
    }
}
