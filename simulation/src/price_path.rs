//! Seeded random price paths
//!
//! A path is a sequence of (timestamp, tick) moves produced by a bounded
//! random walk. The same config always yields the same path.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickguard_core::{MAX_TICK, MIN_TICK};

use crate::{SimulationError, SimulationResult};

/// Random walk parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePathConfig {
    pub start_time: u32,
    pub start_tick: i32,
    /// Largest tick move in one step
    pub max_step: i32,
    pub min_interval: u32,
    pub max_interval: u32,
    pub steps: usize,
    pub seed: u64,
}

impl Default for PricePathConfig {
    fn default() -> Self {
        Self {
            start_time: 1_000_000,
            start_tick: 0,
            max_step: 50,
            min_interval: 1,
            max_interval: 60,
            steps: 100,
            seed: 0,
        }
    }
}

impl PricePathConfig {
    pub fn validate(&self) -> SimulationResult<()> {
        if self.max_step < 0 {
            return Err(SimulationError::InvalidParameter(
                "max_step must not be negative".to_string(),
            ));
        }
        if self.min_interval == 0 || self.min_interval > self.max_interval {
            return Err(SimulationError::InvalidParameter(format!(
                "interval range {}..={} is empty or zero",
                self.min_interval, self.max_interval
            )));
        }
        if !(MIN_TICK..=MAX_TICK).contains(&self.start_tick) {
            return Err(SimulationError::InvalidParameter(format!(
                "start tick {} out of range",
                self.start_tick
            )));
        }
        Ok(())
    }
}

/// One move of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePoint {
    pub timestamp: u32,
    pub tick: i32,
}

/// A generated walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePath {
    points: Vec<PricePoint>,
}

impl PricePath {
    pub fn generate(config: &PricePathConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut timestamp = config.start_time;
        let mut tick = config.start_tick;
        let mut points = Vec::with_capacity(config.steps);

        for _ in 0..config.steps {
            let interval = rng.gen_range(config.min_interval..=config.max_interval);
            timestamp = timestamp.checked_add(interval).ok_or_else(|| {
                SimulationError::InvalidParameter("path runs past u32 time".to_string())
            })?;
            let step = rng.gen_range(-config.max_step..=config.max_step);
            tick = tick.saturating_add(step).clamp(MIN_TICK, MAX_TICK);
            points.push(PricePoint { timestamp, tick });
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Exact time-weighted tick over `[from, to]`, given the tick in effect
    /// before the first point. Used to check oracle output.
    pub fn time_weighted_tick_sum(&self, initial_tick: i32, from: u32, to: u32) -> i64 {
        let mut sum = 0i64;
        let mut tick = initial_tick;
        let mut cursor = from;

        for point in &self.points {
            if point.timestamp > cursor {
                let end = point.timestamp.min(to);
                sum += tick as i64 * (end - cursor) as i64;
                cursor = end;
            }
            if point.timestamp > to {
                break;
            }
            tick = point.tick;
        }
        if to > cursor {
            sum += tick as i64 * (to - cursor) as i64;
        }
        sum
    }
}
