//! # Observation Types
//!
//! A single sample of a pool's tick accumulator, plus the wrap-safe timestamp
//! comparison every reader of the ring relies on.

use crate::constants::{MAX_TICK_CUMULATIVE, MIN_TICK_CUMULATIVE};
use crate::errors::{CoreResult, OracleError};
use crate::math::safe_math::{safe_add_i64, safe_mul_i64};

/// One slot of a pool's observation ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Block timestamp, truncated to 32 bits
    pub timestamp: u32,
    /// Sum of `tick * seconds_elapsed` since pool initialization
    pub tick_cumulative: i64,
    /// Whether the slot has ever been written
    pub initialized: bool,
}

impl Observation {
    /// Create an initialized observation
    pub fn new(timestamp: u32, tick_cumulative: i64) -> Self {
        Self {
            timestamp,
            tick_cumulative,
            initialized: true,
        }
    }

    /// A slot allocated by growing the ring but never written
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Advance this observation to `timestamp`, accruing `tick` for the
    /// elapsed seconds. `timestamp` must not be chronologically earlier than
    /// `self.timestamp`; one u32 wrap in between is fine.
    pub fn transform(&self, timestamp: u32, tick: i32) -> CoreResult<Observation> {
        let elapsed = timestamp.wrapping_sub(self.timestamp);
        let accrued = safe_mul_i64(tick as i64, elapsed as i64)?;
        let tick_cumulative = safe_add_i64(self.tick_cumulative, accrued)?;
        if !(MIN_TICK_CUMULATIVE..=MAX_TICK_CUMULATIVE).contains(&tick_cumulative) {
            return Err(OracleError::MathOverflow);
        }
        Ok(Observation::new(timestamp, tick_cumulative))
    }
}

/// Chronological `a <= b` for 32-bit timestamps, relative to `time`.
///
/// Both `a` and `b` must be at or before `time`. Any value numerically above
/// `time` is taken to be from before the most recent u32 wrap.
pub fn lte(time: u32, a: u32, b: u32) -> bool {
    if a <= time && b <= time {
        return a <= b;
    }

    let a_adjusted = if a > time {
        a as u64
    } else {
        a as u64 + (1u64 << 32)
    };
    let b_adjusted = if b > time {
        b as u64
    } else {
        b as u64 + (1u64 << 32)
    };

    a_adjusted <= b_adjusted
}

/// Whether `timestamp` lies strictly before `now`, wrap-safe
pub fn is_before(now: u32, timestamp: u32) -> bool {
    timestamp != now && lte(now, timestamp, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_accrues_tick() {
        let obs = Observation::new(100, 1_000);
        let next = obs.transform(160, 40).unwrap();
        assert_eq!(next, Observation::new(160, 3_400));

        let next = obs.transform(164, -15).unwrap();
        assert_eq!(next.tick_cumulative, 1_000 - 960);
    }

    #[test]
    fn test_transform_across_wrap() {
        let obs = Observation::new(u32::MAX - 9, 0);
        let next = obs.transform(10, 2).unwrap();
        assert_eq!(next.timestamp, 10);
        assert_eq!(next.tick_cumulative, 40);
    }

    #[test]
    fn test_transform_accumulator_bound() {
        let obs = Observation::new(0, MAX_TICK_CUMULATIVE - 10);
        assert_eq!(obs.transform(1, 11), Err(OracleError::MathOverflow));
    }

    #[test]
    fn test_lte_without_wrap() {
        assert!(lte(1_000, 10, 20));
        assert!(lte(1_000, 20, 20));
        assert!(!lte(1_000, 30, 20));
    }

    #[test]
    fn test_lte_across_wrap() {
        // now = 5, just after wrap; u32::MAX - 5 is older than 3
        let now = 5;
        assert!(lte(now, u32::MAX - 5, 3));
        assert!(!lte(now, 3, u32::MAX - 5));
        assert!(lte(now, u32::MAX - 5, u32::MAX - 1));
    }

    #[test]
    fn test_is_before() {
        assert!(is_before(100, 99));
        assert!(!is_before(100, 100));
        assert!(is_before(3, u32::MAX));
    }

    #[test]
    fn test_uninitialized_flag() {
        let slot = Observation::uninitialized();
        assert!(!slot.initialized);
        assert!(Observation::new(0, 0).initialized);
    }
}
