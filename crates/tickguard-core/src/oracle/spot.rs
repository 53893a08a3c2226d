//! # Spot Tick Resolver
//!
//! The "safe" spot tick. When the newest observation predates the current
//! block the pool's tick has been in effect since an earlier block and is
//! returned as is. When the newest observation was written this block the
//! tick may have been moved within the block, so the resolver falls back to
//! the average tick between the two samples before it.

use tracing::debug;

use crate::errors::{CoreResult, OracleError};
use crate::math::safe_math::{average_tick, safe_sub_i64};
use crate::oracle::walker::{fetch_prior_observation, PriorObservation};
use crate::types::{is_before, ObservationSource};

/// How the second historical sample is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "client", serde(rename_all = "snake_case"))]
pub enum PriorLookup {
    /// One step back from the first sample's resolved index
    #[default]
    FromPrior,
    /// Two steps back from the current index. Fails with
    /// `InsufficientHistory` if skipping empty slots lands on the first
    /// sample again.
    FromStart,
}

/// Resolve the spot tick of `source` at block time `now`
pub fn consult_spot<S: ObservationSource + ?Sized>(
    source: &S,
    now: u32,
    lookup: PriorLookup,
) -> CoreResult<i32> {
    let slot = source.slot();
    let current = source.observation(slot.observation_index);

    if is_before(now, current.timestamp) {
        debug!(tick = slot.tick, "spot tick from pool state");
        return Ok(slot.tick);
    }

    let (newer, older) = prior_pair(
        source,
        slot.observation_index,
        slot.observation_cardinality,
        lookup,
    )?;

    let elapsed = newer
        .observation
        .timestamp
        .wrapping_sub(older.observation.timestamp);
    if elapsed == 0 {
        return Err(OracleError::DivisionByZero);
    }
    let delta = safe_sub_i64(
        newer.observation.tick_cumulative,
        older.observation.tick_cumulative,
    )?;
    let tick = average_tick(delta, elapsed)?;

    debug!(
        tick,
        newer = newer.index,
        older = older.index,
        "spot tick reconstructed from history"
    );
    Ok(tick)
}

/// The two most recent samples before `index`, newest first
fn prior_pair<S: ObservationSource + ?Sized>(
    source: &S,
    index: u16,
    cardinality: u16,
    lookup: PriorLookup,
) -> CoreResult<(PriorObservation, PriorObservation)> {
    let newer = fetch_prior_observation(source, index, 1, cardinality)?;

    let older = match lookup {
        PriorLookup::FromPrior => {
            let older = fetch_prior_observation(source, newer.index, 1, cardinality)?;
            // Wrapped past every empty slot back onto the current sample
            if older.index == index {
                return Err(OracleError::InsufficientCardinality);
            }
            older
        }
        PriorLookup::FromStart => {
            let older = fetch_prior_observation(source, index, 2, cardinality)?;
            if older.index == newer.index {
                return Err(OracleError::InsufficientHistory);
            }
            older
        }
    };

    Ok((newer, older))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::fixtures::{empty, obs, Ring};

    #[test]
    fn test_prior_block_returns_pool_tick() {
        let ring = Ring::new(-42, 1, vec![obs(900, 0), obs(960, 600)]);
        assert_eq!(consult_spot(&ring, 1_000, PriorLookup::FromPrior), Ok(-42));
        assert_eq!(consult_spot(&ring, 1_000, PriorLookup::FromStart), Ok(-42));
    }

    #[test]
    fn test_same_block_reconstructs_with_floor() {
        // Samples before the current one: cumulative delta -867 over 64s
        let ring = Ring::new(
            5_000,
            2,
            vec![obs(936, 10_000), obs(1_000, 10_000 - 867), obs(1_064, 99_999)],
        );
        assert_eq!(consult_spot(&ring, 1_064, PriorLookup::FromPrior), Ok(-14));
        assert_eq!(consult_spot(&ring, 1_064, PriorLookup::FromStart), Ok(-14));
    }

    #[test]
    fn test_same_block_positive_tick() {
        let ring = Ring::new(
            9_999,
            0,
            vec![obs(2_000, 0), obs(1_000, 0), obs(1_060, 600)],
        );
        // newer = slot 2, older = slot 1; index 0 is current
        assert_eq!(consult_spot(&ring, 2_000, PriorLookup::FromPrior), Ok(10));
    }

    #[test]
    fn test_lookups_differ_on_skipped_slots() {
        // Current at 3, slots 2 and 1 empty: the first sample resolves to 0
        let ring = Ring::new(
            0,
            3,
            vec![obs(1_000, 3_000), empty(), empty(), obs(1_100, 5_000), obs(900, 1_000)],
        );
        // FromPrior: newer = 0, older = 4 -> (3000 - 1000) / 100
        assert_eq!(consult_spot(&ring, 1_100, PriorLookup::FromPrior), Ok(20));
        // FromStart: two steps back from 3 also lands on 0
        assert_eq!(
            consult_spot(&ring, 1_100, PriorLookup::FromStart),
            Err(OracleError::InsufficientHistory)
        );
    }

    #[test]
    fn test_insufficient_samples() {
        let ring = Ring::new(7, 0, vec![obs(100, 0)]);
        assert_eq!(
            consult_spot(&ring, 100, PriorLookup::FromPrior),
            Err(OracleError::InsufficientCardinality)
        );

        // Only the current sample and one before it
        let ring = Ring::new(7, 1, vec![obs(50, 0), obs(100, 350), empty()]);
        assert_eq!(
            consult_spot(&ring, 100, PriorLookup::FromPrior),
            Err(OracleError::InsufficientCardinality)
        );
    }

    #[test]
    fn test_wrapped_timestamps() {
        // Current sample written just after the u32 wrap
        let ring = Ring::new(
            0,
            2,
            vec![obs(u32::MAX - 59, 0), obs(4, 3_840), obs(10, 3_900)],
        );
        // (3840 - 0) / 64 across the wrap
        assert_eq!(consult_spot(&ring, 10, PriorLookup::FromPrior), Ok(60));
    }
}
