//! # TWAP (Time-Weighted Average Price) Resolver
//!
//! Reads the pool's tick accumulator at two points in time and divides the
//! difference by the elapsed seconds. Points between samples are linearly
//! interpolated; points after the newest sample are extrapolated with the
//! pool's current tick.

use tracing::debug;

use crate::errors::{CoreResult, OracleError};
use crate::math::safe_math::{
    average_tick, div_trunc_i64, safe_add_i64, safe_mul_i64, safe_sub_i64,
};
use crate::types::{lte, Observation, ObservationSource, PoolSlot};

/// The samples bounding a target time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Surrounding {
    before_or_at: Observation,
    at_or_after: Observation,
}

/// Accumulator value `seconds_ago` seconds before `now`
pub fn observe_single<S: ObservationSource + ?Sized>(
    source: &S,
    now: u32,
    seconds_ago: u32,
) -> CoreResult<i64> {
    let slot = source.slot();
    if slot.observation_cardinality == 0 {
        return Err(OracleError::InsufficientHistory);
    }

    if seconds_ago == 0 {
        let last = source.observation(slot.observation_index);
        if !last.initialized {
            return Err(OracleError::InsufficientHistory);
        }
        if last.timestamp == now {
            return Ok(last.tick_cumulative);
        }
        return Ok(last.transform(now, slot.tick)?.tick_cumulative);
    }

    let target = now.wrapping_sub(seconds_ago);
    let Surrounding {
        before_or_at,
        at_or_after,
    } = surrounding_observations(source, &slot, now, target)?;

    if target == before_or_at.timestamp {
        return Ok(before_or_at.tick_cumulative);
    }
    if target == at_or_after.timestamp {
        return Ok(at_or_after.tick_cumulative);
    }

    // Per-second rate truncates before scaling, matching the pool's own
    // accumulator arithmetic
    let observation_delta = at_or_after.timestamp.wrapping_sub(before_or_at.timestamp);
    let target_delta = target.wrapping_sub(before_or_at.timestamp);
    let cumulative_delta = safe_sub_i64(at_or_after.tick_cumulative, before_or_at.tick_cumulative)?;
    let rate = div_trunc_i64(cumulative_delta, observation_delta as i64)?;
    safe_add_i64(
        before_or_at.tick_cumulative,
        safe_mul_i64(rate, target_delta as i64)?,
    )
}

/// Accumulator values for each offset in `seconds_agos`
pub fn observe<S: ObservationSource + ?Sized>(
    source: &S,
    now: u32,
    seconds_agos: &[u32],
) -> CoreResult<Vec<i64>> {
    seconds_agos
        .iter()
        .map(|&seconds_ago| observe_single(source, now, seconds_ago))
        .collect()
}

/// Time-weighted average tick over the last `period` seconds
pub fn consult_twap<S: ObservationSource + ?Sized>(
    source: &S,
    now: u32,
    period: u32,
) -> CoreResult<i32> {
    if period == 0 {
        return Err(OracleError::InvalidPeriod);
    }

    let cumulatives = observe(source, now, &[period, 0])?;
    let delta = safe_sub_i64(cumulatives[1], cumulatives[0])?;
    let tick = average_tick(delta, period)?;

    debug!(tick, period, "twap tick resolved");
    Ok(tick)
}

fn surrounding_observations<S: ObservationSource + ?Sized>(
    source: &S,
    slot: &PoolSlot,
    now: u32,
    target: u32,
) -> CoreResult<Surrounding> {
    let newest = source.observation(slot.observation_index);
    if !newest.initialized {
        return Err(OracleError::InsufficientHistory);
    }

    // Target at or after the newest sample: extrapolate with the live tick
    if lte(now, newest.timestamp, target) {
        let at_or_after = if newest.timestamp == target {
            newest
        } else {
            newest.transform(target, slot.tick)?
        };
        return Ok(Surrounding {
            before_or_at: newest,
            at_or_after,
        });
    }

    // The oldest sample is the slot after the newest, unless that slot was
    // grown and never written, in which case the ring has not wrapped yet
    let cardinality = slot.observation_cardinality;
    let mut oldest = source.observation(next_index(slot.observation_index, cardinality));
    if !oldest.initialized {
        oldest = source.observation(0);
    }
    if !oldest.initialized || !lte(now, oldest.timestamp, target) {
        return Err(OracleError::InsufficientHistory);
    }

    binary_search(source, slot, now, target)
}

fn next_index(index: u16, cardinality: u16) -> u16 {
    ((index as u32 + 1) % cardinality as u32) as u16
}

/// Find the adjacent pair of written samples with
/// `before_or_at.timestamp <= target <= at_or_after.timestamp`.
///
/// The ring is searched in chronological order starting from the slot after
/// the newest. Slots added by growth but not yet written may sit anywhere in
/// that order, so a probe that lands on one falls back to the nearest written
/// slot below it, and the upper sample is the next written slot above.
fn binary_search<S: ObservationSource + ?Sized>(
    source: &S,
    slot: &PoolSlot,
    now: u32,
    target: u32,
) -> CoreResult<Surrounding> {
    let cardinality = slot.observation_cardinality as u64;
    let read = |position: u64| source.observation((position % cardinality) as u16);

    let mut low = (slot.observation_index as u64 + 1) % cardinality;
    let mut high = low + cardinality - 1;

    while low <= high {
        let mid = (low + high) / 2;

        let Some(before_pos) = (low..=mid).rev().find(|&p| read(p).initialized) else {
            low = mid + 1;
            continue;
        };
        let before_or_at = read(before_pos);

        if !lte(now, before_or_at.timestamp, target) {
            match before_pos.checked_sub(1) {
                Some(next_high) => high = next_high,
                None => break,
            }
            continue;
        }

        let Some(after_pos) =
            (before_pos + 1..before_pos + cardinality).find(|&p| read(p).initialized)
        else {
            break;
        };
        let at_or_after = read(after_pos);

        if lte(now, target, at_or_after.timestamp) {
            return Ok(Surrounding {
                before_or_at,
                at_or_after,
            });
        }
        low = after_pos;
    }

    Err(OracleError::InsufficientHistory)
}
