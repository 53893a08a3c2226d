//! # Ring Buffer Walker
//!
//! Locates the observation a given number of logical steps behind a start
//! index. Rings grow lazily: new slots are appended after the live region and
//! stay uninitialized until the write index reaches them, so a backwards walk
//! may cross a run of empty slots before wrapping to older data.

use tracing::trace;

use crate::errors::{CoreResult, OracleError};
use crate::types::{Observation, ObservationSource};

/// An initialized observation and the ring index it was found at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorObservation {
    pub observation: Observation,
    pub index: u16,
}

/// Walk `steps_back` slots behind `start`, skipping uninitialized slots.
///
/// Every skipped slot pushes the walk one further step back. The walk fails
/// once it would come back around to `start`:
/// - `InsufficientCardinality` when `start` itself holds data, meaning the
///   ring has fewer than two distinct samples and must be grown;
/// - `InsufficientHistory` when `start` is empty too, meaning the ring holds
///   nothing usable.
///
/// At most `cardinality` slots are read.
pub fn fetch_prior_observation<S: ObservationSource + ?Sized>(
    source: &S,
    start: u16,
    steps_back: u16,
    cardinality: u16,
) -> CoreResult<PriorObservation> {
    if cardinality == 0 || start >= cardinality {
        return Err(OracleError::InsufficientHistory);
    }

    let cardinality = cardinality as u32;
    let start = start as u32;
    let mut steps = steps_back as u32;

    while steps < cardinality {
        let candidate = if steps > start {
            cardinality - steps + start
        } else {
            start - steps
        };
        let index = candidate as u16;

        let observation = source.observation(index);
        if observation.initialized {
            trace!(start, steps, index, "resolved prior observation");
            return Ok(PriorObservation { observation, index });
        }

        trace!(index, "skipping uninitialized observation slot");
        steps += 1;
    }

    if source.observation(start as u16).initialized {
        Err(OracleError::InsufficientCardinality)
    } else {
        Err(OracleError::InsufficientHistory)
    }
}
