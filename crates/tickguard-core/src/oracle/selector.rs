//! # Quote Selection
//!
//! Converts resolved ticks into an output amount, taking the worse of the
//! spot and TWAP outcomes. A route through two pools sums each side's ticks
//! first and selects once: picking per hop and chaining the picks would not
//! bound the worst case across both hops.

use tracing::debug;

use crate::constants::MAX_ROUTE_HOPS;
use crate::errors::{CoreResult, OracleError};
use crate::math::tick_math::{check_tick, tick_to_amount};

/// Ticks resolved for one pool of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct HopTicks {
    pub spot: i32,
    pub twap: i32,
    /// Whether the hop's input asset is its pool's token0
    pub input_is_token0: bool,
}

impl HopTicks {
    pub fn new(spot: i32, twap: i32, input_is_token0: bool) -> Self {
        Self {
            spot,
            twap,
            input_is_token0,
        }
    }

    /// Ticks expressed as "price of output in input", so they add along a path
    fn oriented(&self) -> (i64, i64) {
        if self.input_is_token0 {
            (self.spot as i64, self.twap as i64)
        } else {
            (-(self.spot as i64), -(self.twap as i64))
        }
    }
}

/// Which tick the final amount came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteSource {
    Spot,
    Twap,
}

/// Both candidate quotes and the selected one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteBreakdown {
    /// Number of pools on the route; zero when input and output coincide
    pub hops: usize,
    pub spot_tick: i32,
    pub twap_tick: i32,
    /// Direction the composite ticks were applied in
    pub input_is_token0: bool,
    pub spot_amount: u128,
    pub twap_amount: u128,
    pub amount_out: u128,
    pub selected: QuoteSource,
}

impl QuoteBreakdown {
    /// Quote for swapping an asset into itself
    pub fn identity(amount_in: u128) -> Self {
        Self {
            hops: 0,
            spot_tick: 0,
            twap_tick: 0,
            input_is_token0: true,
            spot_amount: amount_in,
            twap_amount: amount_in,
            amount_out: amount_in,
            selected: QuoteSource::Spot,
        }
    }
}

/// Quote `amount_in` along `hops`, returning the smaller of the spot and
/// TWAP outcomes.
///
/// A single hop is priced in its native direction. Two hops are composed by
/// summing oriented ticks and pricing the composite in the token0 -> token1
/// direction.
pub fn select_quote(hops: &[HopTicks], amount_in: u128) -> CoreResult<QuoteBreakdown> {
    let (spot_tick, twap_tick, input_is_token0) = match hops {
        [hop] => (hop.spot, hop.twap, hop.input_is_token0),
        [first, second] => {
            let (first_spot, first_twap) = first.oriented();
            let (second_spot, second_twap) = second.oriented();
            (
                check_tick(first_spot + second_spot)?,
                check_tick(first_twap + second_twap)?,
                true,
            )
        }
        _ => return Err(OracleError::invalid_hop_count(hops.len(), MAX_ROUTE_HOPS)),
    };

    let spot_amount = tick_to_amount(spot_tick, amount_in, input_is_token0)?;
    let twap_amount = tick_to_amount(twap_tick, amount_in, input_is_token0)?;

    let (amount_out, selected) = if spot_amount <= twap_amount {
        (spot_amount, QuoteSource::Spot)
    } else {
        (twap_amount, QuoteSource::Twap)
    };

    debug!(
        hops = hops.len(),
        spot_tick,
        twap_tick,
        spot_amount = %spot_amount,
        twap_amount = %twap_amount,
        ?selected,
        "quote selected"
    );

    Ok(QuoteBreakdown {
        hops: hops.len(),
        spot_tick,
        twap_tick,
        input_is_token0,
        spot_amount,
        twap_amount,
        amount_out,
        selected,
    })
}
