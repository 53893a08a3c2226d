//! # Tick Math
//!
//! Conversions from ticks to Q64.96 sqrt ratios and from ticks to quote
//! amounts. Results are bit-exact with the reference on-chain tick math since
//! they determine settlement amounts.

use ethnum::U256;

use crate::constants::{MAX_TICK, MIN_TICK, RESOLUTION_128, RESOLUTION_192};
use crate::errors::{CoreResult, OracleError};
use crate::math::big_int::{mul_div_floor, u256_to_u128};

/// sqrt(1.0001)^(-2^i) in Q128, for i = 1..=19 (bit 0 seeds the ratio)
const MAGIC_SQRT_RATIOS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// sqrt(1.0001)^-1 in Q128
const MAGIC_SQRT_RATIO_BIT0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// Check whether a tick is inside the representable range
pub fn is_tick_valid(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Validate a tick that may come from summing several hops
pub fn check_tick(tick: i64) -> CoreResult<i32> {
    if tick < MIN_TICK as i64 || tick > MAX_TICK as i64 {
        return Err(OracleError::TickOutOfRange(tick));
    }
    Ok(tick as i32)
}

/// Get sqrt(1.0001^tick) as a Q64.96 value
pub fn get_sqrt_ratio_at_tick(tick: i32) -> CoreResult<U256> {
    let tick = check_tick(tick as i64)?;
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(MAGIC_SQRT_RATIO_BIT0)
    } else {
        U256::ONE << RESOLUTION_128
    };

    // ratio < 2^129 and every constant < 2^128, so the product fits
    for (mask, magic) in MAGIC_SQRT_RATIOS {
        if abs_tick & mask != 0 {
            ratio = (ratio * U256::from(magic)) >> RESOLUTION_128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q128.96, rounding up
    let round_up = if ratio & U256::from(u32::MAX) != U256::ZERO {
        U256::ONE
    } else {
        U256::ZERO
    };
    Ok((ratio >> 32u32) + round_up)
}

/// Amount of quote received for `base_amount` at `tick`.
///
/// `base_is_token0` picks the direction: token0 -> token1 multiplies by
/// `1.0001^tick`, token1 -> token0 divides by it. Both paths round down.
pub fn get_quote_at_tick(tick: i32, base_amount: u128, base_is_token0: bool) -> CoreResult<U256> {
    let sqrt_ratio = get_sqrt_ratio_at_tick(tick)?;
    let base = U256::from(base_amount);

    // Square in 256 bits when possible; otherwise drop 64 bits of precision
    if sqrt_ratio <= U256::from(u128::MAX) {
        let ratio_x192 = sqrt_ratio * sqrt_ratio;
        let one_x192 = U256::ONE << RESOLUTION_192;
        if base_is_token0 {
            mul_div_floor(ratio_x192, base, one_x192)
        } else {
            mul_div_floor(one_x192, base, ratio_x192)
        }
    } else {
        let ratio_x128 = mul_div_floor(sqrt_ratio, sqrt_ratio, U256::ONE << 64u32)?;
        let one_x128 = U256::ONE << RESOLUTION_128;
        if base_is_token0 {
            mul_div_floor(ratio_x128, base, one_x128)
        } else {
            mul_div_floor(one_x128, base, ratio_x128)
        }
    }
}

/// Convert `amount_in` to an output amount at `tick`, narrowed to u128
pub fn tick_to_amount(tick: i32, amount_in: u128, input_is_base: bool) -> CoreResult<u128> {
    u256_to_u128(get_quote_at_tick(tick, amount_in, input_is_base)?)
}
