//! # Safe Math Operations
//!
//! Overflow-checked arithmetic for accumulator and timestamp math, plus the
//! floor division the tick resolvers round with.

use crate::errors::{CoreResult, OracleError};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Matched before the binary arm, which would also accept four tokens
    (cast, $fn_name:ident, $from_type:ty, $to_type:ty) => {
        /// Safe cast with range check
        pub fn $fn_name(value: $from_type) -> CoreResult<$to_type> {
            <$to_type>::try_from(value).map_err(|_| OracleError::ConversionError)
        }
    };

    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Safe arithmetic with overflow/underflow check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };
}

safe_arith!(safe_add_i64, i64, checked_add, OracleError::MathOverflow);
safe_arith!(safe_sub_i64, i64, checked_sub, OracleError::MathOverflow);
safe_arith!(safe_mul_i64, i64, checked_mul, OracleError::MathOverflow);

safe_arith!(safe_add_i32, i32, checked_add, OracleError::MathOverflow);

safe_arith!(cast, safe_cast_i64_to_i32, i64, i32);

/// Integer division rounding toward negative infinity.
///
/// Rust's `/` truncates toward zero, so a negative quotient with a non-zero
/// remainder is one too large.
pub fn div_floor_i64(numerator: i64, denominator: i64) -> CoreResult<i64> {
    if denominator == 0 {
        return Err(OracleError::DivisionByZero);
    }
    let quotient = numerator
        .checked_div(denominator)
        .ok_or(OracleError::MathOverflow)?;
    let remainder = numerator % denominator;
    if remainder != 0 && ((remainder < 0) != (denominator < 0)) {
        return Ok(quotient - 1);
    }
    Ok(quotient)
}

/// Truncating division, as the reference accumulator interpolation uses
pub fn div_trunc_i64(numerator: i64, denominator: i64) -> CoreResult<i64> {
    if denominator == 0 {
        return Err(OracleError::DivisionByZero);
    }
    numerator
        .checked_div(denominator)
        .ok_or(OracleError::MathOverflow)
}

/// Cumulative-tick delta divided by elapsed seconds, floored, as a tick
pub fn average_tick(cumulative_delta: i64, seconds: u32) -> CoreResult<i32> {
    let tick = div_floor_i64(cumulative_delta, seconds as i64)?;
    safe_cast_i64_to_i32(tick)
}
