//! Big integer operations for high-precision math
//!
//! 256-bit values come from `ethnum`. Products of two 256-bit values are
//! carried in a [`U512`] so that `mul_div` never loses bits before dividing.

use ethnum::U256;

use crate::errors::{CoreResult, OracleError};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 512-bit unsigned integer, only used as a product intermediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U512 {
    /// High 256 bits
    pub hi: U256,
    /// Low 256 bits
    pub lo: U256,
}

impl U512 {
    pub const ZERO: U512 = U512 {
        hi: U256::ZERO,
        lo: U256::ZERO,
    };

    /// Create a new U512 from high and low halves
    pub const fn new(hi: U256, lo: U256) -> Self {
        Self { hi, lo }
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.hi == U256::ZERO && self.lo == U256::ZERO
    }

    /// Divide by a 256-bit divisor.
    ///
    /// Returns `(quotient, remainder)`. The quotient must fit in 256 bits,
    /// which holds exactly when `hi < divisor`.
    pub fn div_rem(&self, divisor: U256) -> CoreResult<(U256, U256)> {
        if divisor == U256::ZERO {
            return Err(OracleError::DivisionByZero);
        }

        if self.hi == U256::ZERO {
            return Ok((self.lo / divisor, self.lo % divisor));
        }

        if self.hi >= divisor {
            return Err(OracleError::MulDivOverflow);
        }

        // Restoring long division, one bit of `lo` per step. The running
        // remainder stays below `divisor`, so after the shift it is below
        // 2 * divisor and a single conditional subtraction restores it.
        let mut remainder = self.hi;
        let mut quotient = U256::ZERO;
        for i in (0..256u32).rev() {
            let carry = remainder >> 255u32 != U256::ZERO;
            let bit = (self.lo >> i) & U256::ONE;
            remainder = (remainder << 1u32) | bit;
            quotient = quotient << 1u32;
            if carry || remainder >= divisor {
                remainder = remainder.wrapping_sub(divisor);
                quotient |= U256::ONE;
            }
        }

        Ok((quotient, remainder))
    }
}

impl PartialOrd for U512 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U512 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Equal => self.lo.cmp(&other.lo),
            ordering => ordering,
        }
    }
}

/// Multiply two u128 values into a U256; cannot overflow
pub fn mul_u128_to_u256(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Full 256 x 256 -> 512 bit multiplication
pub fn full_mul(a: U256, b: U256) -> U512 {
    let (a1, a0) = a.into_words();
    let (b1, b0) = b.into_words();

    let p00 = mul_u128_to_u256(a0, b0);
    let p01 = mul_u128_to_u256(a0, b1);
    let p10 = mul_u128_to_u256(a1, b0);
    let p11 = mul_u128_to_u256(a1, b1);

    // Cross terms sit at bit 128; a carry out of their sum lands at bit 384
    let (mid, mid_carry) = p01.overflowing_add(p10);
    let (lo, lo_carry) = p00.overflowing_add(mid << 128u32);

    let mut hi = p11 + (mid >> 128u32);
    if mid_carry {
        hi += U256::ONE << 128u32;
    }
    if lo_carry {
        hi += U256::ONE;
    }

    U512::new(hi, lo)
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    let (quotient, remainder) = full_mul(a, b).div_rem(denominator)?;

    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up if remainder == U256::ZERO => Ok(quotient),
        Rounding::Up => quotient
            .checked_add(U256::ONE)
            .ok_or(OracleError::MulDivOverflow),
    }
}

/// Round-down `mul_div`, the only mode the quote math needs
pub fn mul_div_floor(a: U256, b: U256, denominator: U256) -> CoreResult<U256> {
    mul_div(a, b, denominator, Rounding::Down)
}

/// Narrow a U256 to u128
pub fn u256_to_u128(value: U256) -> CoreResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(OracleError::MathOverflow);
    }
    Ok(lo)
}
