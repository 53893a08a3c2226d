//! # Protocol Constants
//!
//! Fundamental constants for the oracle including:
//! - Fixed-point scale factors (Q64, Q96, Q128, Q192)
//! - Tick and sqrt-ratio bounds
//! - Observation ring limits
//! - TWAP defaults

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << 64;

/// Q96 format for sqrt price calculations
pub const Q96: u128 = 1u128 << 96;

/// Shift amounts used by the quote math
pub const RESOLUTION_96: u32 = 96;
pub const RESOLUTION_128: u32 = 128;
pub const RESOLUTION_192: u32 = 192;

// ============================================================================
// Tick Constants
// ============================================================================

/// Minimum tick: log base sqrt(1.0001) of 2^-128
pub const MIN_TICK: i32 = -887_272;

/// Maximum tick: log base sqrt(1.0001) of 2^128
pub const MAX_TICK: i32 = 887_272;

/// Sqrt ratio at MIN_TICK in Q64.96 format
pub const MIN_SQRT_RATIO: u128 = 4_295_128_739;

/// Sqrt ratio at MAX_TICK in Q64.96 format, as (high, low) 128-bit words
pub const MAX_SQRT_RATIO_WORDS: (u128, u128) = (
    0xfffd_8963,
    0xefd1_fc6a_5064_8849_5d95_1d52_6398_8d26,
);

// ============================================================================
// Observation Constants
// ============================================================================

/// Largest cardinality an observation ring can grow to (u16 index space)
pub const MAX_CARDINALITY: u16 = u16::MAX;

/// Bounds of the 56-bit tick accumulator
pub const MAX_TICK_CUMULATIVE: i64 = (1i64 << 55) - 1;
pub const MIN_TICK_CUMULATIVE: i64 = -(1i64 << 55);

// ============================================================================
// Oracle and TWAP Constants
// ============================================================================

/// Default TWAP period (30 minutes)
pub const DEFAULT_TWAP_PERIOD: u32 = 1800;

/// Longest TWAP period accepted by configuration (7 days)
pub const MAX_TWAP_PERIOD: u32 = 7 * 24 * 3600;

/// Maximum hops in a composed route (direct or through the numeraire)
pub const MAX_ROUTE_HOPS: usize = 2;
