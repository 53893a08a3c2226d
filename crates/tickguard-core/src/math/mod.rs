//! # Mathematical Functions
//!
//! Pure fixed-point math used by the oracle: wide multiplication and division,
//! checked arithmetic helpers, and tick to price conversion.

pub mod big_int;
pub mod safe_math;
pub mod tick_math;

// Re-export commonly used functions
pub use big_int::*;
pub use safe_math::*;
pub use tick_math::*;
