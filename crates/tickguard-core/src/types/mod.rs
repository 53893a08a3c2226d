//! # Core Type Definitions
//!
//! Identifiers, observations, and the pool-facing read interface.

pub mod address;
pub mod asset;
pub mod observation;
pub mod pool;

// Re-export all types
pub use address::*;
pub use asset::*;
pub use observation::*;
pub use pool::*;
