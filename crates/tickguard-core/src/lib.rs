//! # Tickguard Core - Observation-Ring Price Oracle
//!
//! This crate derives a manipulation-resistant exchange rate between two assets
//! from a liquidity pool's price-history ring buffer. It provides:
//!
//! - Fixed-point tick math (tick -> sqrt ratio -> quote amount)
//! - A ring-buffer walker that tolerates lazily grown, partially
//!   uninitialized observation rings
//! - Spot and TWAP tick resolvers
//! - Worse-of-spot-or-TWAP quote selection with multi-hop tick composition
//! - A route oracle with owner-gated route overrides
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain use

pub mod config;
pub mod constants;
pub mod errors;
pub mod math;
pub mod oracle;
pub mod routes;
pub mod types;

// Re-export commonly used items
pub use config::OracleConfig;
pub use constants::*;
pub use errors::{CoreResult, OracleError};
pub use oracle::{Clock, FixedClock, PriorLookup, QuoteBreakdown, SystemClock};
pub use routes::{PoolDirectory, RouteOracle, RouteTable};
pub use types::*;
