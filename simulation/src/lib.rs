//! Simulation framework for testing the tickguard oracle
//!
//! Provides utilities for:
//! - Pools that record observations with on-chain write and grow semantics
//! - A pool registry that serves as the oracle's pool directory
//! - Seeded random price paths
//! - Replaying swap timelines across pools

pub mod pool;
pub mod price_path;
pub mod registry;
pub mod scenario_runner;

pub use pool::{CardinalityView, SimulatedPool};
pub use price_path::{PricePath, PricePathConfig, PricePoint};
pub use registry::{derive_pool_id, PoolRegistry};
pub use scenario_runner::{PoolEvent, RunSummary, ScenarioRunner};

use tickguard_core::{OracleError, PoolId};

/// Simulation error type
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Oracle error: {0}")]
    Core(#[from] OracleError),

    #[error("Unknown pool {0}")]
    UnknownPool(PoolId),

    #[error("Pool {0} already deployed")]
    PoolExists(PoolId),

    #[error("Timestamp {next} precedes last observation at {last}")]
    TimestampRegression { last: u32, next: u32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Simulation result type
pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
