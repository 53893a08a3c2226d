//! # Tickguard Quoter
//!
//! Loads a TOML scenario of assets, simulated pools and their price moves,
//! builds a route oracle over them and runs the configured quote queries.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{
    create_example_config, example_config, AssetConfig, OverrideConfig, PathConfig, PoolConfig,
    QueryConfig, QuoterConfig, RingView, SwapConfig,
};
pub use error::{QuoterError, QuoterResult};
pub use scenario::{QueryOutcome, QueryReport, Scenario};
