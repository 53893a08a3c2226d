//! Error types for the quoter

use thiserror::Error;
use tickguard_core::OracleError;
use tickguard_simulation::SimulationError;

#[derive(Error, Debug)]
pub enum QuoterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Unknown pool: {0}")]
    UnknownPool(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl QuoterError {
    pub fn invalid_parameter(name: &str, value: &str, expected: &str) -> Self {
        QuoterError::InvalidConfig(format!("{} = {}, expected {}", name, value, expected))
    }
}

impl From<std::io::Error> for QuoterError {
    fn from(err: std::io::Error) -> Self {
        QuoterError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for QuoterError {
    fn from(err: toml::de::Error) -> Self {
        QuoterError::SerializationError(err.to_string())
    }
}

impl From<toml::ser::Error> for QuoterError {
    fn from(err: toml::ser::Error) -> Self {
        QuoterError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for QuoterError {
    fn from(err: serde_json::Error) -> Self {
        QuoterError::SerializationError(err.to_string())
    }
}

pub type QuoterResult<T> = std::result::Result<T, QuoterError>;
