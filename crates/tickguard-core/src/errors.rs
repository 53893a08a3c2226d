//! # Core Error Types
//!
//! Every failure the oracle can surface. Each variant is a distinct,
//! inspectable condition; nothing is retried internally because every query
//! is a deterministic read.

use thiserror::Error;

use crate::types::{AssetId, PoolId};

/// Core oracle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    // ========================================================================
    // Caller Errors
    // ========================================================================

    #[error("Invalid period: TWAP period must be greater than zero")]
    InvalidPeriod,

    #[error("No route between {token_in} and {token_out}")]
    NoRoute { token_in: AssetId, token_out: AssetId },

    #[error("Route needs 1 to {1} hops, got {0}")]
    InvalidHopCount(usize, usize),

    // ========================================================================
    // Observation History Errors
    // ========================================================================

    /// The ring holds too few initialized samples for the request
    #[error("Insufficient observation history")]
    InsufficientHistory,

    /// Fewer than two distinct initialized samples; the ring must be grown
    #[error("Insufficient observation cardinality")]
    InsufficientCardinality,

    // ========================================================================
    // Route Administration Errors
    // ========================================================================

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Pool {pool} does not trade {token_a}/{token_b}")]
    PoolMismatch {
        pool: PoolId,
        token_a: AssetId,
        token_b: AssetId,
    },

    #[error("Unknown pool {0}")]
    UnknownPool(PoolId),

    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Tick {0} out of range")]
    TickOutOfRange(i64),

    #[error("Math overflow")]
    MathOverflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Mul div overflow")]
    MulDivOverflow,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, OracleError>;

impl OracleError {
    /// Create a no-route error for a pair
    pub fn no_route(token_in: AssetId, token_out: AssetId) -> Self {
        Self::NoRoute { token_in, token_out }
    }

    /// Create a hop count error
    pub fn invalid_hop_count(actual: usize, max: usize) -> Self {
        Self::InvalidHopCount(actual, max)
    }

    /// Create a configuration error with reason
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Whether waiting for more observations (rather than changing the
    /// request) can resolve this error
    pub fn is_history_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientHistory | Self::InsufficientCardinality
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let a = AssetId::from_low_u64(1);
        let b = AssetId::from_low_u64(2);
        let err = OracleError::no_route(a, b);
        assert_eq!(
            format!("{}", err),
            format!("No route between {} and {}", a, b)
        );

        let err = OracleError::invalid_hop_count(3, 2);
        assert_eq!(format!("{}", err), "Route needs 1 to 2 hops, got 3");

        let err = OracleError::TickOutOfRange(900_000);
        assert_eq!(format!("{}", err), "Tick 900000 out of range");
    }

    #[test]
    fn test_history_classification() {
        assert!(OracleError::InsufficientHistory.is_history_error());
        assert!(OracleError::InsufficientCardinality.is_history_error());
        assert!(!OracleError::InvalidPeriod.is_history_error());
        assert!(!OracleError::Unauthorized.is_history_error());
    }
}
