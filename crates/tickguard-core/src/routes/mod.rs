//! # Routing
//!
//! Resolving an asset pair to pools, owner-managed overrides, and the
//! top-level quote entry points.

pub mod route_oracle;
pub mod table;

pub use route_oracle::*;
pub use table::*;

use crate::types::{AssetId, AssetPair, ObservationSource, PoolId};

/// Lookup of pools by id plus the default pool for a pair
pub trait PoolDirectory {
    type Pool: ObservationSource;

    /// The pool registered under `id`
    fn pool(&self, id: &PoolId) -> Option<&Self::Pool>;

    /// The deterministic default pool for `pair`, if one is deployed
    fn derive_pool(&self, pair: &AssetPair) -> Option<PoolId>;
}

/// One pool traversal on a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteHop {
    pub pool: PoolId,
    pub token_in: AssetId,
    pub token_out: AssetId,
}

/// Pools a quote passes through, in order. Empty when input equals output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    pub hops: Vec<RouteHop>,
}

impl RoutePlan {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn direct(pool: PoolId, token_in: AssetId, token_out: AssetId) -> Self {
        Self {
            hops: vec![RouteHop {
                pool,
                token_in,
                token_out,
            }],
        }
    }

    pub fn via(
        first: PoolId,
        second: PoolId,
        token_in: AssetId,
        intermediate: AssetId,
        token_out: AssetId,
    ) -> Self {
        Self {
            hops: vec![
                RouteHop {
                    pool: first,
                    token_in,
                    token_out: intermediate,
                },
                RouteHop {
                    pool: second,
                    token_in: intermediate,
                    token_out,
                },
            ],
        }
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    pub fn is_identity(&self) -> bool {
        self.hops.is_empty()
    }
}
