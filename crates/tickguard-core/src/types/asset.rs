//! # Asset Types
//!
//! Assets and unordered asset pairs. A pair is stored sorted so that
//! `(a, b)` and `(b, a)` name the same routing key.

use std::fmt;

use super::address::AssetId;

/// An asset identifier plus its decimal scaling.
///
/// Decimals are informational only; tick prices already absorb any fixed
/// decimal difference between the two sides of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub id: AssetId,
    pub decimals: u8,
}

impl Asset {
    pub fn new(id: AssetId, decimals: u8) -> Self {
        Self { id, decimals }
    }
}

/// Unordered asset pair, normalized so `token0 < token1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    pub token0: AssetId,
    pub token1: AssetId,
}

impl AssetPair {
    /// Build a pair from two assets in any order
    pub fn new(a: AssetId, b: AssetId) -> Self {
        if a <= b {
            Self { token0: a, token1: b }
        } else {
            Self { token0: b, token1: a }
        }
    }

    /// Whether `asset` is one side of the pair
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.token0 == *asset || self.token1 == *asset
    }

    /// Whether `asset` is the pair's token0
    pub fn is_token0(&self, asset: &AssetId) -> bool {
        self.token0 == *asset
    }

    /// The side opposite `asset`, if `asset` is in the pair
    pub fn other(&self, asset: &AssetId) -> Option<AssetId> {
        if self.token0 == *asset {
            Some(self.token1)
        } else if self.token1 == *asset {
            Some(self.token0)
        } else {
            None
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}
