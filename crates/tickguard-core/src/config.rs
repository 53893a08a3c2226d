//! # Oracle Configuration
//!
//! Deployment-time settings for a route oracle.

use crate::constants::{DEFAULT_TWAP_PERIOD, MAX_TWAP_PERIOD};
use crate::errors::{CoreResult, OracleError};
use crate::oracle::PriorLookup;
use crate::types::{AccountId, AssetId};

/// Route oracle settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleConfig {
    /// Intermediate asset for two-hop routes and the fixed side of the
    /// `asset_to_eth` / `eth_to_asset` wrappers
    pub numeraire: AssetId,
    /// Account allowed to manage route overrides
    pub owner: AccountId,
    /// How the spot resolver finds its second historical sample
    #[cfg_attr(feature = "client", serde(default))]
    pub prior_lookup: PriorLookup,
    /// TWAP period used when a caller does not supply one
    #[cfg_attr(feature = "client", serde(default = "default_period"))]
    pub default_period: u32,
}

#[cfg(feature = "client")]
fn default_period() -> u32 {
    DEFAULT_TWAP_PERIOD
}

impl OracleConfig {
    /// Config with the default lookup and TWAP period
    pub fn new(numeraire: AssetId, owner: AccountId) -> Self {
        Self {
            numeraire,
            owner,
            prior_lookup: PriorLookup::default(),
            default_period: DEFAULT_TWAP_PERIOD,
        }
    }

    pub fn with_prior_lookup(mut self, lookup: PriorLookup) -> Self {
        self.prior_lookup = lookup;
        self
    }

    pub fn with_default_period(mut self, period: u32) -> Self {
        self.default_period = period;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.default_period == 0 {
            return Err(OracleError::invalid_config("default_period must be greater than 0"));
        }
        if self.default_period > MAX_TWAP_PERIOD {
            return Err(OracleError::invalid_config(format!(
                "default_period must be at most {} seconds",
                MAX_TWAP_PERIOD
            )));
        }
        Ok(())
    }
}
