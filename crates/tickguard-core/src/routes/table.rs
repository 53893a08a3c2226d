//! # Route Table
//!
//! Owner-controlled pair -> pool overrides. Overrides take precedence over
//! the pool directory's default for a pair and persist until replaced or
//! cleared.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{CoreResult, OracleError};
use crate::types::{AccountId, AssetPair, PoolId};

/// Route overrides plus the single account allowed to change them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    owner: AccountId,
    overrides: HashMap<AssetPair, PoolId>,
}

impl RouteTable {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            overrides: HashMap::new(),
        }
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Fail with `Unauthorized` unless `caller` is the owner
    pub fn ensure_owner(&self, caller: &AccountId) -> CoreResult<()> {
        if *caller != self.owner {
            return Err(OracleError::Unauthorized);
        }
        Ok(())
    }

    /// Override for `pair`, if one is set
    pub fn get(&self, pair: &AssetPair) -> Option<PoolId> {
        self.overrides.get(pair).copied()
    }

    /// Set or replace the override for `pair`, returning the previous one.
    /// Validating that the pool trades `pair` is the caller's job.
    pub fn set(
        &mut self,
        caller: &AccountId,
        pair: AssetPair,
        pool: PoolId,
    ) -> CoreResult<Option<PoolId>> {
        self.ensure_owner(caller)?;
        debug!(%pair, %pool, "route override set");
        Ok(self.overrides.insert(pair, pool))
    }

    /// Remove the override for `pair`, returning it
    pub fn clear(&mut self, caller: &AccountId, pair: &AssetPair) -> CoreResult<Option<PoolId>> {
        self.ensure_owner(caller)?;
        debug!(%pair, "route override cleared");
        Ok(self.overrides.remove(pair))
    }

    /// Hand ownership to `new_owner`
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> CoreResult<()> {
        self.ensure_owner(caller)?;
        debug!(from = %self.owner, to = %new_owner, "route table ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetPair, &PoolId)> {
        self.overrides.iter()
    }
}
