//! Pool registry
//!
//! Holds every simulated pool and answers the oracle's directory lookups.
//! Each asset pair has one canonical pool id derived from the pair alone, the
//! way a factory derives pool addresses. Pools registered under any other id
//! are reachable only through a route override.

use std::collections::HashMap;

use tickguard_core::routes::PoolDirectory;
use tickguard_core::{AssetPair, ObservationSource, PoolId, ADDRESS_LEN};
use tracing::info;

use crate::pool::SimulatedPool;
use crate::{SimulationError, SimulationResult};

/// Canonical pool id for a pair: the first twenty bytes of
/// `blake3(token0 || token1)`
pub fn derive_pool_id(pair: &AssetPair) -> PoolId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(pair.token0.as_bytes());
    hasher.update(pair.token1.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(&digest.as_bytes()[..ADDRESS_LEN]);
    PoolId::new(bytes)
}

/// All pools known to a simulation
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: HashMap<PoolId, SimulatedPool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy the canonical pool for `pair`
    pub fn deploy(
        &mut self,
        pair: AssetPair,
        timestamp: u32,
        tick: i32,
    ) -> SimulationResult<PoolId> {
        let id = derive_pool_id(&pair);
        let pool = SimulatedPool::initialize(id, pair, timestamp, tick)?;
        self.register(pool)
    }

    /// Add a pool under its own id
    pub fn register(&mut self, pool: SimulatedPool) -> SimulationResult<PoolId> {
        let id = pool.id();
        if self.pools.contains_key(&id) {
            return Err(SimulationError::PoolExists(id));
        }

        info!(pool = %id, assets = %pool.assets(), "pool registered");
        self.pools.insert(id, pool);
        Ok(id)
    }

    pub fn get(&self, id: &PoolId) -> SimulationResult<&SimulatedPool> {
        self.pools.get(id).ok_or(SimulationError::UnknownPool(*id))
    }

    pub fn get_mut(&mut self, id: &PoolId) -> SimulationResult<&mut SimulatedPool> {
        self.pools.get_mut(id).ok_or(SimulationError::UnknownPool(*id))
    }

    pub fn contains(&self, id: &PoolId) -> bool {
        self.pools.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PoolId, &SimulatedPool)> {
        self.pools.iter()
    }
}

impl PoolDirectory for PoolRegistry {
    type Pool = SimulatedPool;

    fn pool(&self, id: &PoolId) -> Option<&SimulatedPool> {
        self.pools.get(id)
    }

    fn derive_pool(&self, pair: &AssetPair) -> Option<PoolId> {
        Some(derive_pool_id(pair))
    }
}
