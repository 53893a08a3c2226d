//! # Route Oracle
//!
//! Top-level quote entry points. A query resolves the pair to a direct pool
//! or a two-pool route through the numeraire, resolves spot and TWAP ticks
//! for each pool, and hands them to the quote selector.
//!
//! Queries hold a shared borrow of the pool directory from start to finish,
//! so every read of one query sees the same pool state. Nothing is cached
//! between queries.

use tracing::{debug, info};

use crate::config::OracleConfig;
use crate::errors::{CoreResult, OracleError};
use crate::oracle::{
    consult_spot, consult_twap, select_quote, Clock, HopTicks, PriorLookup, QuoteBreakdown,
};
use crate::routes::{PoolDirectory, RouteHop, RoutePlan, RouteTable};
use crate::types::{AccountId, AssetId, AssetPair, ObservationSource, PoolId};

/// Price oracle over a directory of pools
#[derive(Debug)]
pub struct RouteOracle<D, C> {
    directory: D,
    clock: C,
    routes: RouteTable,
    numeraire: AssetId,
    lookup: PriorLookup,
    default_period: u32,
}

impl<D: PoolDirectory, C: Clock> RouteOracle<D, C> {
    /// Create an oracle from a validated configuration
    pub fn new(config: OracleConfig, directory: D, clock: C) -> CoreResult<Self> {
        config.validate()?;
        info!(
            numeraire = %config.numeraire,
            owner = %config.owner,
            lookup = ?config.prior_lookup,
            "route oracle created"
        );
        Ok(Self {
            directory,
            clock,
            routes: RouteTable::new(config.owner),
            numeraire: config.numeraire,
            lookup: config.prior_lookup,
            default_period: config.default_period,
        })
    }

    pub fn numeraire(&self) -> AssetId {
        self.numeraire
    }

    pub fn owner(&self) -> AccountId {
        self.routes.owner()
    }

    pub fn default_period(&self) -> u32 {
        self.default_period
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Pool state changes between queries go through here
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    /// Amount of `token_out` for `amount_in` of `token_in`, the worse of the
    /// spot and `period`-second TWAP prices
    pub fn asset_to_asset(
        &self,
        token_in: AssetId,
        amount_in: u128,
        token_out: AssetId,
        period: u32,
    ) -> CoreResult<u128> {
        if period == 0 {
            return Err(OracleError::InvalidPeriod);
        }
        if token_in == token_out {
            return Ok(amount_in);
        }
        if amount_in == 0 {
            return Ok(0);
        }
        Ok(self
            .quote_breakdown(token_in, amount_in, token_out, period)?
            .amount_out)
    }

    /// Quote `token_in` in the numeraire
    pub fn asset_to_eth(
        &self,
        token_in: AssetId,
        amount_in: u128,
        period: u32,
    ) -> CoreResult<u128> {
        self.asset_to_asset(token_in, amount_in, self.numeraire, period)
    }

    /// Quote the numeraire in `token_out`
    pub fn eth_to_asset(
        &self,
        amount_in: u128,
        token_out: AssetId,
        period: u32,
    ) -> CoreResult<u128> {
        self.asset_to_asset(self.numeraire, amount_in, token_out, period)
    }

    /// `asset_to_asset` over the configured default period
    pub fn quote(
        &self,
        token_in: AssetId,
        amount_in: u128,
        token_out: AssetId,
    ) -> CoreResult<u128> {
        self.asset_to_asset(token_in, amount_in, token_out, self.default_period)
    }

    /// Same routing as `asset_to_asset`, returning both candidate quotes
    pub fn quote_breakdown(
        &self,
        token_in: AssetId,
        amount_in: u128,
        token_out: AssetId,
        period: u32,
    ) -> CoreResult<QuoteBreakdown> {
        if period == 0 {
            return Err(OracleError::InvalidPeriod);
        }

        let plan = self.route_for(token_in, token_out)?;
        if plan.is_identity() {
            return Ok(QuoteBreakdown::identity(amount_in));
        }

        let now = self.clock.now();
        let hops = plan
            .hops
            .iter()
            .map(|hop| self.hop_ticks(hop, now, period))
            .collect::<CoreResult<Vec<_>>>()?;

        select_quote(&hops, amount_in)
    }

    /// Spot and TWAP ticks for one hop at `now`
    pub fn hop_ticks(&self, hop: &RouteHop, now: u32, period: u32) -> CoreResult<HopTicks> {
        let pool = self
            .directory
            .pool(&hop.pool)
            .ok_or(OracleError::UnknownPool(hop.pool))?;

        let assets = pool.assets();
        if !assets.contains(&hop.token_in) || !assets.contains(&hop.token_out) {
            return Err(OracleError::PoolMismatch {
                pool: hop.pool,
                token_a: hop.token_in,
                token_b: hop.token_out,
            });
        }

        let spot = consult_spot(pool, now, self.lookup)?;
        let twap = consult_twap(pool, now, period)?;
        let ticks = HopTicks::new(spot, twap, assets.is_token0(&hop.token_in));

        debug!(
            pool = %hop.pool,
            spot,
            twap,
            input_is_token0 = ticks.input_is_token0,
            "hop ticks resolved"
        );
        Ok(ticks)
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Pool for a pair: the override if set, else the directory default.
    /// Ids the directory does not know are treated as unresolved.
    pub fn resolve_pool(&self, token_a: AssetId, token_b: AssetId) -> Option<PoolId> {
        let pair = AssetPair::new(token_a, token_b);
        self.routes
            .get(&pair)
            .or_else(|| self.directory.derive_pool(&pair))
            .filter(|id| self.directory.pool(id).is_some())
    }

    /// Direct pool if one resolves, otherwise two hops through the numeraire
    pub fn route_for(&self, token_in: AssetId, token_out: AssetId) -> CoreResult<RoutePlan> {
        if token_in == token_out {
            return Ok(RoutePlan::identity());
        }

        if let Some(pool) = self.resolve_pool(token_in, token_out) {
            return Ok(RoutePlan::direct(pool, token_in, token_out));
        }

        let numeraire = self.numeraire;
        if token_in != numeraire && token_out != numeraire {
            if let (Some(first), Some(second)) = (
                self.resolve_pool(token_in, numeraire),
                self.resolve_pool(numeraire, token_out),
            ) {
                return Ok(RoutePlan::via(first, second, token_in, numeraire, token_out));
            }
        }

        Err(OracleError::no_route(token_in, token_out))
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Point `{token_a, token_b}` at `pool`, returning the previous override
    pub fn set_route_override(
        &mut self,
        caller: &AccountId,
        token_a: AssetId,
        token_b: AssetId,
        pool: PoolId,
    ) -> CoreResult<Option<PoolId>> {
        self.routes.ensure_owner(caller)?;

        let pair = AssetPair::new(token_a, token_b);
        let declared = self
            .directory
            .pool(&pool)
            .ok_or(OracleError::UnknownPool(pool))?
            .assets();
        if declared != pair {
            return Err(OracleError::PoolMismatch {
                pool,
                token_a,
                token_b,
            });
        }

        self.routes.set(caller, pair, pool)
    }

    /// Drop the override for `{token_a, token_b}`, returning it
    pub fn clear_route_override(
        &mut self,
        caller: &AccountId,
        token_a: AssetId,
        token_b: AssetId,
    ) -> CoreResult<Option<PoolId>> {
        self.routes.clear(caller, &AssetPair::new(token_a, token_b))
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> CoreResult<()> {
        self.routes.transfer_ownership(caller, new_owner)
    }
}
