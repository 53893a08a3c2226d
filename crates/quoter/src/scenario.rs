//! Scenario construction and query execution
//!
//! A scenario replays each configured pool's price history up to the query
//! time, hands the resulting registry to a route oracle, installs the
//! configured overrides, then runs queries against that fixed snapshot.

use std::collections::HashMap;

use serde::Serialize;
use tickguard_core::{
    AssetId, AssetPair, FixedClock, OracleError, PoolId, QuoteBreakdown, RouteOracle,
};
use tickguard_simulation::{
    derive_pool_id, CardinalityView, PoolEvent, PoolRegistry, PricePath, PricePathConfig,
    ScenarioRunner, SimulatedPool,
};
use tracing::{debug, info, warn};

use crate::config::{PoolConfig, QueryConfig, QuoterConfig, RingView};
use crate::error::{QuoterError, QuoterResult};

/// Oracle over simulated pools, with name lookups
pub struct Scenario {
    oracle: RouteOracle<PoolRegistry, FixedClock>,
    assets: HashMap<String, AssetId>,
    pools: HashMap<String, PoolId>,
    default_period: u32,
}

/// Result of one query
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub label: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: u128,
    pub period: u32,
    pub outcome: QueryOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum QueryOutcome {
    Quoted {
        amount_out: u128,
        /// Pool names along the route
        route: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        breakdown: Option<QuoteBreakdown>,
    },
    Failed {
        error: String,
    },
}

impl QueryOutcome {
    pub fn amount_out(&self) -> Option<u128> {
        match self {
            QueryOutcome::Quoted { amount_out, .. } => Some(*amount_out),
            QueryOutcome::Failed { .. } => None,
        }
    }
}

impl Scenario {
    pub fn build(config: &QuoterConfig) -> QuoterResult<Self> {
        config.validate()?;

        let assets: HashMap<String, AssetId> = config
            .assets
            .iter()
            .map(|asset| (asset.name.clone(), asset.id))
            .collect();

        let mut runner = ScenarioRunner::new(PoolRegistry::new());
        let mut pools = HashMap::new();
        for pool_config in &config.pools {
            let id = schedule_pool(&mut runner, config, pool_config)?;
            pools.insert(pool_config.name.clone(), id);
        }

        let summary = runner.run_until(config.now)?;
        if runner.pending() > 0 {
            warn!(
                skipped = runner.pending(),
                now = config.now,
                "events after the query time were not applied"
            );
        }
        debug!(applied = summary.events_applied, "pool histories replayed");

        let oracle_config = config.oracle_config()?;
        let mut oracle = RouteOracle::new(
            oracle_config,
            runner.into_registry(),
            FixedClock::new(config.now),
        )?;

        for route in &config.overrides {
            let pool = *pools
                .get(&route.pool)
                .ok_or_else(|| QuoterError::UnknownPool(route.pool.clone()))?;
            oracle.set_route_override(
                &config.owner,
                config.asset_id(&route.token_a)?,
                config.asset_id(&route.token_b)?,
                pool,
            )?;
            info!(
                pool = %route.pool,
                token_a = %route.token_a,
                token_b = %route.token_b,
                "route override installed"
            );
        }

        Ok(Self {
            oracle,
            assets,
            pools,
            default_period: config.default_period,
        })
    }

    pub fn oracle(&self) -> &RouteOracle<PoolRegistry, FixedClock> {
        &self.oracle
    }

    pub fn asset(&self, name: &str) -> QuoterResult<AssetId> {
        self.assets
            .get(name)
            .copied()
            .ok_or_else(|| QuoterError::UnknownAsset(name.to_string()))
    }

    pub fn pool(&self, name: &str) -> QuoterResult<PoolId> {
        self.pools
            .get(name)
            .copied()
            .ok_or_else(|| QuoterError::UnknownPool(name.to_string()))
    }

    fn pool_name(&self, id: &PoolId) -> String {
        self.pools
            .iter()
            .find(|(_, pool)| *pool == id)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Run one query. Oracle failures are reported in the outcome rather
    /// than returned.
    pub fn run_query(&self, query: &QueryConfig) -> QuoterResult<QueryReport> {
        let token_in = self.asset(&query.token_in)?;
        let token_out = self.asset(&query.token_out)?;
        let amount_in = query.amount()?;
        let period = query.period.unwrap_or(self.default_period);

        let outcome = match self.quote(token_in, amount_in, token_out, period) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(%error, "query failed");
                QueryOutcome::Failed {
                    error: error.to_string(),
                }
            }
        };

        Ok(QueryReport {
            label: query
                .label
                .clone()
                .unwrap_or_else(|| format!("{} -> {}", query.token_in, query.token_out)),
            token_in: query.token_in.clone(),
            token_out: query.token_out.clone(),
            amount_in,
            period,
            outcome,
        })
    }

    pub fn run_queries(&self, queries: &[QueryConfig]) -> QuoterResult<Vec<QueryReport>> {
        queries.iter().map(|query| self.run_query(query)).collect()
    }

    fn quote(
        &self,
        token_in: AssetId,
        amount_in: u128,
        token_out: AssetId,
        period: u32,
    ) -> Result<QueryOutcome, OracleError> {
        let amount_out = self
            .oracle
            .asset_to_asset(token_in, amount_in, token_out, period)?;
        if amount_in == 0 || token_in == token_out {
            return Ok(QueryOutcome::Quoted {
                amount_out,
                route: vec![],
                breakdown: None,
            });
        }

        let plan = self.oracle.route_for(token_in, token_out)?;
        let breakdown = self
            .oracle
            .quote_breakdown(token_in, amount_in, token_out, period)?;
        Ok(QueryOutcome::Quoted {
            amount_out,
            route: plan.hops.iter().map(|hop| self.pool_name(&hop.pool)).collect(),
            breakdown: Some(breakdown),
        })
    }
}

fn schedule_pool(
    runner: &mut ScenarioRunner,
    config: &QuoterConfig,
    pool_config: &PoolConfig,
) -> QuoterResult<PoolId> {
    let pair = AssetPair::new(
        config.asset_id(&pool_config.token_a)?,
        config.asset_id(&pool_config.token_b)?,
    );
    let id = pool_config.id.unwrap_or_else(|| derive_pool_id(&pair));
    let view = match pool_config.view {
        RingView::Populated => CardinalityView::Populated,
        RingView::Allocated => CardinalityView::Allocated,
    };

    let pool = SimulatedPool::initialize(id, pair, pool_config.start_time, pool_config.start_tick)?
        .with_view(view);
    runner.registry_mut().register(pool)?;

    runner.schedule(PoolEvent::grow(
        id,
        pool_config.start_time,
        pool_config.cardinality,
    ));
    for swap in &pool_config.swaps {
        runner.schedule(PoolEvent::swap(id, swap.timestamp, swap.tick));
    }
    if let Some(path) = &pool_config.path {
        let path = PricePath::generate(&PricePathConfig {
            start_time: pool_config.start_time,
            start_tick: pool_config.start_tick,
            max_step: path.max_step,
            min_interval: path.min_interval,
            max_interval: path.max_interval,
            steps: path.steps,
            seed: path.seed,
        })?;
        runner.schedule_path(id, &path);
    }

    debug!(pool = %pool_config.name, %id, "pool scheduled");
    Ok(id)
}
