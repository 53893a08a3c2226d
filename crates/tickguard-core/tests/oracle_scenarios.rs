//! # Oracle Scenario Tests
//!
//! End-to-end quotes against simulated pools whose observation rings are
//! built by replaying swaps, rather than written by hand.

use proptest::prelude::*;
use tickguard_core::oracle::{consult_spot, consult_twap, QuoteSource};
use tickguard_core::*;
use tickguard_simulation::{
    derive_pool_id, CardinalityView, PoolRegistry, PricePath, PricePathConfig, SimulatedPool,
};

const ONE_E18: u128 = 1_000_000_000_000_000_000;
const NOW: u32 = 1_000;

fn token_a() -> AssetId {
    AssetId::from_low_u64(1)
}
fn numeraire() -> AssetId {
    AssetId::from_low_u64(5)
}
fn token_b() -> AssetId {
    AssetId::from_low_u64(9)
}
fn owner() -> AccountId {
    AccountId::from_low_u64(77)
}

/// Pool that sat at `old_tick` from 900 and moved to `new_tick` at 990
fn deploy_two_regimes(
    registry: &mut PoolRegistry,
    a: AssetId,
    b: AssetId,
    old_tick: i32,
    new_tick: i32,
) -> PoolId {
    let id = registry.deploy(AssetPair::new(a, b), 900, old_tick).unwrap();
    let pool = registry.get_mut(&id).unwrap();
    pool.grow(2);
    pool.swap_to_tick(990, new_tick).unwrap();
    id
}

fn hub() -> PoolRegistry {
    let mut registry = PoolRegistry::new();
    // 60s TWAP of 50 under a spot of 10
    deploy_two_regimes(&mut registry, token_a(), numeraire(), 58, 10);
    // 60s TWAP of 0 under a spot of 60
    deploy_two_regimes(&mut registry, numeraire(), token_b(), -12, 60);
    registry
}

fn oracle(registry: PoolRegistry) -> RouteOracle<PoolRegistry, FixedClock> {
    RouteOracle::new(
        OracleConfig::new(numeraire(), owner()).with_default_period(60),
        registry,
        FixedClock::new(NOW),
    )
    .unwrap()
}

#[test]
fn test_direct_quotes_take_worse_price() {
    let oracle = oracle(hub());

    // Selling A: spot tick 10 pays less than TWAP tick 50
    assert_eq!(oracle.quote(token_a(), ONE_E18, numeraire()), Ok(1_001_000_450_120_021_002));

    // Buying A: the higher tick 50 pays less
    let breakdown = oracle
        .quote_breakdown(numeraire(), ONE_E18, token_a(), 60)
        .unwrap();
    assert_eq!(breakdown.spot_tick, 10);
    assert_eq!(breakdown.twap_tick, 50);
    assert_eq!(breakdown.selected, QuoteSource::Twap);
    assert_eq!(breakdown.amount_out, 995_012_727_929_250_903);
}

#[test]
fn test_two_hop_quote_through_numeraire() {
    let oracle = oracle(hub());
    assert_eq!(
        oracle.quote(token_a(), ONE_E18, token_b()),
        Ok(1_005_012_269_623_051_203)
    );
    assert_eq!(
        oracle.quote(token_b(), ONE_E18, token_a()),
        Ok(993_024_790_468_682_113)
    );
    assert_eq!(
        oracle.asset_to_eth(token_b(), ONE_E18, 60),
        oracle.quote(token_b(), ONE_E18, numeraire())
    );
}

#[test]
fn test_same_block_manipulation_is_ignored() {
    let mut registry = PoolRegistry::new();
    let id = registry
        .deploy(AssetPair::new(token_a(), numeraire()), 900, 0)
        .unwrap();
    {
        let pool = registry.get_mut(&id).unwrap();
        pool.grow(4);
        pool.swap_to_tick(950, 20).unwrap();
        pool.swap_to_tick(NOW, 30).unwrap();
        // Second swap in the same block pushes the price far up
        pool.swap_to_tick(NOW, 5_000).unwrap();
    }

    let pool = registry.get(&id).unwrap();
    assert_eq!(pool.tick(), 5_000);
    // Spot falls back to the samples before this block: tick 0 over 900..950
    assert_eq!(consult_spot(pool, NOW, PriorLookup::FromPrior), Ok(0));

    let oracle = oracle(registry);
    let breakdown = oracle
        .quote_breakdown(token_a(), ONE_E18, numeraire(), 100)
        .unwrap();
    assert_eq!(breakdown.spot_tick, 0);
    assert_eq!(breakdown.twap_tick, 10);
    assert_eq!(breakdown.amount_out, ONE_E18);
}

/// Ring of three written at 900, 910, 920 and 930 (wrapping onto slot 0),
/// then grown to four. Slot 3 is allocated but empty.
fn wrapped_then_grown() -> SimulatedPool {
    let mut pool = SimulatedPool::initialize(
        PoolId::from_low_u64(1),
        AssetPair::new(token_a(), numeraire()),
        900,
        0,
    )
    .unwrap();
    pool.grow(3);
    pool.swap_to_tick(910, 10).unwrap();
    pool.swap_to_tick(920, 20).unwrap();
    pool.swap_to_tick(930, 30).unwrap();
    pool.grow(4);
    pool
}

#[test]
fn test_spot_walks_past_grown_slot() {
    let pool = wrapped_then_grown();
    assert_eq!(pool.observation_index(), 0);
    assert!(!pool.observation(3).initialized);

    // Tick 10 over 910..920 in both views
    assert_eq!(consult_spot(&pool, 930, PriorLookup::FromPrior), Ok(10));
    let allocated = pool.clone().with_view(CardinalityView::Allocated);
    assert_eq!(consult_spot(&allocated, 930, PriorLookup::FromPrior), Ok(10));
}

#[test]
fn test_lookup_strategies_diverge_on_grown_ring() {
    let pool = wrapped_then_grown();
    assert_eq!(consult_spot(&pool, 930, PriorLookup::FromStart), Ok(10));

    // Two steps back from slot 0 lands on slot 2, the same sample the first
    // lookup skipped to
    let allocated = pool.with_view(CardinalityView::Allocated);
    assert_eq!(
        consult_spot(&allocated, 930, PriorLookup::FromStart),
        Err(OracleError::InsufficientHistory)
    );
}

#[test]
fn test_single_sample_ring_needs_growth() {
    let mut registry = PoolRegistry::new();
    let id = registry
        .deploy(AssetPair::new(token_a(), numeraire()), 900, 0)
        .unwrap();
    registry.get_mut(&id).unwrap().swap_to_tick(NOW, 3).unwrap();

    let oracle = oracle(registry);
    assert_eq!(
        oracle.quote(token_a(), ONE_E18, numeraire()),
        Err(OracleError::InsufficientCardinality)
    );
}

#[test]
fn test_override_routes_to_registered_pool() {
    let mut registry = hub();
    let canonical = derive_pool_id(&AssetPair::new(token_a(), numeraire()));

    let custom = PoolId::from_low_u64(500);
    let mut pool =
        SimulatedPool::initialize(custom, AssetPair::new(token_a(), numeraire()), 900, 25).unwrap();
    pool.grow(2);
    pool.swap_to_tick(990, 25).unwrap();
    registry.register(pool).unwrap();

    let mut oracle = oracle(registry);
    assert_eq!(oracle.resolve_pool(token_a(), numeraire()), Some(canonical));

    let previous = oracle
        .set_route_override(&owner(), numeraire(), token_a(), custom)
        .unwrap();
    assert_eq!(previous, None);
    assert_eq!(oracle.resolve_pool(token_a(), numeraire()), Some(custom));
    assert_eq!(
        oracle.quote(token_a(), ONE_E18, numeraire()),
        Ok(1_002_503_002_301_265_531)
    );

    assert_eq!(
        oracle.set_route_override(&AccountId::from_low_u64(1), token_a(), numeraire(), custom),
        Err(OracleError::Unauthorized)
    );

    oracle
        .clear_route_override(&owner(), token_a(), numeraire())
        .unwrap();
    assert_eq!(
        oracle.quote(token_a(), ONE_E18, numeraire()),
        Ok(1_001_000_450_120_021_002)
    );
}

#[test]
fn test_clock_advances_past_history() {
    let mut oracle = oracle(hub());
    assert!(oracle.quote(token_a(), ONE_E18, numeraire()).is_ok());

    // Ring only reaches back to 900
    oracle.clock_mut().set(NOW + 60);
    assert_eq!(
        oracle.asset_to_asset(token_a(), ONE_E18, numeraire(), 161),
        Err(OracleError::InsufficientHistory)
    );
    // Spot 10 held since 990, so the window is constant
    assert_eq!(
        oracle.asset_to_asset(token_a(), ONE_E18, numeraire(), 60),
        Ok(1_001_000_450_120_021_002)
    );
}

proptest! {
    #[test]
    fn prop_twap_matches_replayed_path(
        seed in any::<u64>(),
        start_tick in -200_000i32..200_000,
        extra in 0u32..120,
        period_seed in any::<u32>(),
    ) {
        let start_time = 1_000_000;
        let pair = AssetPair::new(token_a(), numeraire());
        let mut registry = PoolRegistry::new();
        let id = registry.deploy(pair, start_time, start_tick).unwrap();
        registry.get_mut(&id).unwrap().grow(128);

        let config = PricePathConfig {
            start_time,
            start_tick,
            seed,
            steps: 100,
            ..Default::default()
        };
        let path = PricePath::generate(&config).unwrap();
        let pool = registry.get_mut(&id).unwrap();
        for point in path.points() {
            pool.swap_to_tick(point.timestamp, point.tick).unwrap();
        }

        let last = *path.last().unwrap();
        let now = last.timestamp + extra;
        let period = period_seed % (now - start_time) + 1;
        let sum = path.time_weighted_tick_sum(start_tick, now - period, now);
        let expected = sum.div_euclid(period as i64) as i32;

        let pool = registry.get(&id).unwrap();
        prop_assert_eq!(consult_twap(pool, now, period).unwrap(), expected);
        if extra > 0 {
            prop_assert_eq!(consult_spot(pool, now, PriorLookup::FromPrior).unwrap(), last.tick);
        }
    }
}
