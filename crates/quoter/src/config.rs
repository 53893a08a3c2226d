use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tickguard_core::{
    AccountId, AssetId, OracleConfig, PoolId, PriorLookup, DEFAULT_TWAP_PERIOD,
};

use crate::error::{QuoterError, QuoterResult};

/// Scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoterConfig {
    /// Block time the queries run at
    pub now: u32,

    /// Name of the asset used for two-hop routes
    pub numeraire: String,

    /// Account that manages route overrides
    pub owner: AccountId,

    /// How the spot resolver finds its second historical sample
    #[serde(default)]
    pub prior_lookup: PriorLookup,

    /// TWAP period for queries that do not set one
    #[serde(default = "default_period")]
    pub default_period: u32,

    pub assets: Vec<AssetConfig>,

    pub pools: Vec<PoolConfig>,

    #[serde(default)]
    pub overrides: Vec<OverrideConfig>,

    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

fn default_period() -> u32 {
    DEFAULT_TWAP_PERIOD
}

/// A named asset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
    pub name: String,
    pub id: AssetId,
}

/// How a pool reports its ring size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingView {
    #[default]
    Populated,
    Allocated,
}

/// A simulated pool and its price history
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Pool name for logging and route overrides
    pub name: String,

    pub token_a: String,
    pub token_b: String,

    /// Pool id; the pair's canonical id when absent. A pool under any other
    /// id is only reachable through an override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PoolId>,

    /// Initialization time and tick
    pub start_time: u32,
    pub start_tick: i32,

    /// Ring size requested at initialization
    #[serde(default = "default_cardinality")]
    pub cardinality: u16,

    #[serde(default)]
    pub view: RingView,

    /// Explicit price moves
    #[serde(default)]
    pub swaps: Vec<SwapConfig>,

    /// Random price moves, used instead of `swaps`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathConfig>,
}

fn default_cardinality() -> u16 {
    1
}

/// One price move
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SwapConfig {
    pub timestamp: u32,
    pub tick: i32,
}

/// Random walk settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathConfig {
    pub seed: u64,
    pub steps: usize,
    pub max_step: i32,
    pub min_interval: u32,
    pub max_interval: u32,
}

/// Route override installed by the owner
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverrideConfig {
    pub token_a: String,
    pub token_b: String,
    /// Pool name
    pub pool: String,
}

/// A quote to run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub token_in: String,
    pub token_out: String,

    /// Raw amount as a decimal string; underscores are allowed
    pub amount: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

impl QuoterConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> QuoterResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            QuoterError::Io(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> QuoterResult<Self> {
        let config: QuoterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> QuoterResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            QuoterError::Io(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Oracle settings with the numeraire resolved
    pub fn oracle_config(&self) -> QuoterResult<OracleConfig> {
        let numeraire = self.asset_id(&self.numeraire)?;
        let config = OracleConfig::new(numeraire, self.owner)
            .with_prior_lookup(self.prior_lookup)
            .with_default_period(self.default_period);
        config.validate()?;
        Ok(config)
    }

    pub fn asset_id(&self, name: &str) -> QuoterResult<AssetId> {
        self.assets
            .iter()
            .find(|asset| asset.name == name)
            .map(|asset| asset.id)
            .ok_or_else(|| QuoterError::UnknownAsset(name.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> QuoterResult<()> {
        if self.assets.is_empty() {
            return Err(QuoterError::invalid_parameter("assets", "empty", "at least one asset"));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for asset in &self.assets {
            if asset.name.is_empty() {
                return Err(QuoterError::invalid_parameter(
                    "asset name",
                    "empty",
                    "non-empty string",
                ));
            }
            if !names.insert(asset.name.as_str()) {
                return Err(QuoterError::InvalidConfig(format!(
                    "duplicate asset name {}",
                    asset.name
                )));
            }
            if !ids.insert(asset.id) {
                return Err(QuoterError::InvalidConfig(format!("duplicate asset id {}", asset.id)));
            }
        }

        self.oracle_config()?;

        let mut pool_names = HashSet::new();
        for pool in &self.pools {
            if !pool_names.insert(pool.name.as_str()) {
                return Err(QuoterError::InvalidConfig(format!(
                    "duplicate pool name {}",
                    pool.name
                )));
            }
            pool.validate(self)?;
        }

        for route in &self.overrides {
            self.asset_id(&route.token_a)?;
            self.asset_id(&route.token_b)?;
            if !pool_names.contains(route.pool.as_str()) {
                return Err(QuoterError::UnknownPool(route.pool.clone()));
            }
        }

        for query in &self.queries {
            self.asset_id(&query.token_in)?;
            self.asset_id(&query.token_out)?;
            query.amount()?;
        }

        Ok(())
    }
}

impl PoolConfig {
    fn validate(&self, config: &QuoterConfig) -> QuoterResult<()> {
        if self.name.is_empty() {
            return Err(QuoterError::invalid_parameter("pool name", "empty", "non-empty string"));
        }

        let token_a = config.asset_id(&self.token_a)?;
        let token_b = config.asset_id(&self.token_b)?;
        if token_a == token_b {
            return Err(QuoterError::InvalidConfig(format!(
                "pool {} pairs {} with itself",
                self.name, self.token_a
            )));
        }

        if self.cardinality == 0 {
            return Err(QuoterError::invalid_parameter("cardinality", "0", "greater than 0"));
        }

        if self.path.is_some() && !self.swaps.is_empty() {
            return Err(QuoterError::InvalidConfig(format!(
                "pool {} sets both swaps and path",
                self.name
            )));
        }

        let mut last = self.start_time;
        for swap in &self.swaps {
            if swap.timestamp < last {
                return Err(QuoterError::invalid_parameter(
                    "swap timestamp",
                    &swap.timestamp.to_string(),
                    &format!("at least {} in pool {}", last, self.name),
                ));
            }
            last = swap.timestamp;
        }

        Ok(())
    }
}

impl QueryConfig {
    pub fn amount(&self) -> QuoterResult<u128> {
        parse_amount(&self.amount)
    }
}

/// Parse a decimal amount, ignoring `_` separators
pub fn parse_amount(raw: &str) -> QuoterResult<u128> {
    let digits: String = raw.chars().filter(|c| *c != '_').collect();
    digits
        .parse::<u128>()
        .map_err(|_| QuoterError::InvalidAmount(raw.to_string()))
}

/// Create example configuration file
pub fn create_example_config(path: impl AsRef<Path>) -> QuoterResult<()> {
    example_config().save(path)
}

/// Three assets around a numeraire, one pool manipulated within the query block
pub fn example_config() -> QuoterConfig {
    let asset = |name: &str, id: u64| AssetConfig {
        name: name.to_string(),
        id: AssetId::from_low_u64(id),
    };
    let query = |label: &str, token_in: &str, token_out: &str| QueryConfig {
        label: Some(label.to_string()),
        token_in: token_in.to_string(),
        token_out: token_out.to_string(),
        amount: "1_000_000_000_000_000_000".to_string(),
        period: None,
    };

    QuoterConfig {
        now: 1_000,
        numeraire: "WETH".to_string(),
        owner: AccountId::from_low_u64(77),
        prior_lookup: PriorLookup::FromPrior,
        default_period: 60,
        assets: vec![asset("TKA", 1), asset("WETH", 5), asset("TKB", 9)],
        pools: vec![
            PoolConfig {
                name: "TKA/WETH".to_string(),
                token_a: "TKA".to_string(),
                token_b: "WETH".to_string(),
                id: None,
                start_time: 900,
                start_tick: 58,
                cardinality: 2,
                view: RingView::Populated,
                swaps: vec![SwapConfig {
                    timestamp: 990,
                    tick: 10,
                }],
                path: None,
            },
            PoolConfig {
                name: "WETH/TKB".to_string(),
                token_a: "WETH".to_string(),
                token_b: "TKB".to_string(),
                id: None,
                start_time: 900,
                start_tick: -12,
                cardinality: 3,
                view: RingView::Populated,
                swaps: vec![
                    SwapConfig {
                        timestamp: 990,
                        tick: 60,
                    },
                    // Pushed far out in the query block
                    SwapConfig {
                        timestamp: 1_000,
                        tick: 9_000,
                    },
                ],
                path: None,
            },
        ],
        overrides: vec![],
        queries: vec![
            query("sell TKA", "TKA", "WETH"),
            query("buy TKA", "WETH", "TKA"),
            query("TKA to TKB", "TKA", "TKB"),
            query("TKB to TKA", "TKB", "TKA"),
        ],
    }
}
