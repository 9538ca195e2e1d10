//! Configuration types for GasGuard

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GAS_LIMIT, DEFAULT_SLIPPAGE, DEFAULT_TOKEN_DECIMALS};
use crate::{ChainId, Error};

/// OKX DEX API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkxConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub secret_key: String,

    #[serde(default)]
    pub passphrase: String,

    /// API base URL (e.g., "https://web3.okx.com")
    #[serde(default = "default_api_domain")]
    pub api_domain: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_domain() -> String {
    "https://web3.okx.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl OkxConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty() && !self.passphrase.is_empty()
    }
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            passphrase: String::new(),
            api_domain: default_api_domain(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Static details for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDetails {
    pub chain_id: ChainId,
    pub name: String,
    pub native_symbol: String,
    pub native_decimals: u32,
    /// Gas limit assumed for a bridge transaction when the route has no estimate
    pub default_gas_limit: Option<u64>,
}

/// Per-chain lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainTable {
    chains: Vec<ChainDetails>,
}

impl ChainTable {
    pub fn new(chains: Vec<ChainDetails>) -> Self {
        Self { chains }
    }

    pub fn get(&self, chain_id: &ChainId) -> Option<&ChainDetails> {
        self.chains.iter().find(|c| &c.chain_id == chain_id)
    }

    pub fn native_decimals(&self, chain_id: &ChainId) -> Option<u32> {
        self.get(chain_id).map(|c| c.native_decimals)
    }

    pub fn native_symbol(&self, chain_id: &ChainId) -> Option<&str> {
        self.get(chain_id).map(|c| c.native_symbol.as_str())
    }

    pub fn default_gas_limit(&self, chain_id: &ChainId) -> Option<u64> {
        self.get(chain_id).and_then(|c| c.default_gas_limit)
    }

    fn set_gas_limit(&mut self, chain_id: &ChainId, gas_limit: u64) {
        if let Some(chain) = self.chains.iter_mut().find(|c| &c.chain_id == chain_id) {
            chain.default_gas_limit = Some(gas_limit);
        }
    }
}

impl Default for ChainTable {
    fn default() -> Self {
        Self::new(vec![
            ChainDetails {
                chain_id: ChainId::new("1"),
                name: "Ethereum".to_string(),
                native_symbol: "ETH".to_string(),
                native_decimals: 18,
                default_gas_limit: Some(300_000),
            },
            ChainDetails {
                chain_id: ChainId::new("42161"),
                name: "Arbitrum".to_string(),
                native_symbol: "ETH".to_string(),
                native_decimals: 18,
                default_gas_limit: Some(1_500_000),
            },
        ])
    }
}

/// Defaults applied by the route scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_slippage")]
    pub default_slippage: String,

    /// Gas limit used when neither the route nor the chain table has one
    #[serde(default = "default_gas_limit")]
    pub default_gas_limit: u64,

    #[serde(default = "default_decimals")]
    pub default_token_decimals: u32,

    #[serde(default = "default_decimals")]
    pub default_native_decimals: u32,

    #[serde(default)]
    pub chains: ChainTable,
}

fn default_slippage() -> String {
    DEFAULT_SLIPPAGE.to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_slippage: default_slippage(),
            default_gas_limit: default_gas_limit(),
            default_token_decimals: default_decimals(),
            default_native_decimals: default_decimals(),
            chains: ChainTable::default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub okx: OkxConfig,

    pub scoring: ScoringConfig,

    #[serde(default = "default_api_host")]
    pub api_host: IpAddr,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_api_port() -> u16 {
    3001
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            okx: OkxConfig::default(),
            scoring: ScoringConfig::default(),
            api_host: default_api_host(),
            api_port: default_api_port(),
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or empty
    /// keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("OKX_API_KEY") {
            config.okx.api_key = v;
        }
        if let Some(v) = get("OKX_SECRET_KEY") {
            config.okx.secret_key = v;
        }
        if let Some(v) = get("OKX_API_PASSPHRASE") {
            config.okx.passphrase = v;
        }
        if let Some(v) = get("OKX_API_DOMAIN") {
            config.okx.api_domain = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("OKX_REQUEST_TIMEOUT_SECS") {
            config.okx.request_timeout_secs = parse_var("OKX_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("DEFAULT_GAS_LIMIT_ETH") {
            let limit = parse_var("DEFAULT_GAS_LIMIT_ETH", &v)?;
            config.scoring.chains.set_gas_limit(&ChainId::new("1"), limit);
            config.scoring.default_gas_limit = limit;
        }
        if let Some(v) = get("DEFAULT_GAS_LIMIT_ARBITRUM") {
            let limit = parse_var("DEFAULT_GAS_LIMIT_ARBITRUM", &v)?;
            config
                .scoring
                .chains
                .set_gas_limit(&ChainId::new("42161"), limit);
        }
        if let Some(v) = get("DEFAULT_SLIPPAGE") {
            config.scoring.default_slippage = v;
        }
        if let Some(v) = get("HOST") {
            config.api_host = parse_var("HOST", &v)?;
        }
        if let Some(v) = get("PORT") {
            config.api_port = parse_var("PORT", &v)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{}={:?}: {}", key, value, e)))
}
