//! OKX DEX API path prefixes and endpoints

pub const AGGREGATOR_PATH_PREFIX: &str = "/api/v5/dex/aggregator";
pub const CROSS_CHAIN_PATH_PREFIX: &str = "/api/v5/dex/cross-chain";
pub const PRE_TRANSACTION_PATH_PREFIX: &str = "/api/v5/dex/pre-transaction";

pub const QUOTE_ENDPOINT: &str = "/quote";
pub const GAS_PRICE_ENDPOINT: &str = "/gas-price";
pub const ALL_TOKENS_ENDPOINT: &str = "/all-tokens";
pub const SUPPORTED_CHAIN_ENDPOINT: &str = "/supported/chain";

/// Envelope `code` value for a successful call
pub const SUCCESS_CODE: &str = "0";
