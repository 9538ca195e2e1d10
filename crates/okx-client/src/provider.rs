//! Provider traits consumed by the route scorer
//!
//! [`OkxClient`](crate::OkxClient) implements all three; tests substitute stubs.

use async_trait::async_trait;
use gasguard_core::{BaseUnits, ChainId, TokenAddress};

use crate::models::{CrossChainQuote, GasPriceEntry, TokenListing};
use crate::{OkxClient, Result};

/// Parameters of a cross-chain quote request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteQuery {
    pub from_chain_id: ChainId,
    pub to_chain_id: ChainId,
    pub from_token_address: TokenAddress,
    pub to_token_address: TokenAddress,
    /// Source amount in source-token base units
    pub amount: BaseUnits,
    /// Slippage tolerance as a percentage string (e.g. "0.5")
    pub slippage: String,
}

impl QuoteQuery {
    /// Query parameters in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fromChainId", self.from_chain_id.to_string()),
            ("toChainId", self.to_chain_id.to_string()),
            ("fromTokenAddress", self.from_token_address.to_string()),
            ("toTokenAddress", self.to_token_address.to_string()),
            ("amount", self.amount.to_string()),
            ("slippage", self.slippage.clone()),
        ]
    }
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn cross_chain_quotes(&self, query: &QuoteQuery) -> Result<Vec<CrossChainQuote>>;
}

#[async_trait]
pub trait GasPriceProvider: Send + Sync {
    async fn gas_price_feed(&self, chain_id: &ChainId) -> Result<Vec<GasPriceEntry>>;
}

#[async_trait]
pub trait TokenListProvider: Send + Sync {
    async fn token_list(&self, chain_id: &ChainId) -> Result<Vec<TokenListing>>;
}

#[async_trait]
impl QuoteProvider for OkxClient {
    async fn cross_chain_quotes(&self, query: &QuoteQuery) -> Result<Vec<CrossChainQuote>> {
        self.get_cross_chain_quotes(query).await
    }
}

#[async_trait]
impl GasPriceProvider for OkxClient {
    async fn gas_price_feed(&self, chain_id: &ChainId) -> Result<Vec<GasPriceEntry>> {
        self.get_gas_price(chain_id).await
    }
}

#[async_trait]
impl TokenListProvider for OkxClient {
    async fn token_list(&self, chain_id: &ChainId) -> Result<Vec<TokenListing>> {
        self.get_all_tokens(chain_id).await
    }
}
