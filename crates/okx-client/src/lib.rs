//! okx-client: Signed HTTP client for the OKX DEX aggregation API
//!
//! Wraps the cross-chain quote, gas price, and token list endpoints and
//! exposes them through the provider traits in [`provider`].

pub mod auth;
pub mod constants;
pub mod models;
pub mod provider;

use std::sync::Arc;
use std::time::Duration;

use gasguard_core::{ChainId, OkxConfig, ProviderError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use constants::*;
use models::{CrossChainQuote, Envelope, GasPriceEntry, SupportedChain, TokenListing};

pub use provider::{GasPriceProvider, QuoteProvider, QuoteQuery, TokenListProvider};

/// Result type for OKX client operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// OKX DEX API client
#[derive(Clone)]
pub struct OkxClient {
    http: reqwest::Client,
    config: Arc<OkxConfig>,
}

impl OkxClient {
    /// Create a new client. Does not contact the API.
    pub fn new(config: OkxConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("gasguard")
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Get the current client configuration
    pub fn config(&self) -> &OkxConfig {
        &self.config
    }

    /// Fetch cross-chain quotes for a swap
    pub async fn get_cross_chain_quotes(&self, query: &QuoteQuery) -> Result<Vec<CrossChainQuote>> {
        let data = self
            .get(CROSS_CHAIN_PATH_PREFIX, QUOTE_ENDPOINT, &query.to_params())
            .await?;
        parse_list(data)
    }

    /// Fetch the gas price feed for a chain
    pub async fn get_gas_price(&self, chain_id: &ChainId) -> Result<Vec<GasPriceEntry>> {
        let params = [("chainIndex", chain_id.to_string())];
        let data = self
            .get(PRE_TRANSACTION_PATH_PREFIX, GAS_PRICE_ENDPOINT, &params)
            .await?;
        parse_list(data)
    }

    /// Fetch every token the aggregator knows on a chain
    pub async fn get_all_tokens(&self, chain_id: &ChainId) -> Result<Vec<TokenListing>> {
        let params = [("chainId", chain_id.to_string())];
        let data = self
            .get(AGGREGATOR_PATH_PREFIX, ALL_TOKENS_ENDPOINT, &params)
            .await?;
        parse_list(data)
    }

    /// Fetch chains supported by the cross-chain service
    pub async fn get_supported_chains(&self) -> Result<Vec<SupportedChain>> {
        let data = self
            .get(CROSS_CHAIN_PATH_PREFIX, SUPPORTED_CHAIN_ENDPOINT, &[])
            .await?;
        parse_list(data)
    }

    /// Signed GET returning the envelope's `data` field
    async fn get(&self, prefix: &str, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let request_path = build_request_path(prefix, endpoint, params);
        let url = format!("{}{}", self.config.api_domain, request_path);
        let timestamp = auth::timestamp_now();
        let headers = auth::auth_headers(&self.config, &timestamp, "GET", &request_path, "")?;

        tracing::debug!("Making OKX request: GET {}", url);

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        tracing::debug!(status, "OKX response received");

        parse_envelope(status, &body).inspect_err(|e| {
            tracing::error!(url = %url, "OKX request failed: {}", e);
        })
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                secs: self.config.request_timeout_secs,
            }
        } else {
            ProviderError::Unreachable {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Build `prefix + endpoint + ?query`. The result is both the URL path and
/// the path component of the signature, so the encoding must be stable.
pub fn build_request_path(prefix: &str, endpoint: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return format!("{}{}", prefix, endpoint);
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}{}?{}", prefix, endpoint, query)
}

/// Interpret an HTTP status and body as an OKX envelope
pub fn parse_envelope(status: u16, body: &str) -> Result<Value> {
    let envelope: Option<Envelope> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let message = envelope
            .and_then(|e| e.msg)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(ProviderError::HttpStatus { status, message });
    }

    let envelope = envelope
        .ok_or_else(|| ProviderError::Parse(format!("response is not an OKX envelope: {}", body)))?;

    match envelope.code.as_deref() {
        Some(SUCCESS_CODE) => Ok(envelope.data),
        code => Err(ProviderError::Api {
            code: code.unwrap_or("missing").to_string(),
            message: envelope
                .msg
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        }),
    }
}

/// Decode a list-shaped `data` field; `null` is an empty list
pub fn parse_list<T: DeserializeOwned>(data: Value) -> Result<Vec<T>> {
    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(data).map_err(|e| ProviderError::Parse(e.to_string())),
        other => Err(ProviderError::Parse(format!(
            "expected a list, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
