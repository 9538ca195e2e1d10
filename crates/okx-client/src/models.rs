//! Wire models for OKX DEX API responses
//!
//! The API mixes JSON strings and numbers for the same field across
//! endpoints and chains, so amount-like fields go through
//! [`gasguard_core::lenient`]. Router options stay raw JSON inside a quote
//! and are decoded one at a time, so a single malformed option cannot
//! reject the whole quote list and the original option can be passed back
//! to callers untouched.

use gasguard_core::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard `{code, msg, data}` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Token descriptor embedded in quotes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimals: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bridge identity of a router option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_id: Option<Value>,
}

/// One bridge alternative inside a cross-chain quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router: Option<RouterInfo>,
    /// Destination amount in destination-token base units
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_token_amount: Option<String>,
    /// Source-chain network fee in native base units
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_chain_network_fee: Option<String>,
    /// Gas-limit estimate for the source-chain transaction
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimate_gas_fee: Option<String>,
}

impl RouterOption {
    /// Decode the fields used for scoring from a raw `routerList` item
    pub fn from_raw(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    /// Bridge name of a raw option, readable even when the option itself is malformed
    pub fn raw_bridge_name(raw: &Value) -> Option<&str> {
        raw.pointer("/router/bridgeName").and_then(Value::as_str)
    }

    pub fn bridge_name(&self) -> Option<&str> {
        self.router.as_ref().and_then(|r| r.bridge_name.as_deref())
    }

    pub fn bridge_id(&self) -> Option<&Value> {
        self.router.as_ref().and_then(|r| r.bridge_id.as_ref())
    }
}

/// Cross-chain quote object, possibly bundling several router options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainQuote {
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_chain_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_chain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_token: Option<TokenDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_token: Option<TokenDescriptor>,
    /// Raw router options; see [`RouterOption::from_raw`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_list: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CrossChainQuote {
    /// The `routerList` items. A non-array `routerList` counts as missing.
    pub fn router_options(&self) -> Option<&[Value]> {
        self.router_list.as_ref().and_then(Value::as_array).map(Vec::as_slice)
    }
}

/// Fee-market (EIP-1559) fields of a gas price entry, all in wei
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip1559Fees {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub base_fee: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub propose_priority_fee: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub safe_priority_fee: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub fast_priority_fee: Option<String>,
}

/// One entry of the gas price feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceEntry {
    /// Legacy flat gas price
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub normal: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub min: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub max: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_or_string")]
    pub support_eip1559: Option<bool>,
    #[serde(default)]
    pub eip1559_protocol: Option<Eip1559Fees>,
}

/// Token list entry from the aggregator `all-tokens` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListing {
    #[serde(default)]
    pub token_contract_address: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub decimals: Option<String>,
}

/// Chain supported by the cross-chain service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedChain {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub chain_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
