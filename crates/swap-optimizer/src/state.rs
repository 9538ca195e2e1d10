//! Swap request and route scoring result types

use gasguard_core::{lenient, BaseUnits, ChainId, ScoringError, TokenAddress};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::scorer::rank_routes;
use crate::units::DecimalAmount;

/// A `routerList` item exactly as the quote provider sent it
pub type CandidateRoute = Value;

/// Swap parameters as submitted by a client. Any field may be missing;
/// [`SwapRequest::validate`] turns it into [`SwapParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub from_chain_id: Option<String>,
    #[serde(default)]
    pub from_token_address: Option<String>,
    /// Human decimal amount of the source token (e.g. "1.5")
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub from_token_amount: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub to_chain_id: Option<String>,
    #[serde(default)]
    pub to_token_address: Option<String>,
    /// Slippage tolerance in percent
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub slippage: Option<String>,
}

/// Validated swap parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub from_chain_id: ChainId,
    pub from_token_address: TokenAddress,
    pub from_token_amount: String,
    pub amount: DecimalAmount,
    pub to_chain_id: ChainId,
    pub to_token_address: TokenAddress,
    pub slippage: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SwapRequest {
    /// Check required fields and apply the default slippage
    pub fn validate(&self, default_slippage: &str) -> Result<SwapParams, ScoringError> {
        let required = [
            ("fromChainId", &self.from_chain_id),
            ("fromTokenAddress", &self.from_token_address),
            ("fromTokenAmount", &self.from_token_amount),
            ("toChainId", &self.to_chain_id),
            ("toTokenAddress", &self.to_token_address),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| non_empty(value).is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ScoringError::InvalidRequest {
                reason: format!(
                    "missing required parameters: {}. Please provide fromChainId, \
                     fromTokenAddress, fromTokenAmount, toChainId, and toTokenAddress",
                    missing.join(", ")
                ),
                fields: missing,
            });
        }

        // Presence checked above
        let field = |value: &Option<String>| non_empty(value).unwrap_or_default().to_string();

        let from_token_amount = field(&self.from_token_amount);
        let amount: DecimalAmount =
            from_token_amount
                .parse()
                .map_err(|e| ScoringError::InvalidRequest {
                    fields: vec!["fromTokenAmount"],
                    reason: format!("fromTokenAmount is not a valid amount: {}", e),
                })?;

        let slippage = non_empty(&self.slippage)
            .unwrap_or(default_slippage)
            .to_string();

        Ok(SwapParams {
            from_chain_id: ChainId::new(field(&self.from_chain_id)),
            from_token_address: TokenAddress::new(field(&self.from_token_address)),
            from_token_amount,
            amount,
            to_chain_id: ChainId::new(field(&self.to_chain_id)),
            to_token_address: TokenAddress::new(field(&self.to_token_address)),
            slippage,
        })
    }
}

/// Where a route's gas cost came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasCostSource {
    /// The provider's source-chain network fee
    Provided,
    /// gas limit * effective gas price
    Calculated,
}

/// One candidate route with normalized output, gas cost and net score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRoute {
    pub bridge_name: String,
    pub bridge_id: Option<Value>,
    pub output_amount_raw: BaseUnits,
    pub output_amount_decimal: f64,
    pub output_decimals: u32,
    pub gas_price_raw: BaseUnits,
    /// Gas-limit estimate supplied by the route, if any
    pub estimated_gas_limit_from_route: Option<String>,
    /// Gas limit multiplied by the gas price (calculated costs only)
    pub gas_limit_used: Option<BaseUnits>,
    pub gas_cost_raw: BaseUnits,
    pub gas_cost_decimal: f64,
    pub gas_cost_source: GasCostSource,
    pub native_symbol: Option<String>,
    /// output_amount_decimal - gas_cost_decimal. Approximate: the two terms
    /// are in different currencies unless the tokens have value parity.
    pub net_score: f64,
    pub route_details: CandidateRoute,
}

/// Non-fatal degradations recorded during a scoring pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScoringWarning {
    DecimalsDefaulted {
        chain_id: ChainId,
        token_address: TokenAddress,
        decimals: u32,
        reason: String,
    },
    NativeDecimalsDefaulted {
        chain_id: ChainId,
        decimals: u32,
    },
    QuoteSkipped {
        quote_index: usize,
        reason: String,
    },
    RouteSkipped {
        quote_index: usize,
        route_index: usize,
        bridge_name: String,
        reason: String,
    },
}

/// Effective parameters of a scoring pass, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsUsed {
    pub from_chain_id: ChainId,
    pub from_token_address: TokenAddress,
    pub from_token_amount: String,
    pub to_chain_id: ChainId,
    pub to_token_address: TokenAddress,
    pub slippage: String,
    pub amount_in_base_units: BaseUnits,
    pub from_token_decimals: u32,
}

pub const MESSAGE_ROUTES_PROCESSED: &str = "Routes processed";
pub const MESSAGE_NO_VIABLE_ROUTES: &str = "No viable routes after processing";
pub const MESSAGE_NO_QUOTES: &str = "No quote results from API";

/// Output of one scoring pass. The best route is always the first ranked
/// route; there is no separately stored "best".
#[derive(Debug, Clone, PartialEq)]
pub struct RouteScoringResult {
    message: String,
    all_routes: Vec<ScoredRoute>,
    params_used: ParamsUsed,
    warnings: Vec<ScoringWarning>,
}

impl RouteScoringResult {
    /// Rank `routes` and build the result
    pub fn ranked(
        mut routes: Vec<ScoredRoute>,
        params_used: ParamsUsed,
        warnings: Vec<ScoringWarning>,
    ) -> Self {
        rank_routes(&mut routes);
        let message = if routes.is_empty() {
            MESSAGE_NO_VIABLE_ROUTES
        } else {
            MESSAGE_ROUTES_PROCESSED
        };
        Self {
            message: message.to_string(),
            all_routes: routes,
            params_used,
            warnings,
        }
    }

    /// Result for a provider response with no quotes at all
    pub fn no_quotes(params_used: ParamsUsed, warnings: Vec<ScoringWarning>) -> Self {
        Self {
            message: MESSAGE_NO_QUOTES.to_string(),
            all_routes: Vec::new(),
            params_used,
            warnings,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn best_route(&self) -> Option<&ScoredRoute> {
        self.all_routes.first()
    }

    pub fn all_routes(&self) -> &[ScoredRoute] {
        &self.all_routes
    }

    pub fn params_used(&self) -> &ParamsUsed {
        &self.params_used
    }

    pub fn warnings(&self) -> &[ScoringWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.all_routes.is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteScoringResultWire<'a> {
    message: &'a str,
    best_route: Option<&'a ScoredRoute>,
    all_routes: &'a [ScoredRoute],
    params_used: &'a ParamsUsed,
    warnings: &'a [ScoringWarning],
}

impl Serialize for RouteScoringResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RouteScoringResultWire {
            message: &self.message,
            best_route: self.best_route(),
            all_routes: &self.all_routes,
            params_used: &self.params_used,
            warnings: &self.warnings,
        }
        .serialize(serializer)
    }
}
