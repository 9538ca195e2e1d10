//! Route scoring
//!
//! One pass per request: validate, fetch quotes and the source-chain gas
//! price, cost every router option in the source chain's native currency,
//! then rank by `output - gas cost`.

use std::sync::Arc;

use gasguard_core::constants::UNKNOWN_BRIDGE;
use gasguard_core::{BaseUnits, ChainId, ScoringConfig, ScoringError, TokenAddress};
use num_bigint::BigUint;
use num_traits::Zero;
use okx_client::models::{CrossChainQuote, RouterOption};
use serde_json::Value;
use okx_client::{GasPriceProvider, OkxClient, QuoteProvider, QuoteQuery, TokenListProvider};

use crate::decimals::DecimalsCache;
use crate::gas::resolve_gas_price;
use crate::state::{
    GasCostSource, ParamsUsed, RouteScoringResult, ScoredRoute, ScoringWarning, SwapRequest,
};
use crate::units::{base_units_to_f64, DecimalAmount};

/// Ranks cross-chain routes for a swap request
pub struct RouteScorer {
    quotes: Arc<dyn QuoteProvider>,
    gas: Arc<dyn GasPriceProvider>,
    tokens: Arc<dyn TokenListProvider>,
    config: ScoringConfig,
}

/// Per-quote values shared by every router option in it
struct QuoteContext<'a> {
    source_chain: &'a ChainId,
    output_decimals: u32,
    native_decimals: u32,
    native_symbol: Option<&'a str>,
    gas_price: &'a BigUint,
}

impl RouteScorer {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        gas: Arc<dyn GasPriceProvider>,
        tokens: Arc<dyn TokenListProvider>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            quotes,
            gas,
            tokens,
            config,
        }
    }

    /// Use one OKX client for quotes, gas prices and token lists
    pub fn with_client(client: OkxClient, config: ScoringConfig) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client.clone(), client, config)
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score and rank every route the quote provider offers for `request`
    pub async fn compute_best_route(
        &self,
        request: &SwapRequest,
    ) -> Result<RouteScoringResult, ScoringError> {
        let params = request.validate(&self.config.default_slippage)?;
        let mut warnings = Vec::new();
        let mut decimals = DecimalsCache::new(self.tokens.as_ref(), self.config.default_token_decimals);

        let from_decimals = decimals
            .resolve(&params.from_chain_id, &params.from_token_address, &mut warnings)
            .await;
        let amount = params.amount.to_base_units(from_decimals);

        let params_used = ParamsUsed {
            from_chain_id: params.from_chain_id.clone(),
            from_token_address: params.from_token_address.clone(),
            from_token_amount: params.from_token_amount.clone(),
            to_chain_id: params.to_chain_id.clone(),
            to_token_address: params.to_token_address.clone(),
            slippage: params.slippage.clone(),
            amount_in_base_units: amount.clone(),
            from_token_decimals: from_decimals,
        };

        let query = QuoteQuery {
            from_chain_id: params.from_chain_id.clone(),
            to_chain_id: params.to_chain_id.clone(),
            from_token_address: params.from_token_address.clone(),
            to_token_address: params.to_token_address.clone(),
            amount,
            slippage: params.slippage.clone(),
        };

        tracing::info!(
            from_chain = %query.from_chain_id,
            to_chain = %query.to_chain_id,
            amount = %query.amount,
            slippage = %query.slippage,
            "Requesting cross-chain quotes"
        );

        let (quotes, gas_price) = tokio::join!(
            self.quotes.cross_chain_quotes(&query),
            resolve_gas_price(self.gas.as_ref(), &params.from_chain_id),
        );

        let quotes = quotes.map_err(|e| {
            tracing::error!("Failed to get quotes: {}", e);
            ScoringError::QuoteFetchFailed(e)
        })?;

        if quotes.is_empty() {
            tracing::warn!("No quote results returned from API");
            return Ok(RouteScoringResult::no_quotes(params_used, warnings));
        }

        let gas_price = gas_price.map_err(|source| {
            tracing::error!(
                chain_id = %params.from_chain_id,
                "Failed to get or process gas price: {}",
                source
            );
            ScoringError::GasPriceResolutionFailed {
                chain_id: params.from_chain_id.to_string(),
                source,
            }
        })?;

        tracing::warn!(
            "USD price fetching for tokens is skipped. Net value comparisons are approximate."
        );

        let destinations: Vec<(ChainId, TokenAddress)> = quotes
            .iter()
            .filter(|q| has_routes(q))
            .map(|q| destination_token(q, &params.to_chain_id, &params.to_token_address))
            .collect();
        decimals.prefetch(&destinations).await;

        let mut routes = Vec::new();
        for (quote_index, quote) in quotes.iter().enumerate() {
            let options = match quote.router_options() {
                Some(options) if !options.is_empty() => options,
                _ => {
                    tracing::warn!(quote_index, "Quote missing routerList or it is empty. Skipping.");
                    warnings.push(ScoringWarning::QuoteSkipped {
                        quote_index,
                        reason: "routerList missing or empty".to_string(),
                    });
                    continue;
                }
            };

            let (to_chain, to_token) =
                destination_token(quote, &params.to_chain_id, &params.to_token_address);
            let output_decimals = decimals.resolve(&to_chain, &to_token, &mut warnings).await;

            let source_chain = quote
                .from_chain_id
                .as_deref()
                .map(ChainId::from)
                .unwrap_or_else(|| params.from_chain_id.clone());
            let native_decimals = self.native_decimals(&source_chain, &mut warnings);

            let ctx = QuoteContext {
                source_chain: &source_chain,
                output_decimals,
                native_decimals,
                native_symbol: self.config.chains.native_symbol(&source_chain),
                gas_price: &gas_price,
            };

            for (route_index, raw) in options.iter().enumerate() {
                let scored = RouterOption::from_raw(raw)
                    .map_err(|e| format!("malformed router option: {}", e))
                    .and_then(|option| self.score_route(&option, raw, &ctx));
                match scored {
                    Ok(route) => routes.push(route),
                    Err(reason) => {
                        let bridge_name = RouterOption::raw_bridge_name(raw)
                            .unwrap_or(UNKNOWN_BRIDGE)
                            .to_string();
                        tracing::warn!(
                            bridge = %bridge_name,
                            "Skipping router option: {}",
                            reason
                        );
                        warnings.push(ScoringWarning::RouteSkipped {
                            quote_index,
                            route_index,
                            bridge_name,
                            reason,
                        });
                    }
                }
            }
        }

        let result = RouteScoringResult::ranked(routes, params_used, warnings);

        tracing::info!("Processed {} routes", result.all_routes().len());
        if let Some(best) = result.best_route() {
            tracing::info!(
                "Best route found via {}: output {:.6}, gas cost {:.8} {}",
                best.bridge_name,
                best.output_amount_decimal,
                best.gas_cost_decimal,
                best.native_symbol.as_deref().unwrap_or("Native")
            );
        }

        Ok(result)
    }

    fn native_decimals(&self, chain_id: &ChainId, warnings: &mut Vec<ScoringWarning>) -> u32 {
        if let Some(decimals) = self.config.chains.native_decimals(chain_id) {
            return decimals;
        }

        let decimals = self.config.default_native_decimals;
        let reported = warnings.iter().any(|w| {
            matches!(w, ScoringWarning::NativeDecimalsDefaulted { chain_id: c, .. } if c == chain_id)
        });
        if !reported {
            tracing::warn!(
                chain_id = %chain_id,
                "No native currency details for chain, defaulting to {} decimals",
                decimals
            );
            warnings.push(ScoringWarning::NativeDecimalsDefaulted {
                chain_id: chain_id.clone(),
                decimals,
            });
        }
        decimals
    }

    /// Cost one router option. `Err` carries the reason it was skipped.
    fn score_route(
        &self,
        option: &RouterOption,
        raw: &Value,
        ctx: &QuoteContext<'_>,
    ) -> Result<ScoredRoute, String> {
        let output_raw = parse_units("toTokenAmount", option.to_token_amount.as_deref())?
            .ok_or_else(|| "missing toTokenAmount".to_string())?;
        let output_decimal = base_units_to_f64(&output_raw, ctx.output_decimals);

        let network_fee = parse_units("fromChainNetworkFee", option.from_chain_network_fee.as_deref())?;
        let (gas_cost_raw, gas_cost_source, gas_limit_used) =
            match network_fee.filter(|fee| !fee.is_zero()) {
                Some(fee) => (fee, GasCostSource::Provided, None),
                None => {
                    let limit = parse_units("estimateGasFee", option.estimate_gas_fee.as_deref())?
                        .filter(|limit| !limit.is_zero())
                        .unwrap_or_else(|| BigUint::from(self.default_gas_limit(ctx.source_chain)));
                    let cost = &limit * ctx.gas_price;
                    (cost, GasCostSource::Calculated, Some(BaseUnits(limit)))
                }
            };
        let gas_cost_decimal = base_units_to_f64(&gas_cost_raw, ctx.native_decimals);

        let bridge_name = option.bridge_name().unwrap_or(UNKNOWN_BRIDGE).to_string();
        tracing::info!(
            "Route: {}, output: {:.6}, gas cost ({:?}): {:.8} {}",
            bridge_name,
            output_decimal,
            gas_cost_source,
            gas_cost_decimal,
            ctx.native_symbol.unwrap_or("Native")
        );

        Ok(ScoredRoute {
            bridge_id: option.bridge_id().cloned(),
            bridge_name,
            output_amount_raw: BaseUnits(output_raw),
            output_amount_decimal: output_decimal,
            output_decimals: ctx.output_decimals,
            gas_price_raw: BaseUnits(ctx.gas_price.clone()),
            estimated_gas_limit_from_route: option.estimate_gas_fee.clone(),
            gas_limit_used,
            gas_cost_raw: BaseUnits(gas_cost_raw),
            gas_cost_decimal,
            gas_cost_source,
            native_symbol: ctx.native_symbol.map(str::to_string),
            net_score: output_decimal - gas_cost_decimal,
            route_details: raw.clone(),
        })
    }

    fn default_gas_limit(&self, chain_id: &ChainId) -> u64 {
        self.config
            .chains
            .default_gas_limit(chain_id)
            .unwrap_or(self.config.default_gas_limit)
    }
}

/// Sort by net score descending. Stable, so equal scores keep encounter
/// order; NaN scores sort last.
pub fn rank_routes(routes: &mut [ScoredRoute]) {
    routes.sort_by(|a, b| sort_key(b.net_score).total_cmp(&sort_key(a.net_score)));
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else if score == 0.0 {
        // fold -0.0 into 0.0
        0.0
    } else {
        score
    }
}

fn has_routes(quote: &CrossChainQuote) -> bool {
    quote.router_options().is_some_and(|list| !list.is_empty())
}

/// Destination chain and token of a quote, falling back to the request
fn destination_token(
    quote: &CrossChainQuote,
    to_chain: &ChainId,
    to_token: &TokenAddress,
) -> (ChainId, TokenAddress) {
    let chain = quote
        .to_chain_id
        .as_deref()
        .map(ChainId::from)
        .unwrap_or_else(|| to_chain.clone());
    let token = quote
        .to_token
        .as_ref()
        .and_then(|t| t.token_contract_address.as_deref())
        .map(TokenAddress::from)
        .unwrap_or_else(|| to_token.clone());
    (chain, token)
}

/// Parse an optional base-unit integer. Absent or blank is `Ok(None)`.
/// Exponent forms such as `1e+30` are accepted when they name a whole number.
fn parse_units(field: &str, raw: Option<&str>) -> Result<Option<BigUint>, String> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Ok(units) = value.parse::<BigUint>() {
        return Ok(Some(units));
    }
    value
        .parse::<DecimalAmount>()
        .ok()
        .and_then(|amount| amount.to_integer())
        .map(Some)
        .ok_or_else(|| format!("malformed {}: {:?}", field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gasguard_core::{GasPriceError, ProviderError};
    use okx_client::models::{GasPriceEntry, TokenListing};
    use serde_json::json;
    use std::sync::Mutex;

    const USDC_ETH: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const USDC_ARB: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";

    struct StubQuotes {
        quotes: Option<Vec<CrossChainQuote>>,
        seen: Mutex<Option<QuoteQuery>>,
    }

    #[async_trait]
    impl QuoteProvider for StubQuotes {
        async fn cross_chain_quotes(&self, query: &QuoteQuery) -> okx_client::Result<Vec<CrossChainQuote>> {
            *self.seen.lock().unwrap() = Some(query.clone());
            self.quotes.clone().ok_or(ProviderError::HttpStatus {
                status: 500,
                message: "Internal Server Error".into(),
            })
        }
    }

    struct StubGas(Vec<GasPriceEntry>);

    #[async_trait]
    impl GasPriceProvider for StubGas {
        async fn gas_price_feed(&self, _chain_id: &ChainId) -> okx_client::Result<Vec<GasPriceEntry>> {
            Ok(self.0.clone())
        }
    }

    struct StubTokens(Vec<TokenListing>);

    #[async_trait]
    impl TokenListProvider for StubTokens {
        async fn token_list(&self, _chain_id: &ChainId) -> okx_client::Result<Vec<TokenListing>> {
            Ok(self.0.clone())
        }
    }

    fn token_list() -> Vec<TokenListing> {
        serde_json::from_value(json!([
            { "tokenContractAddress": USDC_ETH.to_lowercase(), "tokenSymbol": "USDC", "decimals": "6" },
            { "tokenContractAddress": USDC_ARB, "tokenSymbol": "USDC", "decimals": 6 }
        ]))
        .unwrap()
    }

    fn gas_feed(normal: &str) -> Vec<GasPriceEntry> {
        serde_json::from_value(json!([{ "normal": normal, "supportEip1559": false }])).unwrap()
    }

    fn quotes(value: serde_json::Value) -> Vec<CrossChainQuote> {
        serde_json::from_value(value).unwrap()
    }

    /// Two routes: A pays a calculated 0.01 ETH, B a provided 0.001 ETH
    fn basic_quotes() -> Vec<CrossChainQuote> {
        quotes(json!([{
            "fromChainId": "1",
            "toChainId": "42161",
            "toToken": { "tokenContractAddress": USDC_ARB, "tokenSymbol": "USDC" },
            "routerList": [
                {
                    "router": { "bridgeName": "Bridge A", "bridgeId": 211 },
                    "toTokenAmount": "1000000",
                    "estimateGasFee": "200000",
                    "minimumReceived": "995000"
                },
                {
                    "router": { "bridgeName": "Bridge B", "bridgeId": 235 },
                    "toTokenAmount": "990000",
                    "fromChainNetworkFee": "1000000000000000"
                }
            ]
        }]))
    }

    fn scorer(quotes: Option<Vec<CrossChainQuote>>, gas: Vec<GasPriceEntry>) -> (RouteScorer, Arc<StubQuotes>) {
        let quote_provider = Arc::new(StubQuotes {
            quotes,
            seen: Mutex::new(None),
        });
        let scorer = RouteScorer::new(
            quote_provider.clone(),
            Arc::new(StubGas(gas)),
            Arc::new(StubTokens(token_list())),
            ScoringConfig::default(),
        );
        (scorer, quote_provider)
    }

    fn request() -> SwapRequest {
        serde_json::from_value(json!({
            "fromChainId": "1",
            "fromTokenAddress": USDC_ETH,
            "fromTokenAmount": "1.5",
            "toChainId": "42161",
            "toTokenAddress": USDC_ARB
        }))
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[tokio::test]
    async fn test_basic_ranking() {
        let (scorer, quote_provider) = scorer(Some(basic_quotes()), gas_feed("50000000000"));
        let result = scorer.compute_best_route(&request()).await.unwrap();

        assert_eq!(result.message(), "Routes processed");
        let routes = result.all_routes();
        assert_eq!(routes.len(), 2);

        let a = &routes[0];
        assert_eq!(a.bridge_name, "Bridge A");
        assert_eq!(a.gas_cost_source, GasCostSource::Calculated);
        assert_eq!(a.gas_cost_raw.to_string(), "10000000000000000");
        assert_eq!(a.gas_limit_used, Some(BaseUnits::from(200_000u64)));
        assert_close(a.gas_cost_decimal, 0.01);
        assert_close(a.net_score, 0.99);
        assert_eq!(a.route_details["minimumReceived"], json!("995000"));

        let b = &routes[1];
        assert_eq!(b.bridge_name, "Bridge B");
        assert_eq!(b.gas_cost_source, GasCostSource::Provided);
        assert_eq!(b.gas_cost_raw.to_string(), "1000000000000000");
        assert_eq!(b.gas_limit_used, None);
        assert_close(b.net_score, 0.989);

        let query = quote_provider.seen.lock().unwrap().clone().unwrap();
        assert_eq!(query.amount.to_string(), "1500000");
        assert_eq!(query.slippage, "0.5");
        assert_eq!(result.params_used().amount_in_base_units.to_string(), "1500000");
        assert_eq!(result.params_used().from_token_decimals, 6);
        assert!(result.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_best_route_is_first_route() {
        let (scorer, _) = scorer(Some(basic_quotes()), gas_feed("50000000000"));
        let result = scorer.compute_best_route(&request()).await.unwrap();
        assert_eq!(result.best_route(), result.all_routes().first());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["bestRoute"], json["allRoutes"][0]);
        assert_eq!(json["bestRoute"]["bridgeId"], json!(211));
        assert_eq!(json["allRoutes"][1]["gasCostSource"], json!("provided"));
        assert_eq!(json["paramsUsed"]["amountInBaseUnits"], json!("1500000"));
    }

    #[tokio::test]
    async fn test_missing_gas_price_fails_request() {
        let (scorer, _) = scorer(Some(basic_quotes()), vec![]);
        let err = scorer.compute_best_route(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            ScoringError::GasPriceResolutionFailed {
                source: GasPriceError::Unavailable { .. },
                ..
            }
        ));
        assert_eq!(err.status_code(), 503);
    }

    #[tokio::test]
    async fn test_zero_quotes_is_not_an_error() {
        let (scorer, _) = scorer(Some(vec![]), gas_feed("50000000000"));
        let result = scorer.compute_best_route(&request()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.message(), "No quote results from API");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["bestRoute"], serde_json::Value::Null);
        assert_eq!(json["allRoutes"], json!([]));
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_empty_quotes_win_over_gas_failure() {
        let (scorer, _) = scorer(Some(vec![]), vec![]);
        let result = scorer.compute_best_route(&request()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.message(), "No quote results from API");
    }

    #[tokio::test]
    async fn test_quote_failure_wins_over_gas_failure() {
        let (scorer, _) = scorer(None, vec![]);
        let err = scorer.compute_best_route(&request()).await.unwrap_err();
        assert!(matches!(err, ScoringError::QuoteFetchFailed(_)));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_quote_failure() {
        let (scorer, _) = scorer(None, gas_feed("50000000000"));
        let err = scorer.compute_best_route(&request()).await.unwrap_err();
        assert!(matches!(err, ScoringError::QuoteFetchFailed(_)));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let (scorer, quote_provider) = scorer(Some(basic_quotes()), gas_feed("1"));
        let mut req = request();
        req.to_token_address = None;
        let err = scorer.compute_best_route(&req).await.unwrap_err();
        assert!(matches!(err, ScoringError::InvalidRequest { .. }));
        assert!(quote_provider.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_provided_fee_used_exactly() {
        let fee = "123456789012345678901234567";
        let (scorer, _) = scorer(
            Some(quotes(json!([{
                "toChainId": "42161",
                "routerList": [{
                    "router": { "bridgeName": "Pricey" },
                    "toTokenAmount": "5000000",
                    "fromChainNetworkFee": fee,
                    "estimateGasFee": "999999"
                }]
            }]))),
            gas_feed("50000000000"),
        );
        let result = scorer.compute_best_route(&request()).await.unwrap();
        let route = result.best_route().unwrap();
        assert_eq!(route.gas_cost_source, GasCostSource::Provided);
        assert_eq!(route.gas_cost_raw.to_string(), fee);
    }

    #[tokio::test]
    async fn test_skipped_quotes_and_routes_are_reported() {
        let (scorer, _) = scorer(
            Some(quotes(json!([
                { "toChainId": "42161", "routerList": [] },
                {
                    "toChainId": "42161",
                    "routerList": [
                        { "router": { "bridgeName": "NoAmount" } },
                        { "router": { "bridgeName": "BadAmount" }, "toTokenAmount": "12.5" },
                        { "toTokenAmount": "2000000", "fromChainNetworkFee": "-1" },
                        { "router": { "bridgeName": "Good" }, "toTokenAmount": "2000000" }
                    ]
                }
            ]))),
            gas_feed("1000000000"),
        );
        let result = scorer.compute_best_route(&request()).await.unwrap();

        assert_eq!(result.all_routes().len(), 1);
        let good = result.best_route().unwrap();
        assert_eq!(good.bridge_name, "Good");
        // Ethereum chain default gas limit
        assert_eq!(good.gas_limit_used, Some(BaseUnits::from(300_000u64)));

        let warnings = result.warnings();
        assert_eq!(warnings.len(), 4);
        assert!(matches!(warnings[0], ScoringWarning::QuoteSkipped { quote_index: 0, .. }));
        assert!(matches!(
            &warnings[1],
            ScoringWarning::RouteSkipped { quote_index: 1, route_index: 0, bridge_name, .. } if bridge_name == "NoAmount"
        ));
        assert!(matches!(
            &warnings[2],
            ScoringWarning::RouteSkipped { route_index: 1, bridge_name, .. } if bridge_name == "BadAmount"
        ));
        assert!(matches!(
            &warnings[3],
            ScoringWarning::RouteSkipped { route_index: 2, bridge_name, .. } if bridge_name == UNKNOWN_BRIDGE
        ));
    }

    #[tokio::test]
    async fn test_malformed_router_option_is_skipped() {
        let (scorer, _) = scorer(
            Some(quotes(json!([{
                "toChainId": "42161",
                "routerList": [
                    { "router": { "bridgeName": "Nested" }, "toTokenAmount": { "oops": 1 } },
                    { "router": { "bridgeName": "Flag" }, "toTokenAmount": true },
                    { "router": { "bridgeName": "Good" }, "toTokenAmount": "2000000" }
                ]
            }]))),
            gas_feed("1000000000"),
        );
        let result = scorer.compute_best_route(&request()).await.unwrap();

        assert_eq!(result.all_routes().len(), 1);
        assert_eq!(result.best_route().unwrap().bridge_name, "Good");
        let skipped: Vec<(usize, &str)> = result
            .warnings()
            .iter()
            .filter_map(|w| match w {
                ScoringWarning::RouteSkipped { route_index, bridge_name, .. } => {
                    Some((*route_index, bridge_name.as_str()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec![(0, "Nested"), (1, "Flag")]);
    }

    #[tokio::test]
    async fn test_route_details_keep_provider_types() {
        let raw = r#"[{
            "toChainId": "42161",
            "routerList": [{
                "router": { "bridgeName": "Typed", "bridgeId": 7, "crossChainFee": 0 },
                "toTokenAmount": 123456789012345678901234567890,
                "estimateGasFee": 200000,
                "needApprove": true,
                "minimumReceived": "995000"
            }]
        }]"#;
        let (scorer, _) = scorer(Some(serde_json::from_str(raw).unwrap()), gas_feed("1"));
        let result = scorer.compute_best_route(&request()).await.unwrap();

        let route = result.best_route().unwrap();
        assert_eq!(route.output_amount_raw.to_string(), "123456789012345678901234567890");
        assert_eq!(route.estimated_gas_limit_from_route.as_deref(), Some("200000"));
        assert_eq!(route.gas_limit_used, Some(BaseUnits::from(200_000u64)));

        let json = serde_json::to_value(&result).unwrap();
        let details = &json["bestRoute"]["routeDetails"];
        assert_eq!(details["estimateGasFee"], json!(200000));
        assert_eq!(details["needApprove"], json!(true));
        assert_eq!(details["router"]["crossChainFee"], json!(0));
        assert_eq!(details["minimumReceived"], json!("995000"));
        assert_eq!(details["toTokenAmount"].to_string(), "123456789012345678901234567890");
    }

    #[tokio::test]
    async fn test_exponent_amounts_are_accepted_when_whole() {
        let (scorer, _) = scorer(
            Some(quotes(json!([{
                "toChainId": "42161",
                "routerList": [
                    { "router": { "bridgeName": "Exp" }, "toTokenAmount": "1e+30", "estimateGasFee": 2.1e5 },
                    { "router": { "bridgeName": "Frac" }, "toTokenAmount": "1.5e0" }
                ]
            }]))),
            gas_feed("1"),
        );
        let result = scorer.compute_best_route(&request()).await.unwrap();

        assert_eq!(result.all_routes().len(), 1);
        let route = result.best_route().unwrap();
        assert_eq!(route.output_amount_raw.to_string(), format!("1{}", "0".repeat(30)));
        assert_eq!(route.gas_limit_used, Some(BaseUnits::from(210_000u64)));
        assert!(matches!(
            &result.warnings()[0],
            ScoringWarning::RouteSkipped { bridge_name, .. } if bridge_name == "Frac"
        ));
    }

    #[tokio::test]
    async fn test_all_routes_skipped() {
        let (scorer, _) = scorer(
            Some(quotes(json!([{ "routerList": [{ "router": { "bridgeName": "X" } }] }]))),
            gas_feed("1"),
        );
        let result = scorer.compute_best_route(&request()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.message(), "No viable routes after processing");
    }

    #[tokio::test]
    async fn test_unknown_tokens_and_chains_default() {
        let (scorer, _) = scorer(
            Some(quotes(json!([{
                "fromChainId": "56",
                "toChainId": "10",
                "toToken": { "tokenContractAddress": "0xUnlisted" },
                "routerList": [{ "toTokenAmount": "1000000000000000000" }]
            }]))),
            gas_feed("1000000000"),
        );
        let mut req = request();
        req.from_chain_id = Some("56".into());
        req.from_token_address = Some("0xAlsoUnlisted".into());
        req.from_token_amount = Some("2".into());

        let result = scorer.compute_best_route(&req).await.unwrap();
        assert_eq!(result.params_used().from_token_decimals, 18);
        assert_eq!(
            result.params_used().amount_in_base_units.to_string(),
            "2000000000000000000"
        );

        let route = result.best_route().unwrap();
        assert_eq!(route.output_decimals, 18);
        assert_close(route.output_amount_decimal, 1.0);
        // global default gas limit for a chain missing from the table
        assert_eq!(route.gas_limit_used, Some(BaseUnits::from(300_000u64)));

        let kinds: Vec<&str> = result
            .warnings()
            .iter()
            .map(|w| match w {
                ScoringWarning::DecimalsDefaulted { .. } => "decimals",
                ScoringWarning::NativeDecimalsDefaulted { .. } => "native",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["decimals", "decimals", "native"]);
    }

    #[tokio::test]
    async fn test_scoring_is_deterministic() {
        let (scorer, _) = scorer(Some(basic_quotes()), gas_feed("50000000000"));
        let first = serde_json::to_string(&scorer.compute_best_route(&request()).await.unwrap()).unwrap();
        let second = serde_json::to_string(&scorer.compute_best_route(&request()).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    fn scored(name: &str, net_score: f64) -> ScoredRoute {
        ScoredRoute {
            bridge_name: name.to_string(),
            bridge_id: None,
            output_amount_raw: BaseUnits::zero(),
            output_amount_decimal: 0.0,
            output_decimals: 18,
            gas_price_raw: BaseUnits::zero(),
            estimated_gas_limit_from_route: None,
            gas_limit_used: None,
            gas_cost_raw: BaseUnits::zero(),
            gas_cost_decimal: 0.0,
            gas_cost_source: GasCostSource::Calculated,
            native_symbol: None,
            net_score,
            route_details: Value::Null,
        }
    }

    #[test]
    fn test_rank_routes_sorted_and_stable() {
        let mut routes = vec![
            scored("nan", f64::NAN),
            scored("low", -1.0),
            scored("tie-1", 2.0),
            scored("inf", f64::INFINITY),
            scored("tie-2", 2.0),
            scored("zero", -0.0),
            scored("neg-inf", f64::NEG_INFINITY),
        ];
        rank_routes(&mut routes);

        let names: Vec<&str> = routes.iter().map(|r| r.bridge_name.as_str()).collect();
        assert_eq!(names, vec!["inf", "tie-1", "tie-2", "zero", "low", "nan", "neg-inf"]);

        for pair in routes.windows(2) {
            assert!(sort_key(pair[0].net_score) >= sort_key(pair[1].net_score));
        }
    }
}
