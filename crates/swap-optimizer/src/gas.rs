//! Gas price normalization
//!
//! Reduces a raw gas price feed to one effective price per gas unit (wei).
//! A fee-market entry (base fee + priority fee) takes precedence over the
//! legacy flat `normal` price.

use gasguard_core::{ChainId, GasPriceError};
use num_bigint::{BigInt, BigUint, Sign};
use okx_client::models::{Eip1559Fees, GasPriceEntry};
use okx_client::GasPriceProvider;

/// Fetch and normalize the effective gas price for a chain
pub async fn resolve_gas_price(
    provider: &dyn GasPriceProvider,
    chain_id: &ChainId,
) -> Result<BigUint, GasPriceError> {
    let feed = provider
        .gas_price_feed(chain_id)
        .await
        .map_err(|e| GasPriceError::Unavailable {
            reason: format!("gas price feed request failed: {}", e),
        })?;

    normalize_gas_price(&feed)
}

/// Derive the effective gas price from the first feed entry
pub fn normalize_gas_price(feed: &[GasPriceEntry]) -> Result<BigUint, GasPriceError> {
    let entry = feed.first().ok_or_else(|| GasPriceError::Unavailable {
        reason: "gas price feed is empty".to_string(),
    })?;

    let price = match fee_market_fees(entry) {
        Some(fees) => {
            let price = fee_market_price(fees)?;
            tracing::info!("Using EIP-1559 gas price (base + priority): {}", price);
            price
        }
        None => match present(&entry.normal) {
            Some(normal) => {
                let price = parse_fee("normal", normal)?;
                tracing::info!("Using legacy 'normal' gas price: {}", price);
                price
            }
            None => {
                return Err(GasPriceError::Unavailable {
                    reason: "neither 'normal' nor EIP-1559 data present".to_string(),
                })
            }
        },
    };

    match price.to_biguint() {
        Some(p) if price.sign() == Sign::Plus => Ok(p),
        _ => Err(GasPriceError::Invalid {
            price: price.to_string(),
        }),
    }
}

/// Fee-market fields, when the entry supports EIP-1559 and has a base fee
fn fee_market_fees(entry: &GasPriceEntry) -> Option<&Eip1559Fees> {
    if entry.support_eip1559 != Some(true) {
        return None;
    }
    entry
        .eip1559_protocol
        .as_ref()
        .filter(|fees| present(&fees.base_fee).is_some())
}

/// base fee + priority fee, priority preferring safe > propose > 0
fn fee_market_price(fees: &Eip1559Fees) -> Result<BigInt, GasPriceError> {
    let base_fee = present(&fees.base_fee)
        .map(|raw| parse_fee("baseFee", raw))
        .transpose()?
        .unwrap_or_default();

    let priority_fee = match (present(&fees.safe_priority_fee), present(&fees.propose_priority_fee)) {
        (Some(safe), _) => parse_fee("safePriorityFee", safe)?,
        (None, Some(propose)) => parse_fee("proposePriorityFee", propose)?,
        (None, None) => BigInt::default(),
    };

    Ok(base_fee + priority_fee)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_fee(field: &str, raw: &str) -> Result<BigInt, GasPriceError> {
    raw.parse::<BigInt>()
        .map_err(|_| GasPriceError::Unavailable {
            reason: format!("'{}' value {:?} is not an integer", field, raw),
        })
}
