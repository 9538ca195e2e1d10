//! Token decimal resolution
//!
//! Lookups never fail: an unknown token, a listing without decimals, or a
//! token list that cannot be fetched all resolve to the configured default
//! precision and are reported as a [`ScoringWarning::DecimalsDefaulted`].

use std::collections::HashMap;
use std::fmt;

use futures::future::join_all;
use gasguard_core::constants::MAX_TOKEN_DECIMALS;
use gasguard_core::{ChainId, TokenAddress, TokenKey};
use okx_client::models::TokenListing;
use okx_client::TokenListProvider;

use crate::state::ScoringWarning;

/// Why the default precision was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalsFallback {
    NotListed,
    MissingDecimals,
    Invalid(String),
    FetchFailed(String),
}

impl fmt::Display for DecimalsFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotListed => write!(f, "token not found in token list"),
            Self::MissingDecimals => write!(f, "token list entry has no decimals"),
            Self::Invalid(raw) => write!(f, "token list decimals {:?} out of range", raw),
            Self::FetchFailed(reason) => write!(f, "token list fetch failed: {}", reason),
        }
    }
}

/// Outcome of one decimals lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalsLookup {
    pub decimals: u32,
    pub fallback: Option<DecimalsFallback>,
}

/// Find a token's decimals in a chain's token list (case-insensitive address match)
pub fn find_decimals(tokens: &[TokenListing], token: &TokenAddress) -> Result<u32, DecimalsFallback> {
    let listing = tokens
        .iter()
        .find(|t| {
            t.token_contract_address
                .as_deref()
                .is_some_and(|addr| token.matches(addr))
        })
        .ok_or(DecimalsFallback::NotListed)?;

    let raw = listing
        .decimals
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(DecimalsFallback::MissingDecimals)?;

    match raw.parse::<u32>() {
        Ok(d) if d <= MAX_TOKEN_DECIMALS => Ok(d),
        _ => Err(DecimalsFallback::Invalid(raw.to_string())),
    }
}

/// Resolve a token's decimal precision, falling back to `default_decimals`
pub async fn resolve_decimals(
    provider: &dyn TokenListProvider,
    chain_id: &ChainId,
    token: &TokenAddress,
    default_decimals: u32,
) -> DecimalsLookup {
    let found = match provider.token_list(chain_id).await {
        Ok(tokens) => find_decimals(&tokens, token),
        Err(e) => {
            tracing::error!(
                chain_id = %chain_id,
                "Error fetching token list for decimals: {}",
                e
            );
            Err(DecimalsFallback::FetchFailed(e.to_string()))
        }
    };

    match found {
        Ok(decimals) => DecimalsLookup {
            decimals,
            fallback: None,
        },
        Err(fallback) => {
            tracing::warn!(
                chain_id = %chain_id,
                token = %token,
                "Could not resolve decimals ({}), defaulting to {}",
                fallback,
                default_decimals
            );
            DecimalsLookup {
                decimals: default_decimals,
                fallback: Some(fallback),
            }
        }
    }
}

struct CachedDecimals {
    lookup: DecimalsLookup,
    reported: bool,
}

/// Request-scoped decimals cache. Each (chain, token) is fetched at most
/// once per scoring pass, and each fallback is reported once.
pub struct DecimalsCache<'a> {
    provider: &'a dyn TokenListProvider,
    default_decimals: u32,
    entries: HashMap<TokenKey, CachedDecimals>,
}

impl<'a> DecimalsCache<'a> {
    pub fn new(provider: &'a dyn TokenListProvider, default_decimals: u32) -> Self {
        Self {
            provider,
            default_decimals,
            entries: HashMap::new(),
        }
    }

    /// Resolve all uncached tokens concurrently
    pub async fn prefetch(&mut self, tokens: &[(ChainId, TokenAddress)]) {
        let mut pending: Vec<&(ChainId, TokenAddress)> = Vec::new();
        for entry in tokens {
            let key = TokenKey::new(&entry.0, &entry.1);
            let queued = pending.iter().any(|(c, t)| TokenKey::new(c, t) == key);
            if !self.entries.contains_key(&key) && !queued {
                pending.push(entry);
            }
        }
        if pending.is_empty() {
            return;
        }

        let provider = self.provider;
        let default_decimals = self.default_decimals;
        let lookups = join_all(
            pending
                .iter()
                .map(|(chain_id, token)| resolve_decimals(provider, chain_id, token, default_decimals)),
        )
        .await;

        for ((chain_id, token), lookup) in pending.into_iter().zip(lookups) {
            self.entries.insert(
                TokenKey::new(chain_id, token),
                CachedDecimals {
                    lookup,
                    reported: false,
                },
            );
        }
    }

    /// Resolve one token, recording a warning the first time a fallback is used
    pub async fn resolve(
        &mut self,
        chain_id: &ChainId,
        token: &TokenAddress,
        warnings: &mut Vec<ScoringWarning>,
    ) -> u32 {
        let key = TokenKey::new(chain_id, token);
        if !self.entries.contains_key(&key) {
            let lookup =
                resolve_decimals(self.provider, chain_id, token, self.default_decimals).await;
            self.entries.insert(
                key.clone(),
                CachedDecimals {
                    lookup,
                    reported: false,
                },
            );
        }

        let Some(entry) = self.entries.get_mut(&key) else {
            return self.default_decimals;
        };
        if let (Some(fallback), false) = (&entry.lookup.fallback, entry.reported) {
            warnings.push(ScoringWarning::DecimalsDefaulted {
                chain_id: chain_id.clone(),
                token_address: token.clone(),
                decimals: entry.lookup.decimals,
                reason: fallback.to_string(),
            });
            entry.reported = true;
        }
        entry.lookup.decimals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gasguard_core::ProviderError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubTokens {
        tokens: Vec<TokenListing>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubTokens {
        fn new(tokens: Vec<TokenListing>) -> Self {
            Self {
                tokens,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TokenListProvider for StubTokens {
        async fn token_list(&self, _chain_id: &ChainId) -> okx_client::Result<Vec<TokenListing>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Timeout { secs: 30 });
            }
            Ok(self.tokens.clone())
        }
    }

    fn listing(address: &str, decimals: Option<&str>) -> TokenListing {
        TokenListing {
            token_contract_address: Some(address.to_string()),
            decimals: decimals.map(str::to_string),
            ..TokenListing::default()
        }
    }

    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn test_find_decimals() {
        let tokens = vec![
            listing(USDC, Some("6")),
            listing("0xbad", Some("77")),
            listing("0xnone", None),
        ];
        assert_eq!(
            find_decimals(&tokens, &TokenAddress::new(USDC.to_lowercase())),
            Ok(6)
        );
        assert_eq!(
            find_decimals(&tokens, &TokenAddress::new("0xBAD")),
            Err(DecimalsFallback::Invalid("77".into()))
        );
        assert_eq!(
            find_decimals(&tokens, &TokenAddress::new("0xnone")),
            Err(DecimalsFallback::MissingDecimals)
        );
        assert_eq!(
            find_decimals(&tokens, &TokenAddress::new("0xmissing")),
            Err(DecimalsFallback::NotListed)
        );
    }

    #[tokio::test]
    async fn test_resolve_decimals_fetch_failure_defaults() {
        let provider = StubTokens {
            fail: true,
            ..StubTokens::new(vec![])
        };
        let lookup =
            resolve_decimals(&provider, &ChainId::new("1"), &TokenAddress::new(USDC), 18).await;
        assert_eq!(lookup.decimals, 18);
        assert!(matches!(lookup.fallback, Some(DecimalsFallback::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_cache_fetches_once_and_reports_once() {
        let provider = StubTokens::new(vec![listing(USDC, Some("6"))]);
        let mut cache = DecimalsCache::new(&provider, 18);
        let mut warnings = Vec::new();
        let chain = ChainId::new("1");

        cache
            .prefetch(&[
                (chain.clone(), TokenAddress::new(USDC)),
                (chain.clone(), TokenAddress::new(USDC.to_lowercase())),
                (chain.clone(), TokenAddress::new("0xunknown")),
            ])
            .await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let d = cache
            .resolve(&chain, &TokenAddress::new(USDC.to_uppercase().replace("0X", "0x")), &mut warnings)
            .await;
        assert_eq!(d, 6);

        for _ in 0..3 {
            let d = cache
                .resolve(&chain, &TokenAddress::new("0xUNKNOWN"), &mut warnings)
                .await;
            assert_eq!(d, 18);
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ScoringWarning::DecimalsDefaulted { decimals: 18, .. }
        ));
    }
}
