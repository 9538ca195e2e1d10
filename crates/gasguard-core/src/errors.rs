//! Error types for GasGuard

use thiserror::Error;

/// Core errors that can occur in GasGuard
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Aggregation API transport and envelope errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Provider request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Provider returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Provider API error (code {code}): {message}")]
    Api { code: String, message: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

/// Gas price resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GasPriceError {
    #[error("Gas price unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Gas price {price} is not valid (zero or negative)")]
    Invalid { price: String },
}

/// Errors that abort a route scoring pass
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid swap request: {reason}")]
    InvalidRequest {
        fields: Vec<&'static str>,
        reason: String,
    },

    #[error("Failed to get quotes: {0}")]
    QuoteFetchFailed(#[source] ProviderError),

    #[error("Failed to get or process gas price for chain {chain_id}: {source}")]
    GasPriceResolutionFailed {
        chain_id: String,
        #[source]
        source: GasPriceError,
    },
}

/// Result type alias for GasGuard operations
pub type Result<T> = std::result::Result<T, Error>;

impl GasPriceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "gas_price_unavailable",
            Self::Invalid { .. } => "gas_price_invalid",
        }
    }
}

impl ScoringError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::QuoteFetchFailed(_) => "quote_fetch_failed",
            Self::GasPriceResolutionFailed { source, .. } => source.error_code(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::QuoteFetchFailed(_) => 502,
            Self::GasPriceResolutionFailed { .. } => 503,
        }
    }

    /// Short human summary, paired with `to_string()` as the detail
    pub fn summary(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "Missing or invalid required parameters",
            Self::QuoteFetchFailed(_) => "Failed to get quotes",
            Self::GasPriceResolutionFailed { .. } => "Failed to get or process gas price",
        }
    }
}
