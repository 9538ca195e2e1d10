//! Data Transfer Objects for API requests and responses

use gasguard_core::{GasPriceError, ScoringError};
use serde::{Deserialize, Serialize};
use swap_optimizer::{ParamsUsed, RouteScoringResult, ScoringWarning};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of a 404 when a scoring pass produced no routes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoRoutesResponse {
    pub message: String,
    /// Why there were no routes (no quotes vs. nothing usable)
    pub details: String,
    pub params_used: ParamsUsed,
    pub warnings: Vec<ScoringWarning>,
}

impl From<&RouteScoringResult> for NoRoutesResponse {
    fn from(result: &RouteScoringResult) -> Self {
        Self {
            message: "No routes found for the specified swap parameters.".to_string(),
            details: result.message().to_string(),
            params_used: result.params_used().clone(),
            warnings: result.warnings().to_vec(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", "Invalid request body", message)
    }
}

impl From<&ScoringError> for ApiError {
    fn from(err: &ScoringError) -> Self {
        let api_error = Self::new(err.error_code(), err.summary(), err.to_string());
        match err {
            ScoringError::InvalidRequest { .. } => api_error,
            ScoringError::QuoteFetchFailed(source) => api_error.with_details(source.to_string()),
            ScoringError::GasPriceResolutionFailed { source, .. } => {
                api_error.with_details(gas_details(source))
            }
        }
    }
}

fn gas_details(err: &GasPriceError) -> String {
    match err {
        GasPriceError::Unavailable { reason } => reason.clone(),
        GasPriceError::Invalid { price } => {
            format!("Calculated gas price ({}) is not valid (zero or negative)", price)
        }
    }
}
