//! swap-optimizer: Cross-chain route scoring
//!
//! Given a swap request, fetches quotes and the source-chain gas price,
//! normalizes every candidate route into comparable units and ranks them
//! by an approximate net value (output minus gas cost).

pub mod decimals;
pub mod gas;
pub mod scorer;
pub mod state;
pub mod units;

pub use decimals::{DecimalsCache, DecimalsFallback, DecimalsLookup};
pub use gas::{normalize_gas_price, resolve_gas_price};
pub use scorer::{rank_routes, RouteScorer};
pub use state::{
    CandidateRoute, GasCostSource, ParamsUsed, RouteScoringResult, ScoredRoute, ScoringWarning,
    SwapParams, SwapRequest,
};
pub use units::{format_units, to_base_unit, to_decimal, DecimalAmount};
