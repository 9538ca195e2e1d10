//! Swap route optimizer routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use swap_optimizer::SwapRequest;

use crate::dto::{ApiError, NoRoutesResponse};
use crate::AppState;

/// Create swap optimizer routes
pub fn router() -> Router<AppState> {
    Router::new().route("/find-best-route", post(find_best_route))
}

/// GET / - Plain-text service banner
pub async fn banner() -> &'static str {
    "GasGuard Swap Optimizer Backend is running!"
}

/// POST /api/v1/gasguard/find-best-route - Rank cross-chain routes for a swap
async fn find_best_route(
    State(state): State<AppState>,
    payload: Result<Json<SwapRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!("find-best-route: rejected body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError::bad_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    tracing::info!(?request, "find-best-route called");

    match state.scorer().compute_best_route(&request).await {
        Ok(result) if result.is_empty() => {
            tracing::info!("find-best-route: no routes found ({})", result.message());
            (StatusCode::NOT_FOUND, Json(NoRoutesResponse::from(&result))).into_response()
        }
        Ok(result) => {
            tracing::info!("find-best-route: successfully processed request");
            Json(result).into_response()
        }
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!("find-best-route: {}", e);
            } else {
                tracing::warn!("find-best-route: {}", e);
            }
            (status, Json(ApiError::from(&e))).into_response()
        }
    }
}
