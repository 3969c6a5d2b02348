//! Weight log API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use weightcoach_shared::{
    LogWeightRequest, LogWeightResponse, WeightHistoryQuery, WeightHistoryResponse,
};

/// Create weight routes
pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/", get(get_weight_history).post(log_weight))
}

/// POST /api/v1/weight - Log a weigh-in (kg)
///
/// Moves the profile's current weight and recalculates goals when they are stale.
async fn log_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<LogWeightResponse>)> {
    let logged = WeightService::log_weight(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(logged)))
}

/// GET /api/v1/weight?limit=N - Weight history, newest first
async fn get_weight_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WeightHistoryQuery>,
) -> ApiResult<Json<WeightHistoryResponse>> {
    let history = WeightService::history(state.db(), auth.user_id, query.limit()).await?;
    Ok(Json(history))
}
