//! Nutrition goals API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::goals::{trigger, GoalsService};
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use weightcoach_shared::{
    NutritionGoalsResponse, RecalculationStatusResponse, UpdateGoalSettingsRequest,
};

/// Create nutrition goals routes
pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_goals))
        .route("/recalculate", post(recalculate))
        .route("/status", get(recalculation_status))
        .route("/settings", put(update_settings))
}

/// GET /api/v1/goals - Stored nutrition goals
async fn get_goals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NutritionGoalsResponse>> {
    let goals = GoalsService::get_goals(state.db(), auth.user_id).await?;
    Ok(Json(goals))
}

/// POST /api/v1/goals/recalculate - Recalculate now, regardless of staleness
async fn recalculate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NutritionGoalsResponse>> {
    let goals = GoalsService::recalculate(state.db(), auth.user_id, trigger::MANUAL).await?;
    Ok(Json(goals))
}

/// GET /api/v1/goals/status - Whether the stored goals are due for recalculation
async fn recalculation_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<RecalculationStatusResponse>> {
    let status = GoalsService::recalculation_status(state.db(), auth.user_id).await?;
    Ok(Json(status))
}

/// PUT /api/v1/goals/settings - Toggle automatic recalculation
async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateGoalSettingsRequest>,
) -> ApiResult<Json<NutritionGoalsResponse>> {
    let goals =
        GoalsService::set_auto_recalculate(state.db(), auth.user_id, req.auto_recalculate).await?;
    Ok(Json(goals))
}
