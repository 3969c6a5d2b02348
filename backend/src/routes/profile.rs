//! Coaching profile API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use weightcoach_shared::{
    CreateProfileRequest, ProfileResponse, ProfileWithGoalsResponse, UpdateProfileRequest,
};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).post(create_profile).put(update_profile))
}

/// GET /api/v1/profile - Get the caller's profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile - Create the profile and calculate initial goals
async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<ProfileWithGoalsResponse>)> {
    let created = ProfileService::create_profile(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/profile - Partially update the profile; goals follow
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileWithGoalsResponse>> {
    let updated = ProfileService::update_profile(state.db(), auth.user_id, req).await?;
    Ok(Json(updated))
}
