//! Profile service - business logic for the coaching profile

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository};
use crate::services::goals::{trigger, GoalsService};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use weightcoach_shared::validation::validate_profile;
use weightcoach_shared::{
    calculate_age, CreateProfileRequest, ProfileResponse, ProfileWithGoalsResponse,
    UpdateProfileRequest, UserProfile,
};

/// Profile service for profile operations
pub struct ProfileService;

impl ProfileService {
    /// Get the user's profile
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let record = Self::load(db, user_id).await?;
        Ok(Self::to_response(&record, Utc::now().date_naive()))
    }

    /// Create the profile and run the first calculation pass
    pub async fn create_profile(
        db: &PgPool,
        user_id: Uuid,
        req: CreateProfileRequest,
    ) -> Result<ProfileWithGoalsResponse, ApiError> {
        let today = Utc::now().date_naive();
        let profile = UserProfile::from(req);
        validate_profile(&profile, today)?;

        // The insert is conflict-safe, so concurrent creates resolve to one 409
        let record = ProfileRepository::create(db, user_id, &profile)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Conflict("Profile already exists".to_string()))?;
        info!(user_id = %user_id, fitness_goal = profile.fitness_goal.as_str(), "Profile created");

        let goals = GoalsService::recalculate(db, user_id, trigger::PROFILE_CREATED).await?;

        Ok(ProfileWithGoalsResponse {
            profile: Self::to_response(&record, today),
            goals,
        })
    }

    /// Merge a partial update into the stored profile and recalculate
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileWithGoalsResponse, ApiError> {
        let existing = Self::load(db, user_id).await?;

        let today = Utc::now().date_naive();
        let merged = req.apply_to(&existing.to_profile());
        validate_profile(&merged, today)?;

        let record = ProfileRepository::update(db, user_id, &merged)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;
        info!(user_id = %user_id, "Profile updated");

        let goals = GoalsService::recalculate(db, user_id, trigger::PROFILE_UPDATED).await?;

        Ok(ProfileWithGoalsResponse {
            profile: Self::to_response(&record, today),
            goals,
        })
    }

    async fn load(db: &PgPool, user_id: Uuid) -> Result<ProfileRecord, ApiError> {
        ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    fn to_response(record: &ProfileRecord, today: NaiveDate) -> ProfileResponse {
        let profile = record.to_profile();

        ProfileResponse {
            user_id: record.user_id.to_string(),
            current_weight: profile.current_weight,
            height: profile.height,
            date_of_birth: profile.date_of_birth,
            age_years: calculate_age(profile.date_of_birth, today),
            gender: profile.gender,
            activity_level: profile.activity_level,
            fitness_goal: profile.fitness_goal,
            goal_weight: profile.goal_weight,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
