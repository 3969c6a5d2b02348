//! Nutrition goals service
//!
//! Runs the goal calculator against the stored profile and keeps the
//! `nutrition_goals` row in sync with it.

use crate::error::ApiError;
use crate::repositories::{NutritionGoalsRecord, NutritionGoalsRepository, ProfileRepository};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use weightcoach_shared::{
    calculate_all_goals, should_recalculate_goals, NutritionGoalsResponse,
    RecalculationStatusResponse,
};

/// What caused a calculation pass; used as the metric label
pub mod trigger {
    pub const PROFILE_CREATED: &str = "profile_created";
    pub const PROFILE_UPDATED: &str = "profile_updated";
    pub const MANUAL: &str = "manual";
    pub const WEIGHT_LOG: &str = "weight_log";
}

/// Nutrition goals service
pub struct GoalsService;

impl GoalsService {
    /// Get the stored goals
    pub async fn get_goals(db: &PgPool, user_id: Uuid) -> Result<NutritionGoalsResponse, ApiError> {
        let record = NutritionGoalsRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Nutrition goals not calculated yet".to_string()))?;

        Ok(Self::to_response(&record))
    }

    /// Recalculate goals from the stored profile and replace the stored row
    pub async fn recalculate(
        db: &PgPool,
        user_id: Uuid,
        trigger: &'static str,
    ) -> Result<NutritionGoalsResponse, ApiError> {
        let profile = ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?
            .to_profile();

        let now = Utc::now();
        let goals = calculate_all_goals(&profile, now.date_naive());

        let record =
            NutritionGoalsRepository::upsert(db, user_id, &goals, profile.current_weight, now)
                .await
                .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            trigger,
            daily_calories = goals.daily_calories,
            goal_intensity = goals.goal_intensity.as_str(),
            "Nutrition goals recalculated"
        );
        metrics::counter!("nutrition_goals_recalculated_total", "trigger" => trigger).increment(1);

        Ok(Self::to_response(&record))
    }

    /// Report whether the stored goals are due for recalculation
    pub async fn recalculation_status(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<RecalculationStatusResponse, ApiError> {
        let profile = ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?
            .to_profile();

        let record = NutritionGoalsRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(Self::status_for(profile.current_weight, record.as_ref(), Utc::now()))
    }

    /// Recalculate only when the staleness check says so.
    ///
    /// Returns the new goals when a calculation pass ran.
    pub async fn recalculate_if_stale(
        db: &PgPool,
        user_id: Uuid,
        trigger: &'static str,
    ) -> Result<Option<NutritionGoalsResponse>, ApiError> {
        let status = Self::recalculation_status(db, user_id).await?;

        if !status.should_recalculate {
            debug!(user_id = %user_id, trigger, "Nutrition goals still current");
            return Ok(None);
        }

        Self::recalculate(db, user_id, trigger).await.map(Some)
    }

    /// Enable or disable automatic recalculation
    pub async fn set_auto_recalculate(
        db: &PgPool,
        user_id: Uuid,
        auto_recalculate: bool,
    ) -> Result<NutritionGoalsResponse, ApiError> {
        let record = NutritionGoalsRepository::set_auto_recalculate(db, user_id, auto_recalculate)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Nutrition goals not calculated yet".to_string()))?;

        info!(user_id = %user_id, auto_recalculate, "Goal settings updated");

        Ok(Self::to_response(&record))
    }

    /// Staleness verdict for a current weight against the stored snapshot.
    ///
    /// A user with no goals row has never been calculated and defaults to
    /// automatic recalculation.
    fn status_for(
        current_weight: f64,
        record: Option<&NutritionGoalsRecord>,
        now: DateTime<Utc>,
    ) -> RecalculationStatusResponse {
        let auto_recalculate = record.map(|r| r.auto_recalculate).unwrap_or(true);
        let last_calculated_weight = record
            .and_then(|r| r.last_calculated_weight)
            .and_then(|w| w.to_f64());
        let last_recalculated_at = record.and_then(|r| r.last_recalculated_at);

        // A zero or missing snapshot weight can't anchor a percentage change
        let last_recalculated_at_checked = match last_calculated_weight {
            Some(w) if w > 0.0 => last_recalculated_at,
            _ => None,
        };

        let should_recalculate = should_recalculate_goals(
            current_weight,
            last_calculated_weight.unwrap_or(current_weight),
            last_recalculated_at_checked,
            auto_recalculate,
            now,
        );

        RecalculationStatusResponse {
            should_recalculate,
            auto_recalculate,
            current_weight,
            last_calculated_weight,
            last_recalculated_at,
        }
    }

    fn to_response(record: &NutritionGoalsRecord) -> NutritionGoalsResponse {
        NutritionGoalsResponse::new(
            record.goals(),
            record.auto_recalculate,
            record.last_calculated_weight.and_then(|w| w.to_f64()),
            record.last_recalculated_at,
        )
    }
}
